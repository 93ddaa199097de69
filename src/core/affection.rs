use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::rng::RandomSource;
use crate::core::schedule::ActivityState;

pub const MIN_AFFECTION: i32 = 0;
pub const MAX_AFFECTION: i32 = 100;
pub const INITIAL_AFFECTION: i32 = 50;

/// Messages longer than this (in characters) stress a busy companion.
pub const LONG_MESSAGE_CHARS: usize = 10;
/// Below this, asking to meet up startles her.
pub const SHY_THRESHOLD: i32 = 40;

pub const POSITIVE_KEYWORDS: [&str; 6] = ["辛苦", "聽你說", "村上", "展覽", "吃飯", "休息"];
pub const NEGATIVE_KEYWORDS: [&str; 4] = ["快回", "照片", "見面", "為什麼不理我"];
pub const MEET_UP: &str = "見面";

/// Affection score, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Affection(i32);

impl Affection {
    pub fn new(value: i32) -> Self {
        Affection(value.clamp(MIN_AFFECTION, MAX_AFFECTION))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Add a delta and clamp back into range.
    pub fn apply(self, delta: i32) -> Self {
        Affection::new(self.0.saturating_add(delta))
    }

    /// Fraction of the maximum, for progress bars.
    pub fn ratio(&self) -> f32 {
        self.0 as f32 / MAX_AFFECTION as f32
    }
}

impl Default for Affection {
    fn default() -> Self {
        Affection(INITIAL_AFFECTION)
    }
}

impl fmt::Display for Affection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_AFFECTION)
    }
}

/// How the last message landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Stressed,
    Understood,
    Upset,
    Startled,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Stressed => "(她在忙，你的訊息造成了壓力)",
            Feedback::Understood => "(她覺得被理解)",
            Feedback::Upset => "(她感到不悅)",
            Feedback::Startled => "(嚇到她了)",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AffectionChange {
    pub delta: i32,
    pub feedback: Option<Feedback>,
}

/// Score a message. Deltas from every rule accumulate; the feedback of the
/// last rule that fired wins.
pub fn compute_delta<R: RandomSource>(
    text: &str,
    state: ActivityState,
    current: Affection,
    rng: &mut R,
) -> AffectionChange {
    let mut delta = 0;
    let mut feedback = None;

    if state.penalises_long_messages() && text.chars().count() > LONG_MESSAGE_CHARS {
        delta -= 2;
        feedback = Some(Feedback::Stressed);
    }

    for keyword in POSITIVE_KEYWORDS.iter().filter(|k| text.contains(*k)) {
        let gain = rng.next_in_range(1, 3);
        tracing::trace!(keyword, gain, "positive keyword");
        delta += gain;
        feedback = Some(Feedback::Understood);
    }

    for keyword in NEGATIVE_KEYWORDS.iter().filter(|k| text.contains(*k)) {
        let loss = rng.next_in_range(2, 5);
        tracing::trace!(keyword, loss, "negative keyword");
        delta -= loss;
        feedback = Some(Feedback::Upset);
    }

    if current.value() < SHY_THRESHOLD && text.contains(MEET_UP) {
        delta -= 5;
        feedback = Some(Feedback::Startled);
    }

    AffectionChange { delta, feedback }
}
