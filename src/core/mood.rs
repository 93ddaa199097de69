use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression tag shown in the image area.
///
/// `Tired` is never produced by the reply table; it only has a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Neutral,
    Happy,
    Tired,
    Annoyed,
    Shy,
    Love,
}

impl Mood {
    pub fn glyph(&self) -> &'static str {
        match self {
            Mood::Neutral => "😐",
            Mood::Happy => "😊",
            Mood::Tired => "😪",
            Mood::Annoyed => "😒",
            Mood::Shy => "😳",
            Mood::Love => "😍",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Neutral => write!(f, "neutral"),
            Mood::Happy => write!(f, "happy"),
            Mood::Tired => write!(f, "tired"),
            Mood::Annoyed => write!(f, "annoyed"),
            Mood::Shy => write!(f, "shy"),
            Mood::Love => write!(f, "love"),
        }
    }
}
