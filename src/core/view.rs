use serde::Serialize;

use crate::core::affection::Affection;
use crate::core::mood::Mood;
use crate::core::schedule::ScheduleSlot;
use crate::core::session::{ChatEntry, Session};

/// Relationship label derived from affection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Disliked,
    Unremarkable,
    Favorable,
    Partner,
}

impl Standing {
    pub fn from_affection(affection: Affection) -> Self {
        match affection.value() {
            v if v < 30 => Standing::Disliked,
            v if v > 90 => Standing::Partner,
            v if v > 70 => Standing::Favorable,
            _ => Standing::Unremarkable,
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Standing::Disliked => Some("厭惡"),
            Standing::Unremarkable => None,
            Standing::Favorable => Some("好感"),
            Standing::Partner => Some("男女朋友"),
        }
    }
}

/// Read-only snapshot the host renders from.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView<'a> {
    pub affection: Affection,
    pub standing: Standing,
    pub mood: Mood,
    pub glyph: &'static str,
    pub history: &'a [ChatEntry],
    pub has_reference_images: bool,
    pub slot: ScheduleSlot,
    pub clock: String,
}

impl Session {
    pub fn view(&self, slot: ScheduleSlot, clock: impl Into<String>) -> SessionView<'_> {
        let mood = self.mood();
        SessionView {
            affection: self.affection(),
            standing: Standing::from_affection(self.affection()),
            mood,
            glyph: mood.glyph(),
            history: self.history(),
            has_reference_images: !self.reference_images().is_empty(),
            slot,
            clock: clock.into(),
        }
    }
}
