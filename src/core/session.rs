use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::core::affection::{compute_delta, Affection, AffectionChange};
use crate::core::error::{CompanionError, Result};
use crate::core::mood::Mood;
use crate::core::profile::pick_news;
use crate::core::response::{generate, Reply};
use crate::core::rng::RandomSource;
use crate::core::schedule::{resolve, ScheduleSlot};

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Companion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        ChatEntry { speaker: Speaker::User, text: text.into() }
    }

    pub fn companion(text: impl Into<String>) -> Self {
        ChatEntry { speaker: Speaker::Companion, text: text.into() }
    }
}

/// Reference picture supplied by the user. Only displayed, never decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle {
    pub path: PathBuf,
}

impl ImageHandle {
    /// Accept jpg/png files by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);

        if supported {
            Ok(ImageHandle { path: path.to_path_buf() })
        } else {
            Err(CompanionError::UnsupportedImage(path.display().to_string()))
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Everything one submission produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turn {
    pub slot: ScheduleSlot,
    pub change: AffectionChange,
    pub affection_before: Affection,
    pub affection_after: Affection,
    pub reply: Reply,
}

/// State of one conversation. Created when the shell starts, dropped when it
/// exits; nothing here is written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Local>,
    affection: Affection,
    mood: Mood,
    history: Vec<ChatEntry>,
    reference_images: Vec<ImageHandle>,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Affection::default())
    }
}

impl Session {
    pub fn new(initial: Affection) -> Self {
        Session {
            id: Uuid::new_v4(),
            started_at: Local::now(),
            affection: initial,
            mood: Mood::default(),
            history: Vec::new(),
            reference_images: Vec::new(),
        }
    }

    pub fn affection(&self) -> Affection {
        self.affection
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn history(&self) -> &[ChatEntry] {
        &self.history
    }

    pub fn reference_images(&self) -> &[ImageHandle] {
        &self.reference_images
    }

    /// Open an empty conversation with a news greeting. Returns whether a
    /// greeting was added.
    pub fn seed_greeting<R: RandomSource>(&mut self, rng: &mut R) -> bool {
        if !self.history.is_empty() {
            return false;
        }
        let news = pick_news(rng);
        self.history
            .push(ChatEntry::companion(format!("早安。剛看到這個新聞...{}，讓人有點在意。", news)));
        tracing::debug!(session = %self.id, "seeded opening greeting");
        true
    }

    /// Keep the first non-empty upload; later ones are ignored.
    pub fn attach_images(&mut self, images: Vec<ImageHandle>) -> bool {
        if images.is_empty() || !self.reference_images.is_empty() {
            return false;
        }
        tracing::info!(session = %self.id, count = images.len(), "reference images attached");
        self.reference_images = images;
        true
    }

    /// Process one user message at the given hour. Blank input is ignored.
    pub fn submit<R: RandomSource>(&mut self, text: &str, hour: u32, rng: &mut R) -> Option<Turn> {
        if text.trim().is_empty() {
            return None;
        }

        let slot = *resolve(hour);
        let before = self.affection;
        let change = compute_delta(text, slot.state, before, rng);
        self.affection = before.apply(change.delta);

        let reply = generate(text, slot.state, change.delta, self.affection, rng);
        self.mood = reply.mood;

        self.history.push(ChatEntry::user(text));
        self.history.push(ChatEntry::companion(reply.text.clone()));

        tracing::debug!(
            session = %self.id,
            hour,
            state = %slot.state,
            delta = change.delta,
            feedback = ?change.feedback,
            affection = self.affection.value(),
            mood = %self.mood,
            "turn processed"
        );

        Some(Turn {
            slot,
            change,
            affection_before: before,
            affection_after: self.affection,
            reply,
        })
    }
}
