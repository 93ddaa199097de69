use serde::{Deserialize, Serialize};
use std::fmt;

/// What the companion is doing at a given hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityState {
    Sleeping,
    Commuting,
    WorkingHigh,
    Lunch,
    WorkingOut,
    Resting,
    Free,
}

impl ActivityState {
    /// Busy states answer with a short brush-off instead of a conversation.
    pub fn is_busy(&self) -> bool {
        matches!(self, ActivityState::WorkingHigh | ActivityState::WorkingOut)
    }

    /// States in which a long message costs affection.
    pub fn penalises_long_messages(&self) -> bool {
        self.is_busy() || *self == ActivityState::Sleeping
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityState::Sleeping => write!(f, "sleeping"),
            ActivityState::Commuting => write!(f, "commuting"),
            ActivityState::WorkingHigh => write!(f, "working_high"),
            ActivityState::Lunch => write!(f, "lunch"),
            ActivityState::WorkingOut => write!(f, "working_out"),
            ActivityState::Resting => write!(f, "resting"),
            ActivityState::Free => write!(f, "free"),
        }
    }
}

/// One row of the daily routine: a half-open hour range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleSlot {
    pub start: u32,
    pub end: u32,
    pub state: ActivityState,
    pub description: &'static str,
}

impl ScheduleSlot {
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }
}

/// The daily routine, contiguous and exhaustive over `[0, 24)`.
pub static DAILY_SCHEDULE: [ScheduleSlot; 8] = [
    ScheduleSlot { start: 0, end: 7, state: ActivityState::Sleeping, description: "惠貞已就寢 (離線)" },
    ScheduleSlot { start: 7, end: 8, state: ActivityState::Commuting, description: "通勤中" },
    ScheduleSlot { start: 8, end: 12, state: ActivityState::WorkingHigh, description: "工作中 (忙碌)" },
    ScheduleSlot { start: 12, end: 13, state: ActivityState::Lunch, description: "午休時間" },
    ScheduleSlot { start: 13, end: 18, state: ActivityState::WorkingOut, description: "外訪/開會中" },
    ScheduleSlot { start: 18, end: 20, state: ActivityState::Resting, description: "下班休息 (能量低)" },
    ScheduleSlot { start: 20, end: 23, state: ActivityState::Free, description: "空閒 (黃金交流期)" },
    ScheduleSlot { start: 23, end: 24, state: ActivityState::Sleeping, description: "準備就寢" },
];

/// Look up the slot for an hour. Anything past the table lands in the last
/// slot, so the lookup is total.
pub fn resolve(hour: u32) -> &'static ScheduleSlot {
    DAILY_SCHEDULE
        .iter()
        .find(|slot| slot.contains(hour))
        .unwrap_or(&DAILY_SCHEDULE[DAILY_SCHEDULE.len() - 1])
}
