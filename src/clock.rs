use chrono::{Local, Timelike};

use crate::core::CompanionError;

/// Where the current hour comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(u32),
}

impl Clock {
    /// A CLI `--hour` beats the config's `fixed_hour`; neither means local time.
    pub fn pick(cli_hour: Option<u32>, config_hour: Option<u32>) -> Result<Self, CompanionError> {
        match cli_hour.or(config_hour) {
            Some(hour) if hour > 23 => Err(CompanionError::InvalidHour(hour)),
            Some(hour) => Ok(Clock::Fixed(hour)),
            None => Ok(Clock::System),
        }
    }

    pub fn hour(&self) -> u32 {
        match self {
            Clock::System => Local::now().hour(),
            Clock::Fixed(hour) => *hour,
        }
    }

    /// `HH:MM` for the status panel.
    pub fn display(&self) -> String {
        match self {
            Clock::System => Local::now().format("%H:%M").to_string(),
            Clock::Fixed(hour) => format!("{:02}:00", hour),
        }
    }
}
