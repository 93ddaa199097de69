pub mod affection;
pub mod error;
pub mod mood;
pub mod profile;
pub mod response;
pub mod rng;
pub mod schedule;
pub mod session;
pub mod view;

pub use affection::{compute_delta, Affection, AffectionChange, Feedback};
pub use error::{CompanionError, Result};
pub use mood::Mood;
pub use profile::{Profile, HUIZHEN, NEWS};
pub use response::{generate, Reply};
pub use rng::{RandomSource, SessionRandom};
pub use schedule::{resolve, ActivityState, ScheduleSlot, DAILY_SCHEDULE};
pub use session::{ChatEntry, ImageHandle, Session, Speaker, Turn};
pub use view::{SessionView, Standing};
