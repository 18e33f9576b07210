//! Practice sessions: building exercise lists and tallying results.

pub mod builder;
pub mod outcome;
pub mod prompts;

pub use builder::{TYPE_CYCLE, build_session, type_distribution};
pub use outcome::{SessionOutcome, SessionTally, answer_xp, session_percentage, stars_for};
