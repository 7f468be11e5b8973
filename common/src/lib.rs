mod catalog;
mod submission;

pub use catalog::*;
pub use submission::*;

/// Player name recorded when a score arrives without a session.
pub const ANONYMOUS_PLAYER: &str = "Anonymous";
