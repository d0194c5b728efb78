//! Replay recording and the score-submission boundary.

pub mod log;
pub mod submission;

pub use log::*;
pub use submission::*;
