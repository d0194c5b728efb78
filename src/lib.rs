//! Descent - deterministic roguelike run-simulation engine.
//!
//! The crate simulates "descend, loot, decide whether to push deeper or
//! exit" runs with bit-reproducible results: given a seed and an ordered
//! list of player decisions, two simulations produce identical replay logs,
//! identical items, and identical scores. A validating server replays the
//! log against the same seed to confirm a submitted score is reachable.

pub mod content;
pub mod core;
pub mod items;
pub mod replay;

pub use crate::content::pack::ContentPack;
pub use crate::core::rng::GameRng;
pub use crate::core::run_state::{HazardKind, MilestoneChoice, Phase, RunState};
pub use crate::core::session::{ChoiceError, RoomView, RunSession, TurnOutcome};
pub use crate::items::types::Item;
pub use crate::replay::log::{ReplayEntry, ReplayRecorder};
pub use crate::replay::submission::{daily_seed, ScoreSubmission};
