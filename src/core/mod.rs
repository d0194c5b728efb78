//! Core simulation: RNG, run state machine, modifiers, and the session API.

pub mod constants;
pub mod modifiers;
pub mod rng;
pub mod run_state;
pub mod session;

pub use constants::*;
pub use modifiers::*;
pub use rng::*;
pub use run_state::*;
pub use session::*;
