//! Items: the loot pipeline from rarity roll to equipped effect.

pub mod equipment;
pub mod loot;
pub mod names;
pub mod types;

pub use equipment::*;
pub use loot::*;
pub use types::*;
