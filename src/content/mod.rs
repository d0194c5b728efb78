//! Content tables: typed pack, normalization, and built-in defaults.

pub mod defaults;
pub mod pack;

pub use pack::*;
