//! Synthetic market/portfolio data model and its per-tick regeneration.

pub mod regenerate;
pub mod seed;
pub mod types;

pub use regenerate::{regenerate, FixedSequence, RandomSource};
pub use seed::seed_snapshot;
pub use types::*;
