//! # Cinder Utils
//!
//! Shared building blocks for the cinder block simulation: seedable random
//! sources and the linear cell addressing used by every world grid.

pub mod random;
pub mod types;

pub use types::{BlockId, Dimensions};
