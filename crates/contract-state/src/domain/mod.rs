//! # Domain Layer (Inner Hexagon)
//!
//! Pure logic for contract lifecycle tracking: value shapes, the numeric
//! normalizer, the state reducer, and invariant checks.
//! NO I/O, NO callbacks, NO external collaborators.

pub mod entities;
pub mod invariants;
pub mod normalize;
pub mod reducer;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use normalize::*;
pub use reducer::*;
pub use value_objects::*;
