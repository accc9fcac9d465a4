//! Domain layer types and invariants.

pub mod age;
pub mod clock;
pub mod entities;
pub mod error;
pub mod types;
pub mod validation;
