//! Validation Engine
//!
//! Clean separation of rule storage from chain evaluation.

pub mod engine;
pub mod rule;

pub use engine::{Outcome, Validator};
pub use rule::{CheckFuture, Rule};
