//! Config Module
//!
//! The consumption surface of the declarative configuration language:
//! an evaluator trait plus a programmatic implementation.

pub mod evaluator;

pub use evaluator::{ConfigEvaluator, NullEvaluator, ProgramEvaluator};
