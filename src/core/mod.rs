//! Core Module
//!
//! Shared foundations for the host process:
//! - Error taxonomy
//! - Common types and options bags
//! - Logging initialization

pub mod error;
pub mod logging;
pub mod options;
pub mod types;

pub use error::{Error, Result};
pub use options::SessionOptions;
pub use types::{bool_option, now, string_option, OptionsMap, Timestamp};
