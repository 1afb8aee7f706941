//! Console Module
//!
//! The interactive command front-end: a stdin reader feeding operator
//! commands into the control channel.

pub mod interactor;

pub use interactor::Console;
