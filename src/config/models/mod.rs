//! Configuration data models
//!
//! This module defines all configuration structures used throughout the crate.

#![allow(missing_docs)]

pub mod api;
pub mod classifier;
pub mod logging;
pub mod matrix;

// Re-export all configuration types
pub use api::*;
pub use classifier::*;
pub use logging::*;
pub use matrix::*;

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}
