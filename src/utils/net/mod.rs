//! Network utilities
//!
//! This module provides HTTP client construction and URL helpers.

pub mod client;

pub use client::{ClientUtils, HttpClientConfig};
