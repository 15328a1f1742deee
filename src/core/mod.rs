//! Core engine
//!
//! The permission matrix and the backend trait it is driven through.

pub mod matrix;
pub mod traits;
