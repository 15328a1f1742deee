//! Core traits module
//!
//! Contains the abstract interfaces the engine depends on

pub mod access_api;

pub use access_api::*;
