//! Services module
//!
//! This module contains the clients the engine uses to reach external systems

pub mod access_api;

pub use access_api::HttpAccessApi;
