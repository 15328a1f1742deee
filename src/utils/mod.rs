//! Utility modules for the synchronization engine
//!
//! ## Module Organization
//!
//! - **error**: Error type and status mapping
//! - **logging**: Global subscriber setup
//! - **net**: HTTP client construction and URL helpers

pub mod error;
pub mod logging;
pub mod net;

pub use error::{Result, SyncError};
pub use logging::init_logging;
pub use net::{ClientUtils, HttpClientConfig};
