//! Common test utilities for access-sync
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{MockBackend, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let backend = MockBackend::start().await;
//!     backend.mount_catalogs(&fixtures::assignments()).await;
//!     let api = backend.client(Some("token"));
//!     // ...
//! }
//! ```

pub mod backend;
pub mod fixtures;

pub use backend::MockBackend;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
