//! Integration tests for access-sync
//!
//! These tests drive the public API against a mock administration backend.

pub mod config_tests;
pub mod http_api_tests;
pub mod matrix_session_tests;
