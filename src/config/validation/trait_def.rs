//! Validation trait definition

/// Validation trait for configuration sections
///
/// Errors are plain messages; [`Config::validate`](crate::config::Config::validate)
/// wraps them with the section name.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
