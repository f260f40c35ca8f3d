//! Error types for relief pattern generation

use thiserror::Error;

/// Errors that can occur while generating a relief pattern
///
/// Every variant is raised before any pixel work begins, so a failed
/// request never leaves a partially written image behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    /// Configuration validation failed
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        /// Name of the offending option
        field: &'static str,
        /// The rejected value, formatted for display
        value: String,
        /// What the option requires
        reason: String,
    },
    /// The planar partition could not be built from the seed points
    #[error("generation failed: {0}")]
    GenerationFailed(String),
}

impl PatternError {
    pub(crate) fn invalid(
        field: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        PatternError::InvalidConfig {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for relief pattern operations
pub type Result<T> = std::result::Result<T, PatternError>;
