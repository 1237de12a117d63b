//! Error types for the landing-crew CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! The cache, parser and writer never return these across their public
//! operations; they are raised by the pipeline driver and the commands.

use crate::agent::Role;
use crate::exit_codes;
use thiserror::Error;

/// Main error type for landing-crew operations.
#[derive(Error, Debug)]
pub enum CrewError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The agent runtime failed to produce a result.
    #[error("Agent failed: {0}")]
    AgentError(String),

    /// A stage needs the previous stage's output and the cache has none.
    #[error(
        "no cached output for {0}; run the {0} stage first (`landing-crew run`)"
    )]
    MissingUpstreamOutput(Role),

    /// The topic cache could not be written or verified.
    #[error("Cache failure: {0}")]
    CacheError(String),

    /// Generated files could not be written.
    #[error("Write failed: {0}")]
    WriteError(String),
}

impl CrewError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CrewError::UserError(_) => exit_codes::USER_ERROR,
            CrewError::AgentError(_) => exit_codes::AGENT_FAILURE,
            CrewError::MissingUpstreamOutput(_) => exit_codes::MISSING_UPSTREAM,
            CrewError::CacheError(_) => exit_codes::CACHE_FAILURE,
            CrewError::WriteError(_) => exit_codes::WRITE_FAILURE,
        }
    }
}

/// Result type alias for landing-crew operations.
pub type Result<T> = std::result::Result<T, CrewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = CrewError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn agent_error_has_correct_exit_code() {
        let err = CrewError::AgentError("timed out".to_string());
        assert_eq!(err.exit_code(), exit_codes::AGENT_FAILURE);
    }

    #[test]
    fn missing_upstream_has_correct_exit_code() {
        let err = CrewError::MissingUpstreamOutput(Role::UiUxDesigner);
        assert_eq!(err.exit_code(), exit_codes::MISSING_UPSTREAM);
    }

    #[test]
    fn cache_and_write_errors_have_distinct_codes() {
        let cache = CrewError::CacheError("verify failed".to_string());
        let write = CrewError::WriteError("permission denied".to_string());
        assert_eq!(cache.exit_code(), exit_codes::CACHE_FAILURE);
        assert_eq!(write.exit_code(), exit_codes::WRITE_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = CrewError::MissingUpstreamOutput(Role::ProductManager);
        assert_eq!(
            err.to_string(),
            "no cached output for product_manager; run the product_manager stage first (`landing-crew run`)"
        );

        let err = CrewError::AgentError("exit code 1".to_string());
        assert_eq!(err.to_string(), "Agent failed: exit code 1");
    }
}
