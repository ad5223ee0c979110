//! Configuration error types for the sendwithus client.

use thiserror::Error;

use crate::error::SwuError;

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration field is missing.
    #[error("Missing required configuration: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Invalid configuration value or combination.
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Description of the configuration issue.
        message: String,
    },
}

impl From<ConfigError> for SwuError {
    fn from(err: ConfigError) -> Self {
        SwuError::Configuration {
            message: err.to_string(),
        }
    }
}
