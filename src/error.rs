//! Error types for preset-config.

use std::fmt;

/// Result type alias for preset-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when building or configuring a store.
///
/// Parsing flags and environment variables never fails: tokens that do not
/// match the grammar are simply not configuration. Errors come from invalid
/// construction options, from environment blocks that report a failure, or
/// from serializing the store.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Construction options were rejected.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A source grammar could not be compiled.
    #[error("Invalid source pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// An environment block reported a failure.
    #[error("Environment block '{env}' failed: {source}")]
    Block {
        /// Name of the environment the block was registered under
        env: String,
        /// The underlying failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to serialize or extract the configuration.
    #[error("Failed to serialize configuration: {0}")]
    Serialization(String),

    /// Generic error for other cases.
    #[error("Configuration error: {0}")]
    Other(String),
}

impl ConfigError {
    /// Create a block failure for the given environment.
    ///
    /// Environment blocks return this from their body to abort setup; the
    /// registry hands it back to the caller untouched.
    pub fn block(
        env: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Block {
            env: env.into(),
            source: source.into(),
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

/// Validation error for construction options.
#[derive(Debug)]
pub enum ValidationError {
    /// Custom validation error with a message.
    Custom(String),

    /// A specific option has an invalid value.
    InvalidField {
        /// The option name
        field: String,
        /// The reason why it's invalid
        reason: String,
    },

    /// Multiple validation errors occurred.
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create a custom validation error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Collapse a list of errors: `None` when empty, the error itself when
    /// there is exactly one, `Multiple` otherwise.
    pub fn collect(mut errors: Vec<ValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(msg) => write!(f, "{}", msg),
            Self::InvalidField { field, reason } => {
                write!(f, "Option '{}' is invalid: {}", field, reason)
            }
            Self::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for (i, err) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::ValidationError(err.to_string())
    }
}
