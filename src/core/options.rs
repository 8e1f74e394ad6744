//! Construction options for a configuration store.

use crate::core::Validate;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "cfg";

/// Default variable holding the active environment name.
pub const DEFAULT_ENV_VAR: &str = "APP_ENV";

/// Active environment used when none is supplied.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Options recognized when building a store.
///
/// # Examples
///
/// ```rust
/// use preset_config::core::ConfigOptions;
///
/// let options = ConfigOptions {
///     argv_prefix: "lb".to_string(),
///     env: false,
///     ..ConfigOptions::default()
/// };
/// assert_eq!(options.env_prefix, "cfg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOptions {
    /// Prefix for environment variables, upper-cased when matching (`cfg` matches `CFG_*`).
    ///
    /// An empty prefix is treated as the default when the store is built.
    pub env_prefix: String,
    /// Infix for command-line flags (`lb` matches `--with-lb-*`).
    pub argv_prefix: String,
    /// Whether to read command-line flags.
    pub argv: bool,
    /// Whether to read environment variables.
    pub env: bool,
    /// Variable holding the active environment name (`APP_ENV`, not `NODE_ENV`).
    pub env_var: String,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            argv_prefix: String::new(),
            argv: true,
            env: true,
            env_var: DEFAULT_ENV_VAR.to_string(),
        }
    }
}

fn check_prefix(field: &str, prefix: &str, errors: &mut Vec<ValidationError>) {
    if prefix.contains('=') {
        errors.push(ValidationError::invalid_field(field, "must not contain '='"));
    }
    if prefix.chars().any(|c| c.is_whitespace() || c == '\0') {
        errors.push(ValidationError::invalid_field(
            field,
            "must not contain whitespace or NUL",
        ));
    }
}

impl Validate for ConfigOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        check_prefix("env_prefix", &self.env_prefix, &mut errors);
        check_prefix("argv_prefix", &self.argv_prefix, &mut errors);

        if self.argv_prefix.starts_with('-') {
            errors.push(ValidationError::invalid_field(
                "argv_prefix",
                "must not start with '-'",
            ));
        }

        if self.env_var.is_empty() {
            errors.push(ValidationError::invalid_field("env_var", "must not be empty"));
        }

        match ValidationError::collect(errors) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
