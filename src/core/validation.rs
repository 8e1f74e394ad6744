//! Validation support for construction options.

use crate::error::ValidationError;

/// Trait for validating construction inputs.
///
/// Options are validated once when a store is built; a failure aborts the
/// build before any source is read.
///
/// # Examples
///
/// ```rust
/// use preset_config::core::{ConfigOptions, Validate};
///
/// let options = ConfigOptions {
///     env_var: String::new(),
///     ..ConfigOptions::default()
/// };
/// assert!(options.validate().is_err());
/// ```
pub trait Validate {
    /// Validate the value.
    ///
    /// # Errors
    ///
    /// Should return a `ValidationError` describing what validation failed.
    fn validate(&self) -> Result<(), ValidationError>;
}
