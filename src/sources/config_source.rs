//! Configuration source trait.

use crate::core::Value;
use crate::error::Result;
use std::collections::HashMap;

/// Keys produced by a source.
///
/// `None` means the source claimed the key without giving it a value
/// (e.g. `--with-key` with no `=value`): the key is still locked, but stays
/// absent from the store, so `Config::has` reports `false` for it. This
/// differs from the node `cfg` module, where such a key is present with an
/// undefined value and `has` reports `true`.
pub type SourceMap = HashMap<String, Option<Value>>;

/// Trait for external configuration sources.
///
/// Every key a source returns becomes a preset key when the store is built:
/// its value is fixed and later `set`/`unset`/`enable`/`disable` calls for it
/// are ignored.
///
/// Implement this trait to feed additional external inputs into the store.
pub trait ConfigSource: Send + Sync {
    /// Load the source as a flat key-value map.
    ///
    /// # Errors
    ///
    /// Returns an error if the source grammar cannot be prepared.
    fn load(&self) -> Result<SourceMap>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// Get the priority of this source (higher = takes precedence).
    ///
    /// Default priorities:
    /// - Environment variables: 300
    /// - Command-line flags: 200
    /// - Custom sources: 100
    fn priority(&self) -> i32 {
        100
    }
}
