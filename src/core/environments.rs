//! Registry of environment-scoped configuration blocks.

use crate::core::Config;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// A registered environment block.
pub(crate) type EnvBlock = Arc<dyn Fn(&mut Config) -> Result<()> + Send + Sync>;

/// Options for registering an environment block.
///
/// # Examples
///
/// ```rust
/// use preset_config::core::EnvOptions;
///
/// let options = EnvOptions::inherits("production");
/// assert_eq!(options.inherits.as_deref(), Some("production"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOptions {
    /// Environment whose blocks run before this one.
    pub inherits: Option<String>,
}

impl EnvOptions {
    /// Inherit every block registered so far under `parent`.
    pub fn inherits(parent: impl Into<String>) -> Self {
        Self {
            inherits: Some(parent.into()),
        }
    }
}

/// Blocks recorded per environment name, in registration order.
#[derive(Default, Clone)]
pub(crate) struct EnvRegistry {
    blocks: HashMap<String, Vec<EnvBlock>>,
}

impl EnvRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block under `name`.
    pub fn register(&mut self, name: &str, block: EnvBlock) {
        self.blocks.entry(name.to_string()).or_default().push(block);
    }

    /// Snapshot of the blocks registered under `name`.
    ///
    /// Returned by value so callers can run them against the store that owns
    /// this registry.
    pub fn blocks(&self, name: &str) -> Vec<EnvBlock> {
        self.blocks.get(name).cloned().unwrap_or_default()
    }

    /// Number of blocks registered under `name`.
    pub fn count(&self, name: &str) -> usize {
        self.blocks.get(name).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EnvRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(&String, usize)> =
            self.blocks.iter().map(|(name, blocks)| (name, blocks.len())).collect();
        counts.sort();
        f.debug_map().entries(counts).finish()
    }
}
