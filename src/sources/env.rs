//! Environment variable configuration source.

use super::{ConfigSource, SourceMap};
use crate::core::Value;
use crate::error::Result;
use regex::Regex;
use std::collections::HashMap;

/// Environment variable configuration source.
///
/// Matches variables named `<PREFIX>_<KEY>` where the prefix is upper-cased
/// and `<KEY>` contains no lowercase ASCII letters. Keys are normalized by
/// turning `_` into spaces and lower-casing. The literal values `YES` and `NO`
/// become booleans; anything else is kept as a string.
///
/// # Examples
///
/// ```rust
/// use preset_config::core::Value;
/// use preset_config::sources::{ConfigSource, EnvSource};
///
/// // CFG_WOOT_WOOT=NO -> "woot woot" = false
/// let source = EnvSource::new([("CFG_WOOT_WOOT", "NO"), ("HOME", "/root")], "cfg");
/// let map = source.load().unwrap();
///
/// assert_eq!(map["woot woot"], Some(Value::from(false)));
/// assert_eq!(map.len(), 1);
/// ```
pub struct EnvSource {
    vars: HashMap<String, String>,
    prefix: String,
    priority: i32,
}

impl EnvSource {
    /// Create a new environment variable source.
    ///
    /// # Arguments
    ///
    /// * `vars` - Variable names and values to match against
    /// * `prefix` - Prefix for environment variables (e.g., "cfg" for `CFG_KEY`); empty for none
    pub fn new<I, K, V>(vars: I, prefix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            prefix: prefix.into(),
            priority: 300, // Env vars have highest priority by default
        }
    }

    /// Create an environment source over the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process(prefix: impl Into<String>) -> Self {
        Self::new(process_vars(), prefix)
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn pattern(&self) -> Result<Regex> {
        let prefix = if self.prefix.is_empty() {
            String::new()
        } else {
            format!("{}_", regex::escape(&self.prefix.to_uppercase()))
        };
        let pattern = format!("^{}([^a-z]+)$", prefix);
        Ok(Regex::new(&pattern)?)
    }
}

/// The process environment as UTF-8 pairs.
pub(crate) fn process_vars() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// Normalize an environment key: underscores become spaces, then lower-case.
pub(crate) fn env_key(raw: &str) -> String {
    raw.replace('_', " ").to_lowercase()
}

/// Coerce `YES`/`NO` to booleans, keep everything else verbatim.
pub(crate) fn env_value(raw: &str) -> Value {
    match raw {
        "YES" => Value::Bool(true),
        "NO" => Value::Bool(false),
        other => Value::from(other),
    }
}

impl ConfigSource for EnvSource {
    fn load(&self) -> Result<SourceMap> {
        let pattern = self.pattern()?;
        let mut options = SourceMap::new();

        for (name, raw) in &self.vars {
            let Some(caps) = pattern.captures(name) else {
                continue;
            };

            let key = env_key(&caps[1]);

            #[cfg(feature = "tracing")]
            tracing::trace!(var = %name, key = %key, "matched environment variable");

            options.insert(key, Some(env_value(raw)));
        }

        Ok(options)
    }

    fn name(&self) -> String {
        if self.prefix.is_empty() {
            "env".to_string()
        } else {
            format!("env:{}_*", self.prefix.to_uppercase())
        }
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
