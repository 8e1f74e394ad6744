//! The configuration store.

use crate::core::environments::{EnvBlock, EnvRegistry};
use crate::core::loader::Presets;
use crate::core::options::DEFAULT_ENVIRONMENT;
use crate::core::{ConfigBuilder, ConfigOptions, EnvOptions, Value};
use crate::error::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

#[cfg(feature = "json")]
use serde::de::DeserializeOwned;

/// A flat, mutable key-value configuration store.
///
/// Keys supplied by command-line flags or environment variables when the
/// store is built are *preset*: their value is fixed for the lifetime of the
/// store and every `set`, `unset`, `enable` or `disable` call for them is
/// silently ignored. All other keys are freely writable, so in-code defaults
/// and environment blocks can never override what the operator passed in.
///
/// # Examples
///
/// ```rust
/// use preset_config::prelude::*;
///
/// # fn example() -> Result<()> {
/// let mut config = Config::builder()
///     .with_args(["--with-domain-name=localhost"])
///     .with_vars([("APP_ENV", "production")])
///     .build()?;
///
/// config
///     .set("domain name", "www.example.com")
///     .set("api key", "dev-key")
///     .enable("jquery");
///
/// config.on_env("production", |cfg| {
///     cfg.set("api key", "prod-key");
///     Ok(())
/// })?;
///
/// assert_eq!(config.get_str("domain name"), Some("localhost"));
/// assert_eq!(config.get_str("api key"), Some("prod-key"));
/// assert!(config.enabled("jquery"));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    values: BTreeMap<String, Value>,
    preset: BTreeSet<String>,
    registry: EnvRegistry,
    current_env: String,
    sources: Vec<String>,
}

impl Config {
    /// Create an empty store with no preset keys.
    ///
    /// The active environment is `"development"`. Use [`Config::builder`] to
    /// read flags and environment variables.
    pub fn new() -> Self {
        Self::from_parts(Presets::default(), DEFAULT_ENVIRONMENT.to_string(), Vec::new())
    }

    /// Create a new builder for constructing a store.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Build a store from the current process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid.
    pub fn from_process(options: ConfigOptions) -> Result<Self> {
        ConfigBuilder::from_process().with_options(options).build()
    }

    pub(crate) fn from_parts(presets: Presets, current_env: String, sources: Vec<String>) -> Self {
        Self {
            values: presets.values,
            preset: presets.locked,
            registry: EnvRegistry::new(),
            current_env,
            sources,
        }
    }

    fn locked(&self, key: &str) -> bool {
        let locked = self.preset.contains(key);

        #[cfg(feature = "tracing")]
        if locked {
            tracing::debug!(key = %key, "ignoring change to preset key");
        }

        locked
    }

    /// Set a value unless the key is preset.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        if !self.locked(&key) {
            self.values.insert(key, value.into());
        }
        self
    }

    /// Set several values; each entry is checked against the preset keys on its own.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use preset_config::prelude::*;
    ///
    /// let mut config = Config::new();
    /// config.set_all([("domain name", "www.yahoo.com"), ("api key", "abc")]);
    /// assert_eq!(config.get_str("api key"), Some("abc"));
    /// ```
    pub fn set_all<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
        self
    }

    /// Remove a key unless it is preset.
    pub fn unset(&mut self, key: &str) -> &mut Self {
        if !self.locked(key) {
            self.values.remove(key);
        }
        self
    }

    /// Set a key to `true` unless it is preset.
    pub fn enable(&mut self, key: impl Into<String>) -> &mut Self {
        self.set(key, true)
    }

    /// Set a key to `false` unless it is preset.
    pub fn disable(&mut self, key: impl Into<String>) -> &mut Self {
        self.set(key, false)
    }

    /// Get a value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a string value. Booleans yield `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Get a boolean value. Strings yield `None`; there is no coercion.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// All values currently in the store.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Whether the key is present, whatever its value.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Whether the key holds exactly `true`.
    pub fn enabled(&self, key: &str) -> bool {
        self.get(key).is_some_and(Value::is_true)
    }

    /// Whether the key holds exactly `false`.
    ///
    /// Not the negation of [`Config::enabled`]: both are `false` for absent
    /// keys and string values.
    pub fn disabled(&self, key: &str) -> bool {
        self.get(key).is_some_and(Value::is_false)
    }

    /// Whether the key was locked by an external source.
    pub fn is_preset(&self, key: &str) -> bool {
        self.preset.contains(key)
    }

    /// Names of the sources that fed the preset keys, in merge order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// The active environment name.
    pub fn env(&self) -> &str {
        &self.current_env
    }

    /// Run `f` against this store once, whatever the active environment.
    ///
    /// Nothing is registered.
    ///
    /// # Errors
    ///
    /// Returns whatever error `f` returns.
    pub fn configure<F>(&mut self, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Config) -> Result<()>,
    {
        f(self)?;
        Ok(self)
    }

    /// Register a block for environment `name`, running it now if `name` is
    /// the active environment.
    ///
    /// # Errors
    ///
    /// Returns whatever error the block returns. The block stays registered.
    pub fn on_env<F>(&mut self, name: &str, f: F) -> Result<&mut Self>
    where
        F: Fn(&mut Config) -> Result<()> + Send + Sync + 'static,
    {
        self.on_env_with(name, EnvOptions::default(), f)
    }

    /// Register a block for environment `name` with options.
    ///
    /// When `name` is the active environment and `options.inherits` names a
    /// parent, every block registered so far under the parent runs first, in
    /// registration order, then `f`. Inheritance is a single level and is
    /// resolved now: parent blocks registered later are not replayed.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an inherited block or by `f`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use preset_config::prelude::*;
    ///
    /// # fn example() -> Result<()> {
    /// let mut config = Config::builder().with_environment("stage").build()?;
    ///
    /// config.on_env("production", |cfg| {
    ///     cfg.set("api key", "woot").enable("jquery");
    ///     Ok(())
    /// })?;
    /// config.on_env_with("stage", EnvOptions::inherits("production"), |cfg| {
    ///     cfg.disable("jquery");
    ///     Ok(())
    /// })?;
    ///
    /// assert_eq!(config.get_str("api key"), Some("woot"));
    /// assert!(config.disabled("jquery"));
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    pub fn on_env_with<F>(&mut self, name: &str, options: EnvOptions, f: F) -> Result<&mut Self>
    where
        F: Fn(&mut Config) -> Result<()> + Send + Sync + 'static,
    {
        let block: EnvBlock = Arc::new(f);
        self.registry.register(name, Arc::clone(&block));

        if self.current_env != name {
            return Ok(self);
        }

        if let Some(parent) = options.inherits.as_deref() {
            let inherited = self.registry.blocks(parent);

            #[cfg(feature = "tracing")]
            tracing::debug!(env = %name, parent = %parent, blocks = inherited.len(), "running inherited environment blocks");

            for parent_block in inherited {
                parent_block(self)?;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(env = %name, "running environment block");

        block(self)?;
        Ok(self)
    }

    /// Number of blocks registered under an environment name.
    pub fn registered(&self, name: &str) -> usize {
        self.registry.count(name)
    }

    /// Serialize all values as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.values)?)
    }

    /// Serialize all values as an indented JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[cfg(feature = "json")]
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.values)?)
    }

    /// Deserialize the flat key-value map into a typed struct.
    ///
    /// Keys keep their normalized form, so multi-word keys need a serde rename.
    ///
    /// # Errors
    ///
    /// Returns an error if the values do not fit `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use preset_config::prelude::*;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Site {
    ///     #[serde(rename = "domain name")]
    ///     domain_name: String,
    ///     jquery: bool,
    /// }
    ///
    /// # fn example() -> Result<()> {
    /// let mut config = Config::new();
    /// config.set("domain name", "www.example.com").enable("jquery");
    ///
    /// let site: Site = config.extract()?;
    /// assert_eq!(site.domain_name, "www.example.com");
    /// assert!(site.jquery);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    #[cfg(feature = "json")]
    pub fn extract<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = serde_json::to_value(&self.values)?;
        Ok(serde_json::from_value(value)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn preset(entries: &[(&str, Option<Value>)]) -> Config {
        let mut presets = Presets::default();
        for (key, value) in entries {
            if let Some(value) = value {
                presets.values.insert(key.to_string(), value.clone());
            }
            presets.locked.insert(key.to_string());
        }
        Config::from_parts(presets, "development".to_string(), vec!["test".to_string()])
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::new();
        config.set("a", "b").set("b", "c");

        assert_eq!(config.get("a"), Some(&Value::from("b")));
        assert_eq!(config.get_str("b"), Some("c"));
        assert!(config.has("a"));
        assert_eq!(config.get("missing"), None);
    }

    #[test]
    fn test_unset() {
        let mut config = Config::new();
        config.set("a", "b").unset("a");

        assert_eq!(config.get("a"), None);
        assert!(!config.has("a"));
        assert!(!config.values().contains_key("a"));
    }

    #[test]
    fn test_has_is_presence_not_truthiness() {
        let mut config = Config::new();
        config.set("a", "b").enable("c").disable("d").set("b", "c").unset("b");

        assert!(config.has("a"));
        assert!(config.has("c"));
        assert!(config.has("d"));
        assert!(!config.has("b"));
    }

    #[test]
    fn test_enabled_and_disabled() {
        let mut config = Config::new();
        config.enable("a").disable("b").set("c", "x");

        assert!(config.enabled("a"));
        assert!(!config.enabled("b"));
        assert!(!config.disabled("a"));
        assert!(config.disabled("b"));

        // Not complements
        assert!(!config.enabled("c"));
        assert!(!config.disabled("c"));
        assert!(!config.enabled("missing"));
        assert!(!config.disabled("missing"));
    }

    #[test]
    fn test_get_bool_does_not_coerce() {
        let mut config = Config::new();
        config.set("a", "true").enable("b");

        assert_eq!(config.get_bool("a"), None);
        assert_eq!(config.get_bool("b"), Some(true));
        assert_eq!(config.get_str("b"), None);
    }

    #[test]
    fn test_preset_keys_are_locked() {
        let mut config = preset(&[("a", Some(Value::from("c"))), ("woot", Some(Value::from(false)))]);

        config.set("a", "b").unset("a").enable("woot");
        config.set_all([("a", "x"), ("fresh", "y")]);

        assert_eq!(config.get_str("a"), Some("c"));
        assert!(config.disabled("woot"));
        assert_eq!(config.get_str("fresh"), Some("y"));
        assert!(config.is_preset("a"));
        assert!(!config.is_preset("fresh"));
    }

    #[test]
    fn test_claimed_key_stays_absent() {
        let mut config = preset(&[("a", None)]);
        config.set("a", "b");

        assert!(!config.has("a"));
        assert!(config.is_preset("a"));
    }

    #[test]
    fn test_default_environment() {
        let config = Config::new();
        assert_eq!(config.env(), "development");
        assert!(config.sources().is_empty());
    }

    #[test]
    fn test_configure_runs_once() {
        let mut config = Config::new();
        config
            .configure(|cfg| {
                cfg.set("a", "woot");
                Ok(())
            })
            .unwrap();

        assert_eq!(config.get_str("a"), Some("woot"));
        assert_eq!(config.registered("development"), 0);
    }

    #[test]
    fn test_on_env_matching() {
        let mut config = Config::new();
        config
            .on_env("development", |cfg| {
                cfg.set("woot woot", "woot");
                Ok(())
            })
            .unwrap();

        assert_eq!(config.get_str("woot woot"), Some("woot"));
        assert_eq!(config.registered("development"), 1);
    }

    #[test]
    fn test_on_env_not_matching() {
        let mut config = Config::new();
        config
            .on_env("production", |cfg| {
                cfg.set("b", "c");
                Ok(())
            })
            .unwrap();

        assert!(!config.has("b"));
        assert_eq!(config.registered("production"), 1);
    }

    #[test]
    fn test_inheritance() {
        let mut config = Config::new();
        config
            .on_env("woot", |cfg| {
                cfg.enable("a").set("b", "c");
                Ok(())
            })
            .unwrap()
            .on_env_with("development", EnvOptions::inherits("woot"), |cfg| {
                cfg.set("b", "d");
                Ok(())
            })
            .unwrap();

        assert!(config.enabled("a"));
        assert_eq!(config.get_str("b"), Some("d"));
    }

    #[test]
    fn test_inheriting_unknown_parent_is_noop() {
        let mut config = Config::new();
        config
            .on_env_with("development", EnvOptions::inherits("nowhere"), |cfg| {
                cfg.set("a", "b");
                Ok(())
            })
            .unwrap();

        assert_eq!(config.values().len(), 1);
    }

    #[test]
    fn test_block_error_propagates() {
        let mut config = Config::new();
        let err = config
            .on_env("development", |cfg| {
                cfg.set("before", "yes");
                Err(ConfigError::block("development", "missing api key"))
            })
            .unwrap_err();

        assert!(matches!(err, ConfigError::Block { ref env, .. } if env == "development"));
        assert_eq!(config.get_str("before"), Some("yes"));
        assert_eq!(config.registered("development"), 1);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_to_json() {
        let mut config = Config::new();
        config.set("a", "b").enable("woot").disable("manny");

        assert_eq!(
            config.to_json().unwrap(),
            r#"{"a":"b","manny":false,"woot":true}"#
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_extract_mismatch_is_error() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Flags {
            woot: bool,
        }

        let mut config = Config::new();
        config.set("woot", "YES");

        let err = config.extract::<Flags>().unwrap_err();
        assert!(matches!(err, ConfigError::Serialization(_)));
    }
}
