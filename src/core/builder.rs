//! Builder for constructing Config instances.

use crate::core::loader::PresetLoader;
use crate::core::options::{DEFAULT_ENV_PREFIX, DEFAULT_ENVIRONMENT};
use crate::core::{Config, ConfigOptions, Validate};
use crate::error::Result;
use crate::sources::{ConfigSource, EnvSource, FlagSource};
use std::collections::HashMap;

/// Builder for constructing a [`Config`] store.
///
/// Command-line arguments and environment variables are injected rather than
/// read from the process, so a builder created with [`ConfigBuilder::new`]
/// sees nothing until [`with_args`](ConfigBuilder::with_args) and
/// [`with_vars`](ConfigBuilder::with_vars) are called. Use
/// [`ConfigBuilder::from_process`] to start from the real process inputs.
///
/// # Examples
///
/// ```rust
/// use preset_config::prelude::*;
///
/// # fn example() -> Result<()> {
/// let config = Config::builder()
///     .with_argv_prefix("lb")
///     .with_env_prefix("lbb")
///     .with_args(["--with-lb-a=c", "--enable-b"])
///     .with_vars([("LBB_CUSTOM_TRUE", "YES"), ("APP_ENV", "production")])
///     .build()?;
///
/// assert_eq!(config.get_str("a"), Some("c"));
/// assert!(!config.has("b"));
/// assert!(config.enabled("custom true"));
/// assert_eq!(config.env(), "production");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct ConfigBuilder {
    options: ConfigOptions,
    args: Vec<String>,
    vars: HashMap<String, String>,
    environment: Option<String>,
    custom_sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigBuilder {
    /// Create a new builder with default options and no inputs.
    pub fn new() -> Self {
        Self {
            options: ConfigOptions::default(),
            args: Vec::new(),
            vars: HashMap::new(),
            environment: None,
            custom_sources: Vec::new(),
        }
    }

    /// Create a builder fed with the current process arguments (program name
    /// excluded) and environment variables.
    pub fn from_process() -> Self {
        Self::new()
            .with_args(std::env::args().skip(1))
            .with_vars(crate::sources::process_vars())
    }

    /// Replace all options at once.
    pub fn with_options(mut self, options: ConfigOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the environment variable prefix (`"cfg"` by default).
    ///
    /// An empty prefix falls back to `"cfg"`, so the store never locks
    /// unprefixed variables such as `PATH`. Add an [`EnvSource`] with an empty
    /// prefix through [`with_source`](ConfigBuilder::with_source) to match those.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.env_prefix = prefix.into();
        self
    }

    /// Set the command-line flag infix (empty by default).
    pub fn with_argv_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.argv_prefix = prefix.into();
        self
    }

    /// Enable or disable reading command-line flags.
    pub fn with_argv(mut self, enabled: bool) -> Self {
        self.options.argv = enabled;
        self
    }

    /// Enable or disable reading environment variables.
    pub fn with_env(mut self, enabled: bool) -> Self {
        self.options.env = enabled;
        self
    }

    /// Set the variable holding the active environment name (`"APP_ENV"` by default).
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.options.env_var = name.into();
        self
    }

    /// Set the argument tokens, excluding the program name.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the environment variables.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Force the active environment instead of reading it from the variables.
    pub fn with_environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    /// Add a custom source.
    ///
    /// Its keys are locked like flag and environment keys. Sources merge by
    /// priority: flags are 200, environment variables 300.
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.custom_sources.push(Box::new(source));
        self
    }

    /// Build the store.
    ///
    /// Validates the options, then reads flags (if enabled), environment
    /// variables (if enabled) and custom sources, locking every key they supply.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The options fail validation
    /// - A source fails to load
    pub fn build(self) -> Result<Config> {
        self.options.validate()?;

        let current_env = self
            .environment
            .or_else(|| {
                self.vars
                    .get(&self.options.env_var)
                    .filter(|name| !name.is_empty())
                    .cloned()
            })
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let mut loader = PresetLoader::new();

        if self.options.argv {
            let source = FlagSource::new(self.args, self.options.argv_prefix);
            loader.add_source(Box::new(source));
        }

        if self.options.env {
            let prefix = if self.options.env_prefix.is_empty() {
                DEFAULT_ENV_PREFIX.to_string()
            } else {
                self.options.env_prefix
            };
            let source = EnvSource::new(self.vars, prefix);
            loader.add_source(Box::new(source));
        }

        for source in self.custom_sources {
            loader.add_source(source);
        }

        let presets = loader.load()?;
        let sources = loader.source_names();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            env = %current_env,
            sources = ?sources,
            preset = presets.locked.len(),
            "built configuration store"
        );

        Ok(Config::from_parts(presets, current_env, sources))
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
