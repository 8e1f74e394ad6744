//! Command-line flag configuration source.

use super::{ConfigSource, SourceMap};
use crate::core::Value;
use crate::error::Result;
use regex::Regex;

/// Command-line flag configuration source.
///
/// Recognizes three verbs, optionally infixed with a prefix:
///
/// - `--with-<key>=<value>` sets `key` to the raw string `value`
/// - `--enable-<key>` sets `key` to `true`
/// - `--disable-<key>` sets `key` to `false`
///
/// Keys are normalized by turning `-` into spaces and lower-casing, so
/// `--enable-Tobi-Tobi` yields the key `"tobi tobi"`. Tokens that do not
/// match are ignored, and later tokens win over earlier ones.
///
/// # Examples
///
/// ```rust
/// use preset_config::core::Value;
/// use preset_config::sources::{ConfigSource, FlagSource};
///
/// let source = FlagSource::new(["--with-a=c", "--disable-woot", "serve"], "");
/// let map = source.load().unwrap();
///
/// assert_eq!(map["a"], Some(Value::from("c")));
/// assert_eq!(map["woot"], Some(Value::from(false)));
/// assert_eq!(map.len(), 2);
/// ```
pub struct FlagSource {
    args: Vec<String>,
    prefix: String,
    priority: i32,
}

impl FlagSource {
    /// Create a new flag source over the given tokens.
    ///
    /// # Arguments
    ///
    /// * `args` - Argument tokens, excluding the program name
    /// * `prefix` - Optional infix (e.g., `"lb"` for `--with-lb-key=value`); empty for none
    pub fn new<I, S>(args: I, prefix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            prefix: prefix.into(),
            priority: 200,
        }
    }

    /// Create a flag source over the current process arguments.
    pub fn from_process(prefix: impl Into<String>) -> Self {
        Self::new(std::env::args().skip(1), prefix)
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
            format!("{}-", regex::escape(&self.prefix))
        };
        let pattern = format!("^--(with|disable|enable)-{}([^=]+)(?:=(.+))?$", prefix);
        Ok(Regex::new(&pattern)?)
    }
}

/// Normalize a flag key: dashes become spaces, then lower-case.
pub(crate) fn flag_key(raw: &str) -> String {
    raw.replace('-', " ").to_lowercase()
}

impl ConfigSource for FlagSource {
    fn load(&self) -> Result<SourceMap> {
        let pattern = self.pattern()?;
        let mut options = SourceMap::new();

        for arg in &self.args {
            let Some(caps) = pattern.captures(arg) else {
                continue;
            };

            let key = flag_key(&caps[2]);
            let value = match &caps[1] {
                "with" => caps.get(3).map(|m| Value::from(m.as_str())),
                "disable" => Some(Value::Bool(false)),
                _ => Some(Value::Bool(true)),
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(flag = %arg, key = %key, "matched command-line flag");

            options.insert(key, value);
        }

        Ok(options)
    }

    fn name(&self) -> String {
        if self.prefix.is_empty() {
            "argv".to_string()
        } else {
            format!("argv:{}-*", self.prefix)
        }
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
