//! Loader that merges external sources into preset keys.

use crate::core::Value;
use crate::error::Result;
use crate::sources::ConfigSource;
use std::collections::{BTreeMap, BTreeSet};

/// The outcome of loading every external source.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Presets {
    /// Values supplied by the sources.
    pub values: BTreeMap<String, Value>,
    /// Every key any source claimed, with or without a value.
    pub locked: BTreeSet<String>,
}

/// Loads and merges external sources into preset keys.
///
/// Sources are merged in priority order (lowest first, stable for ties), so a
/// higher priority source replaces the value of a key a lower one supplied.
/// Every key any source returns ends up locked.
pub(crate) struct PresetLoader {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl PresetLoader {
    /// Create a new loader with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) {
        self.sources.push(source);
    }

    /// Load and merge all sources.
    ///
    /// A key claimed without a value removes any value a lower priority
    /// source gave it, but stays locked.
    ///
    /// # Errors
    ///
    /// Returns an error if any source fails to load.
    pub fn load(&self) -> Result<Presets> {
        let mut presets = Presets::default();

        for source in self.sorted() {
            let map = source.load()?;

            #[cfg(feature = "tracing")]
            tracing::debug!(source = %source.name(), keys = map.len(), "merged preset source");

            for (key, value) in map {
                match value {
                    Some(value) => {
                        presets.values.insert(key.clone(), value);
                    }
                    None => {
                        presets.values.remove(&key);
                    }
                }
                presets.locked.insert(key);
            }
        }

        Ok(presets)
    }

    /// Get the list of source names in merge order.
    pub fn source_names(&self) -> Vec<String> {
        self.sorted().iter().map(|s| s.name()).collect()
    }

    fn sorted(&self) -> Vec<&dyn ConfigSource> {
        let mut sorted: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| s.as_ref()).collect();
        sorted.sort_by_key(|s| s.priority());
        sorted
    }
}

impl Default for PresetLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{EnvSource, FlagSource, SourceMap};

    struct MockSource {
        name: String,
        priority: i32,
        values: SourceMap,
    }

    impl MockSource {
        fn new(name: &str, priority: i32) -> Self {
            Self {
                name: name.to_string(),
                priority,
                values: SourceMap::new(),
            }
        }

        fn with_value(mut self, key: &str, value: impl Into<Value>) -> Self {
            self.values.insert(key.to_string(), Some(value.into()));
            self
        }

        fn with_claim(mut self, key: &str) -> Self {
            self.values.insert(key.to_string(), None);
            self
        }
    }

    impl ConfigSource for MockSource {
        fn load(&self) -> Result<SourceMap> {
            Ok(self.values.clone())
        }

        fn name(&self) -> String {
            self.name.clone()
        }

        fn priority(&self) -> i32 {
            self.priority
        }
    }

    #[test]
    fn test_empty_loader() {
        let presets = PresetLoader::new().load().unwrap();
        assert!(presets.values.is_empty());
        assert!(presets.locked.is_empty());
    }

    #[test]
    fn test_precedence() {
        let mut loader = PresetLoader::new();
        loader.add_source(Box::new(
            MockSource::new("high", 300).with_value("port", "9090"),
        ));
        loader.add_source(Box::new(
            MockSource::new("low", 100)
                .with_value("port", "8080")
                .with_value("host", "localhost"),
        ));

        let presets = loader.load().unwrap();
        assert_eq!(presets.values["port"], Value::from("9090"));
        assert_eq!(presets.values["host"], Value::from("localhost"));
        assert_eq!(presets.locked.len(), 2);
    }

    #[test]
    fn test_env_wins_over_flags() {
        let mut loader = PresetLoader::new();
        loader.add_source(Box::new(EnvSource::new([("CFG_A", "env")], "cfg")));
        loader.add_source(Box::new(FlagSource::new(["--with-a=flag", "--enable-b"], "")));

        let presets = loader.load().unwrap();
        assert_eq!(presets.values["a"], Value::from("env"));
        assert_eq!(presets.values["b"], Value::from(true));
    }

    #[test]
    fn test_claim_without_value_locks_and_clears() {
        let mut loader = PresetLoader::new();
        loader.add_source(Box::new(MockSource::new("low", 100).with_value("a", "b")));
        loader.add_source(Box::new(MockSource::new("high", 200).with_claim("a")));

        let presets = loader.load().unwrap();
        assert!(!presets.values.contains_key("a"));
        assert!(presets.locked.contains("a"));
    }

    #[test]
    fn test_source_names() {
        let mut loader = PresetLoader::new();
        loader.add_source(Box::new(MockSource::new("source1", 100)));
        loader.add_source(Box::new(MockSource::new("source2", 200)));
        loader.add_source(Box::new(MockSource::new("source3", 50)));
        loader.add_source(Box::new(MockSource::new("source4", 100)));

        // Sorted by priority, insertion order for ties
        assert_eq!(
            loader.source_names(),
            vec!["source3", "source1", "source4", "source2"]
        );
    }
}
