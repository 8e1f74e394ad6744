//! # preset-config
//!
//! A small runtime configuration store that merges in-code defaults,
//! command-line flags and environment variables, with environment-scoped
//! override blocks.
//!
//! ## Overview
//!
//! `preset-config` keeps one flat namespace of keys to values:
//! - Command-line flags (`--with-key=value`, `--enable-key`, `--disable-key`)
//! - Environment variables (`CFG_KEY=value`, with `YES`/`NO` as booleans)
//! - In-code defaults set through `set`/`enable`/`disable`
//! - Blocks that only run in a named environment, with single-level inheritance
//!
//! Keys that come from flags or environment variables are *preset*: they are
//! locked when the store is built, so neither defaults nor environment blocks
//! can override what the operator supplied.
//!
//! The active environment is read from `APP_ENV` (not `NODE_ENV`); set
//! `ConfigOptions::env_var` to read another variable. It defaults to
//! `"development"`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use preset_config::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let mut config = Config::from_process(ConfigOptions::default())?;
//!
//! config
//!     .set("domain name", "www.example.com")
//!     .set("api key", "development-key")
//!     .enable("jquery");
//!
//! config.on_env("production", |cfg| {
//!     cfg.set("domain name", "www.production.com");
//!     cfg.set("api key", "woot");
//!     Ok(())
//! })?;
//!
//! config.on_env_with("stage", EnvOptions::inherits("production"), |cfg| {
//!     cfg.set("api key", "wooooo").disable("jquery");
//!     Ok(())
//! })?;
//!
//! println!("{}", config.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `json` (default): `to_json`, `to_json_pretty` and typed `extract`
//! - `tracing`: debug events for source merges, ignored writes and block runs

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{Config, ConfigBuilder, ConfigOptions, EnvOptions, Value};
    pub use crate::error::{ConfigError, Result, ValidationError};
}
