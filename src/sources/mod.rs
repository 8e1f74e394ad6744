//! Configuration source implementations.

mod config_source;
mod env;
mod flags;

pub use config_source::{ConfigSource, SourceMap};
pub use env::EnvSource;
pub use flags::FlagSource;

pub(crate) use env::process_vars;
