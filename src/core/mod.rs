//! Core configuration store types.

mod builder;
mod environments;
mod loader;
mod options;
mod store;
mod validation;
mod value;

pub use builder::ConfigBuilder;
pub use environments::EnvOptions;
pub use options::{ConfigOptions, DEFAULT_ENV_PREFIX, DEFAULT_ENV_VAR, DEFAULT_ENVIRONMENT};
pub use store::Config;
pub use validation::Validate;
pub use value::Value;
