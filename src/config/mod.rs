//! Configuration model for kiln.
//!
//! This module defines the Config struct that represents `kiln.yaml` at the
//! project root. It supports forward-compatible YAML parsing (unknown fields
//! are ignored), sensible defaults for every field, and validation of config
//! values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::{
    BuildConfig, DevConfig, EngineConfig, Mode, PreflightConfig, ResolveConfig, ToolRequirement,
};
