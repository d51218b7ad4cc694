//! Build descriptor data model for kiln.
//!
//! A `BuildDescriptor` is the environment-independent picture of a build:
//! entry points, output templates, resolution rules, and module rules. An
//! `EnvironmentOverlay` is merged on top of it (dev XOR prod) to produce the
//! `MergedConfig` handed to the engine as JSON. Descriptors are plain data:
//! constructed once per invocation, serialized, and discarded.

mod merge;
mod model;

#[cfg(test)]
mod tests;

// Re-export public API
pub use merge::{EnvironmentOverlay, OutputOverlay, merge};
pub use model::{
    BuildDescriptor, ChainDelivery, DevServerSettings, ErrorOverlay, MergedConfig, ModuleRule,
    OutputSettings, PluginSpec, ResolveSettings, RewriteRule, TransformChain, TransformStep,
};
