//! Environment profiles.
//!
//! `base` builds the environment-independent descriptor; `dev` and `prod`
//! build the two overlays. Exactly one overlay is merged per invocation.

mod base;
mod dev;
mod prod;

pub use base::base_descriptor;
pub use dev::dev_overlay;
pub use prod::{ASYNC_SHARED_MIN_CHUNKS, prod_overlay};
