//! Exit code constants for the kiln CLI.
//!
//! One code per failure class:
//! - 0: Success
//! - 1: Config error (bad config file, malformed overlay, bad usage)
//! - 2: Preflight failure (tool version gate)
//! - 3: Cleanup failure (prior output could not be removed)
//! - 4: Build failure (engine reported errors or could not run)
//! - 5: Port unavailable (no free port for the dev server)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Config error: unreadable config, malformed overlay, or invalid usage.
pub const CONFIG_ERROR: i32 = 1;

/// Preflight failure: one or more tracked tools fail the version gate.
pub const PREFLIGHT_FAILURE: i32 = 2;

/// Cleanup failure: previous build output could not be removed.
pub const CLEANUP_FAILURE: i32 = 3;

/// Build failure: the engine reported compile errors or could not be run.
pub const BUILD_FAILURE: i32 = 4;

/// Port unavailable: no free development server port could be found.
pub const PORT_FAILURE: i32 = 5;
