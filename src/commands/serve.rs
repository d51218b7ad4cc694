//! The `serve` command: the development pipeline.
//!
//! Resolves the bind address (env overrides first), probes a free port,
//! merges the development overlay, and hands the descriptor to the dev
//! server. The server runs until terminated; kiln does not support
//! cancellation beyond process termination.

use crate::config::{Config, Mode};
use crate::context::require_project;
use crate::descriptor::merge;
use crate::engine;
use crate::error::{KilnError, Result};
use crate::net;
use crate::profile::{base_descriptor, dev_overlay};
use colored::Colorize;

/// Environment variable overriding the dev server bind host.
pub const HOST_ENV_VAR: &str = "HOST";

/// Environment variable overriding the dev server preferred port.
pub const PORT_ENV_VAR: &str = "PORT";

pub fn cmd_serve() -> Result<()> {
    let (ctx, config) = require_project()?;

    let (host, preferred) = resolve_bind_address(&config)?;
    let port = net::find_free_port(&host, preferred)?;
    if port != preferred {
        println!(
            "Port {} is in use, using {} instead.",
            preferred.to_string().yellow(),
            port.to_string().green()
        );
    }

    let base = base_descriptor(&config, &ctx, Mode::Development);
    let merged = merge(base, dev_overlay(&config, &ctx, &host, port))?;

    let handoff = ctx.merged_config_path(Mode::Development);
    crate::fs::write_handoff(&handoff, &merged.to_json()?)?;

    println!("Starting development server...");
    engine::run_serve(
        &config.engine.serve_command,
        &handoff,
        Mode::Development,
        &ctx.project_root,
    )
}

/// Resolve the bind host and preferred port, env overrides first.
///
/// An unset or empty env var falls back to the config value; a set but
/// unparseable PORT is a config error rather than a silent fallback.
pub(crate) fn resolve_bind_address(config: &Config) -> Result<(String, u16)> {
    let host = match std::env::var(HOST_ENV_VAR) {
        Ok(value) if !value.is_empty() => value,
        _ => config.dev.host.clone(),
    };

    let port = match std::env::var(PORT_ENV_VAR) {
        Ok(value) if !value.is_empty() => value.parse::<u16>().map_err(|_| {
            KilnError::Config(format!(
                "PORT environment variable '{}' is not a valid port number",
                value
            ))
        })?,
        _ => config.dev.port,
    };

    Ok((host, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: guarded by #[serial]; no other test reads these vars
        // concurrently.
        unsafe {
            std::env::remove_var(HOST_ENV_VAR);
            std::env::remove_var(PORT_ENV_VAR);
        }
    }

    #[test]
    #[serial]
    fn test_bind_address_defaults_to_config() {
        clear_env();
        let config = Config::default();

        let (host, port) = resolve_bind_address(&config).unwrap();
        assert_eq!(host, "localhost");
        assert_eq!(port, 8080);
    }

    #[test]
    #[serial]
    fn test_env_overrides_host_and_port() {
        clear_env();
        unsafe {
            std::env::set_var(HOST_ENV_VAR, "0.0.0.0");
            std::env::set_var(PORT_ENV_VAR, "9090");
        }

        let config = Config::default();
        let (host, port) = resolve_bind_address(&config).unwrap();
        assert_eq!(host, "0.0.0.0");
        assert_eq!(port, 9090);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_env_is_a_config_error() {
        clear_env();
        unsafe { std::env::set_var(PORT_ENV_VAR, "not-a-port") };

        let config = Config::default();
        let result = resolve_bind_address(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("PORT"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_empty_env_falls_back_to_config() {
        clear_env();
        unsafe {
            std::env::set_var(HOST_ENV_VAR, "");
            std::env::set_var(PORT_ENV_VAR, "");
        }

        let config = Config::default();
        let (host, port) = resolve_bind_address(&config).unwrap();
        assert_eq!(host, "localhost");
        assert_eq!(port, 8080);

        clear_env();
    }
}
