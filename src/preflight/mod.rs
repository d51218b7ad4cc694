//! Tool version gate.
//!
//! Before a production build, every tracked tool's current version is read
//! by running its version command and compared against the configured semver
//! range. All violations are collected and reported together; a single
//! failing tool halts the process with a non-zero exit.

use crate::config::{PreflightConfig, ToolRequirement};
use crate::error::{KilnError, Result};
use colored::Colorize;
use std::process::Command;

/// An observed tool: its name, current version, and required range.
#[derive(Debug, Clone)]
pub struct ToolVersion {
    pub name: String,
    pub current: String,
    pub requirement: String,
}

/// Strip a leading `v` and surrounding whitespace from a version string.
///
/// Version commands commonly print `v10.2.1`; semver parsing wants the bare
/// number.
pub fn clean_version(raw: &str) -> &str {
    raw.trim().trim_start_matches('v')
}

/// Collect one warning per tool whose current version misses its range.
///
/// Warnings are plain strings; callers decide how to color them.
pub fn collect_warnings(observed: &[ToolVersion]) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    for tool in observed {
        let requirement = semver::VersionReq::parse(&tool.requirement).map_err(|e| {
            KilnError::Config(format!(
                "preflight requirement '{}' for '{}' is not a valid semver range: {}",
                tool.requirement, tool.name, e
            ))
        })?;
        let current = semver::Version::parse(clean_version(&tool.current)).map_err(|e| {
            KilnError::Config(format!(
                "could not parse current version '{}' of '{}': {}",
                tool.current, tool.name, e
            ))
        })?;

        if !requirement.matches(&current) {
            warnings.push(format!(
                "{}: {} should be {}",
                tool.name, current, tool.requirement
            ));
        }
    }

    Ok(warnings)
}

/// Read the current versions of all tracked tools.
///
/// Optional tools whose executable is absent are skipped; a required tool
/// that cannot be run fails the gate outright.
pub fn observe_tools(preflight: &PreflightConfig) -> Result<Vec<ToolVersion>> {
    let mut observed = Vec::new();

    for tool in &preflight.tools {
        match probe_tool(tool)? {
            Some(current) => observed.push(ToolVersion {
                name: tool.name.clone(),
                current,
                requirement: tool.requirement.clone(),
            }),
            None => continue,
        }
    }

    Ok(observed)
}

/// Run one tool's version command. `Ok(None)` means an optional tool is not
/// installed.
fn probe_tool(tool: &ToolRequirement) -> Result<Option<String>> {
    let args = shell_words::split(&tool.version_command).map_err(|e| {
        KilnError::Config(format!(
            "failed to parse version command for '{}': {}",
            tool.name, e
        ))
    })?;
    if args.is_empty() {
        return Err(KilnError::Config(format!(
            "version command for '{}' is empty",
            tool.name
        )));
    }

    let output = match Command::new(&args[0]).args(&args[1..]).output() {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && tool.optional => {
            return Ok(None);
        }
        Err(e) => {
            return Err(KilnError::Preflight(format!(
                "  could not run '{}' for {}: {}",
                tool.version_command, tool.name, e
            )));
        }
    };

    if !output.status.success() {
        return Err(KilnError::Preflight(format!(
            "  '{}' exited with {} for {}",
            tool.version_command,
            output.status.code().unwrap_or(-1),
            tool.name
        )));
    }

    Ok(Some(
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
    ))
}

/// Run the full gate: observe, compare, report.
///
/// Prints every violation at once before failing, so the user fixes all
/// tools in one pass. On success, returns the observed tools for callers
/// that want to report them.
pub fn run(preflight: &PreflightConfig) -> Result<Vec<ToolVersion>> {
    let observed = observe_tools(preflight)?;
    let warnings = collect_warnings(&observed)?;

    if warnings.is_empty() {
        return Ok(observed);
    }

    println!();
    println!(
        "{}",
        "To use this project, you must update the following tools:".yellow()
    );
    println!();
    for warning in &warnings {
        // name: current should be requirement
        match warning.split_once(": ") {
            Some((name, rest)) => match rest.split_once(" should be ") {
                Some((current, requirement)) => println!(
                    "  {}: {} should be {}",
                    name,
                    current.red(),
                    requirement.green()
                ),
                None => println!("  {}", warning),
            },
            None => println!("  {}", warning),
        }
    }
    println!();

    Err(KilnError::Preflight(warnings.join("\n")))
}
