//! Engine process invocation.

use super::stats::{BuildStats, parse_stats};
use crate::config::Mode;
use crate::error::{KilnError, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Maximum number of output lines quoted in a failure message.
const FAILURE_OUTPUT_MAX_LINES: usize = 50;

/// Maximum total characters quoted in a failure message.
const FAILURE_OUTPUT_MAX_CHARS: usize = 4096;

/// Run the build engine and interpret its stats.
///
/// The configured command gets `--config <handoff> --mode <mode>` appended
/// and runs from the project root with `KILN_MODE` exported. A non-zero exit
/// without parseable stats is a build failure quoting the engine's output.
pub fn run_build(
    command: &str,
    config_path: &Path,
    mode: Mode,
    project_root: &Path,
) -> Result<BuildStats> {
    let args = split_command(command)?;

    let output = Command::new(&args[0])
        .args(&args[1..])
        .arg("--config")
        .arg(config_path)
        .arg("--mode")
        .arg(mode.as_str())
        .env("KILN_MODE", mode.as_str())
        .current_dir(project_root)
        .output()
        .map_err(|e| {
            KilnError::Build(format!(
                "failed to execute engine: {}\nCommand: {}\nFix: ensure the engine is installed and in PATH.",
                e, command
            ))
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if let Some(stats) = parse_stats(&stdout) {
        return Ok(stats);
    }

    if output.status.success() {
        // Engine succeeded but spoke no stats; treat as an empty result.
        return Ok(BuildStats::default());
    }

    let combined = if stderr.is_empty() {
        stdout
    } else {
        format!("{}\n{}", stdout, stderr)
    };
    let mut msg = format!(
        "engine exited with code {}\nCommand: {}\n",
        output.status.code().unwrap_or(-1),
        command
    );
    let truncated = truncate_output(&combined, FAILURE_OUTPUT_MAX_LINES, FAILURE_OUTPUT_MAX_CHARS);
    if !truncated.is_empty() {
        msg.push_str("\nOutput (truncated):\n");
        msg.push_str(&truncated);
        msg.push('\n');
    }

    Err(KilnError::Build(msg))
}

/// Run the dev server until it exits.
///
/// Output streams straight to the user's terminal; the server owns the
/// session from here. A non-zero exit is surfaced as a build failure.
pub fn run_serve(
    command: &str,
    config_path: &Path,
    mode: Mode,
    project_root: &Path,
) -> Result<()> {
    let args = split_command(command)?;

    let status = Command::new(&args[0])
        .args(&args[1..])
        .arg("--config")
        .arg(config_path)
        .arg("--mode")
        .arg(mode.as_str())
        .env("KILN_MODE", mode.as_str())
        .current_dir(project_root)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| {
            KilnError::Build(format!(
                "failed to execute dev server: {}\nCommand: {}\nFix: ensure the dev server is installed and in PATH.",
                e, command
            ))
        })?;

    if !status.success() {
        return Err(KilnError::Build(format!(
            "dev server exited with code {}",
            status.code().unwrap_or(-1)
        )));
    }

    Ok(())
}

fn split_command(command: &str) -> Result<Vec<String>> {
    let command = command.trim();
    if command.is_empty() {
        return Err(KilnError::Config("engine command is empty".to_string()));
    }

    let args = shell_words::split(command).map_err(|e| {
        KilnError::Config(format!(
            "failed to parse engine command: {}\nCommand: {}\nFix: check for unmatched quotes or invalid escape sequences.",
            e, command
        ))
    })?;

    if args.is_empty() {
        return Err(KilnError::Config(format!(
            "engine command is empty after parsing.\nCommand: {}",
            command
        )));
    }

    Ok(args)
}

fn truncate_output(output: &str, max_lines: usize, max_chars: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();

    let relevant_lines: Vec<&str> = if lines.len() > max_lines {
        lines[lines.len() - max_lines..].to_vec()
    } else {
        lines
    };

    let mut result = relevant_lines.join("\n");

    if result.len() > max_chars {
        result = format!("...(truncated)...\n{}", &result[result.len() - max_chars..]);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_command_rejects_empty_and_unbalanced() {
        assert!(split_command("").is_err());
        assert!(split_command("   ").is_err());
        assert!(split_command("webpack 'unterminated").is_err());

        let args = split_command("webpack --silent").unwrap();
        assert_eq!(args, vec!["webpack", "--silent"]);
    }

    #[test]
    fn test_run_build_missing_engine_is_a_build_error() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("merged.json");
        std::fs::write(&config_path, "{}").unwrap();

        let result = run_build(
            "kiln-definitely-missing-engine-xyz",
            &config_path,
            Mode::Production,
            temp.path(),
        );

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), crate::exit_codes::BUILD_FAILURE);
        assert!(err.to_string().contains("PATH"));
    }

    #[test]
    #[cfg(unix)]
    fn test_run_build_parses_stats_from_stub_engine() {
        // A stub engine that prints a stats object and ignores the appended
        // --config/--mode flags (they land in the script's positional
        // parameters).
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("merged.json");
        std::fs::write(&config_path, "{}").unwrap();

        let command =
            r#"sh -c 'echo "{\"errors\":[],\"assets\":[{\"name\":\"js/app.js\",\"size\":10}]}"'"#;
        let stats = run_build(command, &config_path, Mode::Production, temp.path()).unwrap();

        assert!(!stats.has_errors());
        assert_eq!(stats.assets.len(), 1);
        assert_eq!(stats.assets[0].name, "js/app.js");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_build_failure_quotes_engine_output() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("merged.json");
        std::fs::write(&config_path, "{}").unwrap();

        let command = r#"sh -c 'echo "module not found"; exit 2'"#;
        let result = run_build(command, &config_path, Mode::Production, temp.path());

        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("exited with code 2"));
        assert!(msg.contains("module not found"));
    }

    #[test]
    fn test_truncate_output_keeps_tail() {
        let output: String = (0..100)
            .map(|i| format!("line {}\n", i))
            .collect();

        let truncated = truncate_output(&output, 10, 4096);
        assert!(truncated.contains("line 99"));
        assert!(!truncated.contains("line 0\n"));
    }
}
