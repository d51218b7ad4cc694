//! Engine stats contract.

use serde::{Deserialize, Serialize};

/// Result object the engine prints on stdout after a build.
///
/// Unknown fields are ignored so engines may report more than kiln reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildStats {
    /// Compile errors, verbatim. Non-empty means the build failed.
    pub errors: Vec<String>,

    /// Compile warnings, verbatim.
    pub warnings: Vec<String>,

    /// Emitted artifacts.
    pub assets: Vec<AssetStat>,

    /// Engine-reported build duration.
    pub duration_ms: Option<u64>,
}

/// One emitted artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetStat {
    pub name: String,
    pub size: u64,
}

impl BuildStats {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Human-readable summary in the shape users expect from bundlers:
    /// one line per asset, then warnings, then errors.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for asset in &self.assets {
            out.push_str(&format!("  {:>10}  {}\n", format_size(asset.size), asset.name));
        }

        if !self.warnings.is_empty() {
            out.push('\n');
            for warning in &self.warnings {
                out.push_str(&format!("  warning: {}\n", warning));
            }
        }

        if !self.errors.is_empty() {
            out.push('\n');
            for error in &self.errors {
                out.push_str(&format!("  error: {}\n", error));
            }
        }

        out
    }
}

/// Parse the stats object from engine stdout.
///
/// Engines may print progress noise before the stats line, so the whole
/// output is tried first and the last non-empty line second.
pub fn parse_stats(stdout: &str) -> Option<BuildStats> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(stats) = serde_json::from_str::<BuildStats>(trimmed) {
        return Some(stats);
    }

    let last_line = trimmed.lines().rev().find(|l| !l.trim().is_empty())?;
    serde_json::from_str::<BuildStats>(last_line.trim()).ok()
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.2} MiB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stats_from_clean_json() {
        let stdout = r#"{"errors": [], "warnings": ["big chunk"], "assets": [{"name": "js/app.abc1234.js", "size": 20480}], "duration_ms": 1250}"#;

        let stats = parse_stats(stdout).unwrap();
        assert!(!stats.has_errors());
        assert_eq!(stats.warnings.len(), 1);
        assert_eq!(stats.assets[0].name, "js/app.abc1234.js");
        assert_eq!(stats.duration_ms, Some(1250));
    }

    #[test]
    fn test_parse_stats_from_last_line_after_noise() {
        let stdout = "compiling...\n95% emitting\n{\"errors\":[\"bad import\"]}\n";

        let stats = parse_stats(stdout).unwrap();
        assert!(stats.has_errors());
        assert_eq!(stats.errors[0], "bad import");
    }

    #[test]
    fn test_parse_stats_rejects_garbage() {
        assert!(parse_stats("").is_none());
        assert!(parse_stats("not json at all").is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let stdout = r#"{"errors": [], "chunks": 14, "modules": 200}"#;
        let stats = parse_stats(stdout).unwrap();
        assert!(!stats.has_errors());
    }

    #[test]
    fn test_render_lists_assets_and_errors() {
        let stats = BuildStats {
            errors: vec!["module not found: ./missing".to_string()],
            warnings: vec![],
            assets: vec![AssetStat {
                name: "js/app.js".to_string(),
                size: 2048,
            }],
            duration_ms: None,
        };

        let rendered = stats.render();
        assert!(rendered.contains("2.0 KiB"));
        assert!(rendered.contains("js/app.js"));
        assert!(rendered.contains("error: module not found"));
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MiB");
    }
}
