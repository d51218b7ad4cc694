//! Tests for descriptor merging.

use std::collections::BTreeMap;

use crate::config::{Config, Mode};
use crate::context::ProjectContext;
use crate::descriptor::{
    ChainDelivery, EnvironmentOverlay, ModuleRule, OutputOverlay, PluginSpec, TransformChain,
    TransformStep, merge,
};
use crate::profile::{base_descriptor, dev_overlay, prod_overlay};
use crate::test_support::create_test_project;

fn project() -> (tempfile::TempDir, ProjectContext, Config) {
    let temp_dir = create_test_project();
    let ctx = ProjectContext::resolve_from(temp_dir.path()).unwrap();
    let config = Config::default();
    (temp_dir, ctx, config)
}

fn empty_prod_overlay() -> EnvironmentOverlay {
    EnvironmentOverlay {
        mode: Mode::Production,
        devtool: Some("source-map".to_string()),
        output: OutputOverlay::default(),
        extra_rules: Vec::new(),
        extra_plugins: Vec::new(),
        extra_entries: BTreeMap::new(),
        extra_aliases: BTreeMap::new(),
        dev_server: None,
    }
}

fn style_rule(ext: &str) -> ModuleRule {
    ModuleRule::for_extension(
        ext,
        TransformChain {
            delivery: ChainDelivery::Inline {
                injector: "style-runtime".to_string(),
            },
            steps: vec![TransformStep::new("css")],
        },
    )
}

#[test]
fn test_sequences_concatenate_base_then_overlay() {
    let (_temp, ctx, config) = project();
    let base = base_descriptor(&config, &ctx, Mode::Production);
    let base_rule_count = base.rules.len();
    let base_plugin_count = base.plugins.len();

    let overlay = prod_overlay(&config, &ctx, false);
    let overlay_rule_count = overlay.extra_rules.len();
    let overlay_plugin_count = overlay.extra_plugins.len();

    let merged = merge(base, overlay).unwrap();

    // Concatenation property: merged length equals base + overlay.
    assert_eq!(merged.rules.len(), base_rule_count + overlay_rule_count);
    assert_eq!(merged.plugins.len(), base_plugin_count + overlay_plugin_count);

    // Overlay entries come after base entries.
    assert!(!merged.rules[0].is_style_rule());
    assert!(merged.rules.last().unwrap().is_style_rule());
}

#[test]
fn test_scalars_replaced_by_overlay() {
    let (_temp, ctx, config) = project();
    let base = base_descriptor(&config, &ctx, Mode::Production);
    assert_eq!(base.output.filename, "[name].js");

    let merged = merge(base, prod_overlay(&config, &ctx, false)).unwrap();

    assert_eq!(merged.output.filename, "static/js/[name].[chunkhash].js");
    assert_eq!(
        merged.output.chunk_filename.as_deref(),
        Some("static/js/[id].[chunkhash].js")
    );
    assert_eq!(merged.devtool.as_deref(), Some("source-map"));
}

#[test]
fn test_mappings_merge_with_overlay_precedence() {
    let (_temp, ctx, config) = project();
    let base = base_descriptor(&config, &ctx, Mode::Production);

    let mut overlay = empty_prod_overlay();
    overlay.extra_rules = vec![style_rule("css")];
    overlay
        .extra_entries
        .insert("app".to_string(), "src/other.js".to_string());
    overlay
        .extra_entries
        .insert("admin".to_string(), "src/admin.js".to_string());
    overlay
        .extra_aliases
        .insert("@".to_string(), "lib".to_string());

    let merged = merge(base, overlay).unwrap();

    // Overlay wins on conflict, base keys survive otherwise.
    assert_eq!(merged.entries.get("app").unwrap(), "src/other.js");
    assert_eq!(merged.entries.get("admin").unwrap(), "src/admin.js");
    assert_eq!(merged.resolve.aliases.get("@").unwrap(), "lib");
    assert!(!merged.resolve.extensions.is_empty());
}

#[test]
fn test_prod_merge_extracts_all_styles_and_hashes_output() {
    // Scenario: base with {app: ./src/main.js} plus the prod overlay.
    let (_temp, ctx, config) = project();
    let base = base_descriptor(&config, &ctx, Mode::Production);
    let merged = merge(base, prod_overlay(&config, &ctx, false)).unwrap();

    let style_rules: Vec<_> = merged.style_rules().collect();
    assert!(!style_rules.is_empty());
    for rule in style_rules {
        assert!(
            matches!(rule.chain.delivery, ChainDelivery::Extract { .. }),
            "style rule '{}' must route through the extraction wrapper",
            rule.test
        );
    }

    assert!(merged.output.filename.contains("[chunkhash]"));
}

#[test]
fn test_dev_merge_keeps_dev_server_and_inline_styles() {
    let (_temp, ctx, config) = project();
    let base = base_descriptor(&config, &ctx, Mode::Development);
    let merged = merge(base, dev_overlay(&config, &ctx, "localhost", 8081)).unwrap();

    let server = merged.dev_server.as_ref().unwrap();
    assert_eq!(server.port, 8081);

    for rule in merged.style_rules() {
        assert!(matches!(rule.chain.delivery, ChainDelivery::Inline { .. }));
    }

    // Dev leaves the base output templates alone.
    assert_eq!(merged.output.filename, "[name].js");
}

#[test]
fn test_dev_overlay_without_dev_server_fails_fast() {
    let (_temp, ctx, config) = project();
    let base = base_descriptor(&config, &ctx, Mode::Development);

    let mut overlay = dev_overlay(&config, &ctx, "localhost", 8080);
    overlay.dev_server = None;

    let result = merge(base, overlay);
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("missing its dev_server record")
    );
}

#[test]
fn test_prod_overlay_with_dev_server_fails_fast() {
    let (_temp, ctx, config) = project();
    let base = base_descriptor(&config, &ctx, Mode::Production);

    let mut overlay = prod_overlay(&config, &ctx, false);
    overlay.dev_server = dev_overlay(&config, &ctx, "localhost", 8080).dev_server;

    let result = merge(base, overlay);
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("must not carry a dev_server record")
    );
}

#[test]
fn test_invalid_rule_pattern_fails_fast() {
    let (_temp, ctx, config) = project();
    let base = base_descriptor(&config, &ctx, Mode::Production);

    let mut overlay = prod_overlay(&config, &ctx, false);
    overlay.extra_rules.push(ModuleRule {
        test: r"\.(css$".to_string(),
        enforce: None,
        include: Vec::new(),
        chain: TransformChain::direct(vec![TransformStep::new("css")]),
    });

    let result = merge(base, overlay);
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("not a valid regular expression")
    );
}

#[test]
fn test_invalid_copy_ignore_glob_fails_fast() {
    let (_temp, ctx, config) = project();
    let base = base_descriptor(&config, &ctx, Mode::Production);

    let mut overlay = prod_overlay(&config, &ctx, false);
    overlay.extra_plugins.push(PluginSpec::CopyStatic {
        from: "static".to_string(),
        to: "static".to_string(),
        ignore: vec!["[".to_string()],
    });

    let result = merge(base, overlay);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not a valid glob"));
}

#[test]
fn test_bare_base_is_rejected_as_incomplete() {
    let (_temp, ctx, config) = project();
    let base = base_descriptor(&config, &ctx, Mode::Production);

    // An overlay contributing nothing leaves the base without style rules.
    let result = merge(base, empty_prod_overlay());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("incomplete merged config"));
}

#[test]
fn test_merged_config_serializes_to_json() {
    let (_temp, ctx, config) = project();
    let base = base_descriptor(&config, &ctx, Mode::Production);
    let merged = merge(base, prod_overlay(&config, &ctx, false)).unwrap();

    let json = merged.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["mode"], "production");
    assert!(value["rules"].as_array().unwrap().len() > 7);
    assert!(value.get("dev_server").is_none());

    // Plugins serialize with their tag for the engine.
    let plugin_names: Vec<&str> = value["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert!(plugin_names.contains(&"extract_styles"));
    assert!(plugin_names.contains(&"split_async_shared"));
}
