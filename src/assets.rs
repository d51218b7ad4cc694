//! Asset path helpers shared by the environment profiles.
//!
//! Output-relative asset locations are URL-style template strings consumed
//! by the engine (`[name]`, `[hash:N]`, `[ext]` placeholders), so joining
//! always uses forward slashes regardless of platform.

use crate::config::{Config, Mode};

/// Assets at or below this size (bytes) are inlined as data URIs instead of
/// emitted as files.
pub const INLINE_ASSET_LIMIT: u64 = 10_000;

/// Digest length used in hashed asset filenames.
pub const ASSET_HASH_LEN: usize = 7;

/// Join a template path under the mode's assets subdirectory.
pub fn assets_path(config: &Config, mode: Mode, path: &str) -> String {
    let sub = config.assets_sub_directory(mode).trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if sub.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", sub, path)
    }
}

/// Hashed filename template for a binary asset category directory
/// (`img`, `media`, `fonts`).
pub fn hashed_asset_name(category: &str) -> String {
    format!("{}/[name].[hash:{}].[ext]", category, ASSET_HASH_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_path_joins_with_forward_slash() {
        let config = Config::default();
        assert_eq!(
            assets_path(&config, Mode::Production, "js/[name].[chunkhash].js"),
            "static/js/[name].[chunkhash].js"
        );
        assert_eq!(
            assets_path(&config, Mode::Development, "img/logo.png"),
            "static/img/logo.png"
        );
    }

    #[test]
    fn test_assets_path_uses_mode_subdirectory() {
        let mut config = Config::default();
        config.build.assets_sub_directory = "assets".to_string();

        assert_eq!(
            assets_path(&config, Mode::Production, "css/app.css"),
            "assets/css/app.css"
        );
        assert_eq!(
            assets_path(&config, Mode::Development, "css/app.css"),
            "static/css/app.css"
        );
    }

    #[test]
    fn test_assets_path_empty_subdirectory() {
        let mut config = Config::default();
        config.build.assets_sub_directory = String::new();

        assert_eq!(assets_path(&config, Mode::Production, "js/app.js"), "js/app.js");
    }

    #[test]
    fn test_hashed_asset_name_template() {
        assert_eq!(hashed_asset_name("img"), "img/[name].[hash:7].[ext]");
        assert_eq!(hashed_asset_name("fonts"), "fonts/[name].[hash:7].[ext]");
    }
}
