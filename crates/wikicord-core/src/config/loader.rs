//! Config loader — reads an optional JSON file and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file passed with `--config`
//! 3. Environment variables (GitHub Actions inputs and CI metadata)
//!
//! CLI flags are applied on top of the result by the binary.

use std::path::Path;
use tracing::{debug, info, warn};

use super::schema::Config;

/// Load configuration from an optional file + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config = match path {
        Some(path) => load_config_from_path(path),
        None => Config::default(),
    };
    apply_env_overrides(config)
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `INPUT_DISCORD_TOKEN` → `discord_token`
/// - `INPUT_DISCORD_CHANNEL` → `discord_channel`
/// - `INPUT_WIKI_TITLE` → `wiki_title`
/// - `INPUT_WIKI_DESCRIPTION` → `wiki_description`
/// - `INPUT_WIKI_ICON_URL` → `wiki_icon_url`
/// - `INPUT_WIKI_FOLDER_GLOB` → `wiki_folder_glob`
/// - `WIKICORD_API_BASE` → `api_base`
/// - `GITHUB_SERVER_URL` → `github.server_url`
/// - `GITHUB_REPOSITORY` → `github.repository`
/// - `GITHUB_REF` → `github.git_ref`
/// - `GITHUB_WORKSPACE` → `github.workspace`
pub fn apply_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Same as [`apply_env_overrides`] with an injectable lookup.
///
/// Unset and empty variables leave the current value alone.
fn apply_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(val) = get("INPUT_DISCORD_TOKEN") {
        config.discord_token = val;
    }
    if let Some(val) = get("INPUT_DISCORD_CHANNEL") {
        config.discord_channel = val;
    }
    if let Some(val) = get("INPUT_WIKI_TITLE") {
        config.wiki_title = val;
    }
    if let Some(val) = get("INPUT_WIKI_DESCRIPTION") {
        config.wiki_description = val;
    }
    if let Some(val) = get("INPUT_WIKI_ICON_URL") {
        config.wiki_icon_url = Some(val);
    }
    if let Some(val) = get("INPUT_WIKI_FOLDER_GLOB") {
        config.wiki_folder_glob = val;
    }
    if let Some(val) = get("WIKICORD_API_BASE") {
        config.api_base = val;
    }

    // CI metadata
    if let Some(val) = get("GITHUB_SERVER_URL") {
        config.github.server_url = val;
    }
    if let Some(val) = get("GITHUB_REPOSITORY") {
        config.github.repository = val;
    }
    if let Some(val) = get("GITHUB_REF") {
        config.github.git_ref = val;
    }
    if let Some(val) = get("GITHUB_WORKSPACE") {
        config.github.workspace = val;
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
