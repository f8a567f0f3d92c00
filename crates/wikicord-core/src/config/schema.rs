//! Configuration schema.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

/// Default Discord REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Default forge server when the CI environment does not provide one.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Everything one publish run needs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Discord bot token.
    pub discord_token: String,
    /// Target channel ID.
    pub discord_channel: String,
    /// Title of the header card.
    pub wiki_title: String,
    /// Description of the header card.
    pub wiki_description: String,
    /// Thumbnail of the header card. Empty means none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki_icon_url: Option<String>,
    /// Glob selecting the wiki's markdown files.
    pub wiki_folder_glob: String,
    /// Discord REST API base URL.
    pub api_base: String,
    pub github: GithubConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            discord_channel: String::new(),
            wiki_title: String::new(),
            wiki_description: String::new(),
            wiki_icon_url: None,
            wiki_folder_glob: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            github: GithubConfig::default(),
        }
    }
}

impl Config {
    /// Check that every required value is present.
    ///
    /// Values are validated by presence only.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("discordToken", &self.discord_token),
            ("discordChannel", &self.discord_channel),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(name));
            }
        }
        self.validate_wiki()
    }

    /// Check only what is needed to build the pages (no Discord credentials).
    pub fn validate_wiki(&self) -> Result<(), ConfigError> {
        let required = [
            ("wikiTitle", &self.wiki_title),
            ("wikiDescription", &self.wiki_description),
            ("wikiFolderGlob", &self.wiki_folder_glob),
            ("github.repository", &self.github.repository),
            ("github.ref", &self.github.git_ref),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(name));
            }
        }
        Ok(())
    }

    /// Icon URL, treating an empty string as absent.
    pub fn icon_url(&self) -> Option<&str> {
        self.wiki_icon_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

// ─────────────────────────────────────────────
// GitHub
// ─────────────────────────────────────────────

/// Repository coordinates, normally taken from the CI environment.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GithubConfig {
    /// Forge server URL (e.g. `https://github.com`).
    pub server_url: String,
    /// `owner/name`.
    pub repository: String,
    /// Git ref being built (e.g. `refs/heads/main`).
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Checkout root that page paths are made relative to.
    /// Empty means the current directory.
    pub workspace: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            repository: String::new(),
            git_ref: String::new(),
            workspace: String::new(),
        }
    }
}

/// Invalid or incomplete configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required config value `{0}`")]
    Missing(&'static str),
}
