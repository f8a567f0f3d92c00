//! Wikicord CLI — entry point.
//!
//! Publishes a folder of markdown pages to a Discord channel as summary
//! cards, replacing the channel's previous contents. Meant to run once per
//! CI build: inputs come from GitHub Actions `INPUT_*` variables and the
//! `GITHUB_*` build metadata, optionally layered over a JSON config file and
//! under command-line flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use wikicord_core::config::{load_config, Config};
use wikicord_core::utils::expand_home;
use wikicord_core::wiki::{branch_from_ref, load_pages, repo_url, RepoLinks};
use wikicord_discord::{DiscordClient, Publisher, WikiHeader};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Publish a markdown wiki to a Discord channel
#[derive(Parser, Debug)]
#[command(name = "wikicord", version, about, long_about = None)]
struct Cli {
    /// JSON config file (camelCase keys)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Discord bot token
    #[arg(long)]
    token: Option<String>,

    /// Target Discord channel ID
    #[arg(long)]
    channel: Option<String>,

    /// Title of the header card
    #[arg(long)]
    title: Option<String>,

    /// Description of the header card
    #[arg(long)]
    description: Option<String>,

    /// Thumbnail URL of the header card
    #[arg(long)]
    icon_url: Option<String>,

    /// Glob selecting the wiki's markdown files
    #[arg(long = "glob")]
    wiki_glob: Option<String>,

    /// Repository checkout root that page paths are relative to
    #[arg(long)]
    workspace: Option<String>,

    /// Discord API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Build and log the cards without touching Discord
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli);
    if cli.dry_run {
        config.validate_wiki()?;
    } else {
        config.validate()?;
    }

    let links = repo_links(&config);
    let pages = load_pages(&config.wiki_folder_glob, &links)
        .context("failed to build wiki pages")?;
    let index_url = links.index_url(&config.wiki_folder_glob)?;
    info!(pages = pages.len(), "wiki pages ready");

    if cli.dry_run {
        for page in &pages {
            info!(title = %page.title, url = %page.url, "card");
        }
        info!("Wiki url is at: {}", index_url);
        return Ok(());
    }

    let client = DiscordClient::with_api_base(&config.discord_token, &config.api_base)?;
    let mut publisher = Publisher::new(WikiHeader {
        title: config.wiki_title.clone(),
        description: config.wiki_description.clone(),
        icon_url: config.icon_url().map(String::from),
    });

    publisher
        .run(&client, &config.discord_channel, &pages, &index_url)
        .await
}

/// File + env config with CLI flags on top.
fn resolve_config(cli: &Cli) -> Config {
    apply_cli_overrides(load_config(cli.config.as_deref()), cli)
}

fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    let overrides = [
        (&cli.token, &mut config.discord_token),
        (&cli.channel, &mut config.discord_channel),
        (&cli.title, &mut config.wiki_title),
        (&cli.description, &mut config.wiki_description),
        (&cli.wiki_glob, &mut config.wiki_folder_glob),
        (&cli.workspace, &mut config.github.workspace),
        (&cli.api_base, &mut config.api_base),
    ];
    for (flag, field) in overrides {
        if let Some(value) = flag {
            *field = value.clone();
        }
    }
    if let Some(icon) = &cli.icon_url {
        config.wiki_icon_url = Some(icon.clone());
    }
    config
}

/// URL builder for the checked-out repository.
fn repo_links(config: &Config) -> RepoLinks {
    let workspace = if config.github.workspace.is_empty() {
        PathBuf::from(".")
    } else {
        expand_home(&config.github.workspace)
    };

    RepoLinks::new(
        repo_url(&config.github.server_url, &config.github.repository),
        branch_from_ref(&config.github.git_ref),
        workspace,
    )
}

/// Initialize tracing/logging. `RUST_LOG` wins when set.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("wikicord=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wikicord").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_flags_override_config() {
        let cli = parse(&[
            "--token", "flag-token",
            "--channel", "99",
            "--glob", "docs/*.md",
            "--icon-url", "https://example.com/i.png",
        ]);
        let mut base = Config::default();
        base.discord_token = "file-token".into();
        base.wiki_title = "From file".into();

        let config = apply_cli_overrides(base, &cli);
        assert_eq!(config.discord_token, "flag-token");
        assert_eq!(config.discord_channel, "99");
        assert_eq!(config.wiki_folder_glob, "docs/*.md");
        assert_eq!(config.icon_url(), Some("https://example.com/i.png"));
        // Untouched by flags
        assert_eq!(config.wiki_title, "From file");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&[]);
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_repo_links_from_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("wiki")).unwrap();
        fs::write(dir.path().join("wiki/Home.md"), "# Home\n").unwrap();

        let mut config = Config::default();
        config.github.repository = "acme/app".into();
        config.github.git_ref = "refs/heads/main".into();
        config.github.workspace = dir.path().display().to_string();

        let links = repo_links(&config);
        let page = links.page_links(&dir.path().join("wiki/Home.md")).unwrap();
        assert_eq!(page.read, "https://github.com/acme/app/blob/main/wiki/Home.md");
    }

    #[tokio::test]
    async fn test_dry_run_needs_no_credentials() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("wiki")).unwrap();
        fs::write(dir.path().join("wiki/Home.md"), "# Home\n\nHi.\n").unwrap();

        let config_path = dir.path().join("wikicord.json");
        fs::write(
            &config_path,
            r#"{
                "wikiTitle": "Wiki",
                "wikiDescription": "Docs",
                "github": { "repository": "acme/app", "ref": "refs/heads/main" }
            }"#,
        )
        .unwrap();

        // Flags win over any CI variables present in the test environment.
        let root = dir.path().display().to_string();
        let glob = format!("{root}/wiki/*.md");
        let cli = parse(&[
            "--config", config_path.to_str().unwrap(),
            "--workspace", root.as_str(),
            "--glob", glob.as_str(),
            "--dry-run",
        ]);
        run(cli).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_token_is_a_setup_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().display().to_string();
        let cli = parse(&[
            "--config", "/nonexistent/wikicord.json",
            "--token", "",
            "--workspace", root.as_str(),
        ]);
        let err = run(cli).await.unwrap_err();
        assert!(err.to_string().contains("discordToken"));
    }
}
