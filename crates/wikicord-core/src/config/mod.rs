//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use wikicord_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("Channel: {}", cfg.discord_channel);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{apply_env_overrides, load_config};
pub use schema::{Config, ConfigError, GithubConfig};
