//! Wikicord Core — everything short of talking to Discord.
//!
//! - **markdown**: top-level block model over pulldown-cmark
//! - **extractor**: title + summary extraction and page assembly
//! - **wiki**: glob discovery and repository URLs
//! - **palette**: card accent colors
//! - **config**: typed config, JSON file and env overrides

pub mod config;
pub mod error;
pub mod extractor;
pub mod markdown;
pub mod palette;
pub mod utils;
pub mod wiki;

pub use error::WikiError;
pub use extractor::{extract, Summary, WikiPage};
pub use palette::{Color, Palette};
pub use wiki::{load_pages, RepoLinks};
