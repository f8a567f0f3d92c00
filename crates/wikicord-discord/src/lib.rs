//! Wikicord Discord — chat service integration and the channel publisher.
//!
//! This crate provides:
//! - **base**: The `ChatService` trait the publisher drives, plus message types
//! - **discord**: `DiscordClient` — the REST API implementation
//! - **publisher**: `Publisher` — wipe the channel and post the wiki cards

pub mod base;
pub mod discord;
pub mod publisher;

pub use base::{ChatService, Embed, Outbound};
pub use discord::DiscordClient;
pub use publisher::{Publisher, PublishError, WikiHeader};
