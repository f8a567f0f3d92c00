//! ChatService trait — the abstract interface the publisher drives.
//!
//! One implementation talks to Discord over REST (`discord`); tests use an
//! in-memory channel. Every call is awaited in sequence by the publisher.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Discord channel type of a guild text channel.
pub const GUILD_TEXT: u8 = 0;

/// The bot account a session is logged in as.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct BotUser {
    pub id: String,
    pub username: String,
}

/// The subset of a Discord channel object the publisher needs.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub guild_id: Option<String>,
}

impl ChannelInfo {
    pub fn is_text(&self) -> bool {
        self.kind == GUILD_TEXT
    }

    /// Display name for logs.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Thumbnail shown in the corner of an embed.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EmbedThumbnail {
    pub url: String,
}

/// A rich card as Discord's `embeds[]` entry expects it.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
}

/// One message to post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outbound {
    Embed(Embed),
    Text(String),
}

/// A chat backend the publisher can connect to, wipe, and post into.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Log in / verify credentials. Must succeed before any other call.
    async fn connect(&self) -> anyhow::Result<BotUser>;

    /// Close the session. Called exactly once per successful `connect`.
    async fn disconnect(&self) -> anyhow::Result<()>;

    /// Look up a channel. `Ok(None)` when it does not exist.
    async fn resolve_channel(&self, channel_id: &str) -> anyhow::Result<Option<ChannelInfo>>;

    /// IDs of up to `limit` most recent messages, newest first.
    async fn fetch_messages(&self, channel_id: &str, limit: u8) -> anyhow::Result<Vec<String>>;

    /// Delete 2–100 messages in one request.
    async fn bulk_delete(&self, channel_id: &str, message_ids: &[String]) -> anyhow::Result<()>;

    /// Delete a single message.
    async fn delete_message(&self, channel_id: &str, message_id: &str) -> anyhow::Result<()>;

    /// Post one message.
    async fn send(&self, channel_id: &str, message: &Outbound) -> anyhow::Result<()>;
}
