//! Discord REST client.
//!
//! Talks to the Discord REST API v10 directly with `reqwest`. A publish run
//! never needs the Gateway: "connecting" verifies the bot token against
//! `/users/@me`, and every later call is a plain authenticated request.
//!
//! Requests are not retried and rate limits are not tracked; any non-2xx
//! response becomes an error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::base::{BotUser, ChannelInfo, ChatService, Outbound};

// ─────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────

/// Discord REST API base URL.
pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Per-request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Message as returned by the history endpoint; only the ID is used.
#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

// ─────────────────────────────────────────────
// DiscordClient
// ─────────────────────────────────────────────

/// Discord session backed by the REST API.
pub struct DiscordClient {
    /// Bot token from Discord Developer Portal.
    token: String,
    /// API base URL, without trailing slash.
    api_base: String,
    /// HTTP client for REST API calls.
    http: reqwest::Client,
    /// Set by `connect`, cleared by `disconnect`.
    connected: AtomicBool,
}

impl std::fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordClient")
            .field("api_base", &self.api_base)
            .field("connected", &self.connected.load(Ordering::SeqCst))
            .finish()
    }
}

impl DiscordClient {
    /// Create a client against the public Discord API.
    pub fn new(token: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_api_base(token, DISCORD_API_BASE)
    }

    /// Create a client against a custom API base (proxies, tests).
    pub fn with_api_base(
        token: impl Into<String>,
        api_base: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            token: token.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            http,
            connected: AtomicBool::new(false),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("Authorization", format!("Bot {}", self.token))
    }

    fn ensure_connected(&self) -> anyhow::Result<()> {
        if !self.is_connected() {
            bail!("discord client is not connected");
        }
        Ok(())
    }
}

/// Turn a non-2xx response into an error carrying status and body.
async fn check(resp: Response, action: &str) -> anyhow::Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    bail!("discord {action} failed (HTTP {status}): {body}")
}

#[async_trait]
impl ChatService for DiscordClient {
    async fn connect(&self) -> anyhow::Result<BotUser> {
        if self.token.is_empty() {
            bail!("discord token is empty");
        }

        let resp = self
            .authed(self.http.get(self.url("/users/@me")))
            .send()
            .await
            .context("failed to reach discord")?;
        let user: BotUser = check(resp, "login")
            .await?
            .json()
            .await
            .context("invalid /users/@me response")?;

        self.connected.store(true, Ordering::SeqCst);
        info!(bot = %user.username, "logged in to discord");
        Ok(user)
    }

    async fn disconnect(&self) -> anyhow::Result<()> {
        if self.connected.swap(false, Ordering::SeqCst) {
            debug!("discord session closed");
        } else {
            debug!("discord session already closed");
        }
        Ok(())
    }

    async fn resolve_channel(&self, channel_id: &str) -> anyhow::Result<Option<ChannelInfo>> {
        self.ensure_connected()?;

        let resp = self
            .authed(self.http.get(self.url(&format!("/channels/{channel_id}"))))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let info = check(resp, "channel lookup")
            .await?
            .json()
            .await
            .context("invalid channel response")?;
        Ok(Some(info))
    }

    async fn fetch_messages(&self, channel_id: &str, limit: u8) -> anyhow::Result<Vec<String>> {
        self.ensure_connected()?;

        let url = self.url(&format!("/channels/{channel_id}/messages?limit={limit}"));
        let resp = self.authed(self.http.get(url)).send().await?;
        let messages: Vec<MessageRef> = check(resp, "message fetch")
            .await?
            .json()
            .await
            .context("invalid message list response")?;

        debug!(channel_id, count = messages.len(), "fetched messages");
        Ok(messages.into_iter().map(|m| m.id).collect())
    }

    async fn bulk_delete(&self, channel_id: &str, message_ids: &[String]) -> anyhow::Result<()> {
        self.ensure_connected()?;

        let url = self.url(&format!("/channels/{channel_id}/messages/bulk-delete"));
        let resp = self
            .authed(self.http.post(url))
            .json(&json!({ "messages": message_ids }))
            .send()
            .await?;
        check(resp, "bulk delete").await?;

        debug!(channel_id, count = message_ids.len(), "bulk deleted messages");
        Ok(())
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> anyhow::Result<()> {
        self.ensure_connected()?;

        let url = self.url(&format!("/channels/{channel_id}/messages/{message_id}"));
        let resp = self.authed(self.http.delete(url)).send().await?;
        check(resp, "message delete").await?;
        Ok(())
    }

    async fn send(&self, channel_id: &str, message: &Outbound) -> anyhow::Result<()> {
        self.ensure_connected()?;

        let body = match message {
            Outbound::Text(content) => json!({ "content": content }),
            Outbound::Embed(embed) => json!({ "embeds": [embed] }),
        };

        let url = self.url(&format!("/channels/{channel_id}/messages"));
        let resp = self.authed(self.http.post(url)).json(&body).send().await?;
        check(resp, "send").await?;

        debug!(channel_id, "discord message sent");
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
