//! Channel publisher — wipe a channel and repost the wiki as cards.
//!
//! Message order in the channel is: header card, one card per page in
//! discovery order, then a plain-text pointer to the full wiki. Every send is
//! awaited before the next one starts.

use anyhow::Context;
use tracing::{error, info, warn};

use wikicord_core::palette::Palette;
use wikicord_core::utils::truncate_string;
use wikicord_core::WikiPage;

use crate::base::{ChannelInfo, ChatService, Embed, EmbedThumbnail, Outbound};

/// Messages fetched per wipe round (Discord's history page limit).
pub const WIPE_BATCH: u8 = 100;

/// Discord embed title limit.
const EMBED_TITLE_MAX: usize = 256;

/// Fatal publishing errors.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("channel {0} not found")]
    ChannelNotFound(String),

    #[error("channel {id} is not a text channel (type {kind}); please provide a text channel")]
    NotTextChannel { id: String, kind: u8 },
}

/// Content of the card that opens the wiki.
#[derive(Clone, Debug, Default)]
pub struct WikiHeader {
    pub title: String,
    pub description: String,
    pub icon_url: Option<String>,
}

/// Republishes a wiki into one channel.
///
/// Owns the palette cursor, so colors depend only on card order.
#[derive(Debug)]
pub struct Publisher {
    header: WikiHeader,
    palette: Palette,
}

impl Publisher {
    pub fn new(header: WikiHeader) -> Self {
        Self {
            header,
            palette: Palette::new(),
        }
    }

    /// Connect, publish, and disconnect.
    ///
    /// Once `connect` succeeds, `disconnect` runs exactly once whether or
    /// not publishing fails. A failed disconnect is logged; the publish
    /// result is what gets returned.
    pub async fn run(
        &mut self,
        service: &dyn ChatService,
        channel_id: &str,
        pages: &[WikiPage],
        index_url: &str,
    ) -> anyhow::Result<()> {
        service
            .connect()
            .await
            .context("failed to connect to Discord")?;

        let result = self.publish(service, channel_id, pages, index_url).await;

        info!("Logging out...");
        if let Err(e) = service.disconnect().await {
            warn!(error = %e, "failed to close discord session");
        }

        result
    }

    /// Replace the channel's history with the wiki. Requires a connected service.
    ///
    /// Every publish starts the palette over, so the header always gets the
    /// first color.
    pub async fn publish(
        &mut self,
        service: &dyn ChatService,
        channel_id: &str,
        pages: &[WikiPage],
        index_url: &str,
    ) -> anyhow::Result<()> {
        self.palette = Palette::new();
        let channel = resolve_text_channel(service, channel_id).await?;

        info!(
            "Wiping channel: {} in guild {}",
            channel.display_name(),
            channel.guild_id.as_deref().unwrap_or("-")
        );
        match wipe_channel(service, &channel.id).await {
            Ok(deleted) => info!("{} channel wiped ({} messages)", channel.display_name(), deleted),
            Err(e) => error!("failed to wipe {}: {:#}", channel.display_name(), e),
        }

        let header = self.header_embed();
        service
            .send(&channel.id, &Outbound::Embed(header))
            .await
            .context("failed to send wiki header card")?;

        for page in pages {
            let embed = self.page_embed(page);
            service
                .send(&channel.id, &Outbound::Embed(embed))
                .await
                .with_context(|| format!("failed to send card for {}", page.path.display()))?;
        }

        info!("Wiki url is at: {}", index_url);
        service
            .send(&channel.id, &Outbound::Text(trailer_text(index_url)))
            .await
            .context("failed to send wiki link")?;

        Ok(())
    }

    /// The opening card, built from config rather than any document.
    pub fn header_embed(&mut self) -> Embed {
        Embed {
            title: truncate_string(&self.header.title, EMBED_TITLE_MAX),
            description: Some(self.header.description.clone()),
            url: None,
            color: Some(self.palette.next_color().rgb),
            thumbnail: self
                .header
                .icon_url
                .clone()
                .map(|url| EmbedThumbnail { url }),
        }
    }

    pub fn page_embed(&mut self, page: &WikiPage) -> Embed {
        Embed {
            title: truncate_string(&page.title, EMBED_TITLE_MAX),
            description: Some(page.body.clone()),
            url: Some(page.url.clone()),
            color: Some(self.palette.next_color().rgb),
            thumbnail: None,
        }
    }
}

/// Final plain-text message pointing at the full wiki.
pub fn trailer_text(index_url: &str) -> String {
    format!("You can find our wiki in full here: {index_url}")
}

async fn resolve_text_channel(
    service: &dyn ChatService,
    channel_id: &str,
) -> anyhow::Result<ChannelInfo> {
    let channel = service
        .resolve_channel(channel_id)
        .await
        .context("failed to look up channel")?
        .ok_or_else(|| PublishError::ChannelNotFound(channel_id.to_string()))?;

    if !channel.is_text() {
        return Err(PublishError::NotTextChannel {
            id: channel.id,
            kind: channel.kind,
        }
        .into());
    }
    Ok(channel)
}

/// Delete the channel's history, one page of up to 100 messages at a time.
///
/// Rounds continue while the last fetch returned at least two messages, so
/// an empty or single-message channel takes exactly one round. Returns the
/// number of messages deleted.
pub async fn wipe_channel(service: &dyn ChatService, channel_id: &str) -> anyhow::Result<usize> {
    let mut deleted = 0;
    loop {
        let fetched = service.fetch_messages(channel_id, WIPE_BATCH).await?;
        match fetched.as_slice() {
            [] => {}
            [only] => service.delete_message(channel_id, only).await?,
            ids => service.bulk_delete(channel_id, ids).await?,
        }
        deleted += fetched.len();

        if fetched.len() < 2 {
            break;
        }
    }
    Ok(deleted)
}
