//! # Command Router
//!
//! Routes an inbound mention to the capability it asks for: the status query
//! (which triggers a full aggregation cycle), the help text, or the fallback
//! reply. The invoker's display name is resolved first; that lookup is the one
//! failure that aborts the command, since no reply can be personalized
//! without it.

use anyhow::{Result, anyhow};
use tokio_util::sync::CancellationToken;

use crate::application::aggregator::RegionAggregator;
use crate::application::formatter;
use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use crate::domain::types::Intent;

pub struct CommandRouter {
    config: AppConfig,
    aggregator: RegionAggregator,
    cancel: CancellationToken,
}

impl CommandRouter {
    pub fn new(config: AppConfig, aggregator: RegionAggregator, cancel: CancellationToken) -> Self {
        Self {
            config,
            aggregator,
            cancel,
        }
    }

    pub async fn route<C>(&self, chat: &C, message: &str, sender: &str) -> Result<()>
    where
        C: ChatProvider,
    {
        let invoker = chat
            .resolve_display_name(sender)
            .await
            .map_err(|e| anyhow!("failed to resolve display name for {sender}: {e}"))?;

        let intent = Intent::of_text(message);
        tracing::info!(
            "Router dispatching intent={intent:?} invoker='{invoker}' room='{}'",
            chat.room_id()
        );

        let reply = match intent {
            Intent::ActiveNode => {
                let report = self.aggregator.aggregate(&self.cancel).await;
                formatter::format_status(&invoker, &self.config.regions, &report, &self.config.query)
            }
            Intent::Help => formatter::format_help(&invoker, &self.config.query),
            Intent::Fallback => formatter::format_fallback(&invoker, &self.config.query),
        };

        chat.send_reply(&reply)
            .await
            .map_err(|e| anyhow!("failed to post reply: {e}"))?;

        Ok(())
    }
}
