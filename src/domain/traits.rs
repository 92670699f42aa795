//! # Domain Traits
//!
//! Abstract interfaces for the external collaborators (chat transport, HTTP
//! probes). Allows for pluggable implementations in the Infrastructure layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::types::{FarmStatus, ReplyPayload};

/// Abstract interface for a Chat Provider (e.g., Matrix, Slack, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Deliver a rendered reply to the room
    async fn send_reply(&self, reply: &ReplyPayload) -> Result<String, String>;

    /// Resolve the display name of the user behind a transport-level id.
    /// Failure here aborts the command; no reply can be personalized without it.
    async fn resolve_display_name(&self, user_id: &str) -> Result<String, String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// Abstract interface over the two outbound queries a status cycle makes.
/// These are the only suspension points in the aggregation pipeline.
#[async_trait]
pub trait StatusProbe: Send + Sync {
    /// Query a region's balancer endpoint for its farm payload.
    async fn farm_status(&self, endpoint: &str) -> Result<FarmStatus>;

    /// Fetch the free-form banner text served by a host.
    async fn host_banner(&self, host: &str) -> Result<String>;
}
