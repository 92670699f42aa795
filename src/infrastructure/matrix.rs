//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the
//! `matrix_sdk`. Bridges the generic interface used by the bot's core logic
//! to the specific implementation details of the Matrix SDK.

use async_trait::async_trait;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::UserId;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;
use std::convert::TryFrom;

use crate::domain::traits::ChatProvider;
use crate::domain::types::ReplyPayload;

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_reply(&self, reply: &ReplyPayload) -> Result<String, String> {
        tracing::info!("Bot sending reply to {}: {}", self.room_id(), reply.text);
        if let Some(accent) = &reply.accent {
            // Matrix messages carry no accent attribute; noted for parity with
            // transports that render it.
            tracing::debug!("Reply accent {accent} not rendered by Matrix transport");
        }
        self.room
            .send(RoomMessageEventContent::text_markdown(&reply.text))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn resolve_display_name(&self, user_id: &str) -> Result<String, String> {
        let user_id = <&UserId>::try_from(user_id).map_err(|e| e.to_string())?;
        let member = self
            .room
            .get_member(user_id)
            .await
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("{user_id} is not a member of {}", self.room_id()))?;
        Ok(member.name().to_string())
    }
}
