//! # Domain Types
//!
//! Core value types shared across the bot: variant classification, per-region
//! results, inbound event and intent classification, and the reply payload
//! handed to the chat transport.

use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::config::VariantHosts;

/// Which deployment variant a region's balancer reports as live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantState {
    Blue,
    Green,
    Unknown,
}

impl VariantState {
    /// Human-readable label used in replies and indicator mapping.
    pub fn label(&self) -> &'static str {
        match self {
            VariantState::Blue => "Blue",
            VariantState::Green => "Green",
            VariantState::Unknown => "Unknown",
        }
    }

    /// Select the host authoritative for this variant, if one exists.
    /// `Unknown` has no host; the caller must substitute an unresolved result.
    pub fn host<'a>(&self, hosts: &'a VariantHosts) -> Option<&'a str> {
        match self {
            VariantState::Blue => Some(&hosts.blue),
            VariantState::Green => Some(&hosts.green),
            VariantState::Unknown => None,
        }
    }
}

/// Balancer response payload. The active farm's name embeds the live variant
/// as a substring, e.g. `site1.domain.com-green`.
#[derive(Debug, Deserialize)]
pub struct FarmStatus {
    #[serde(default)]
    pub farms: Vec<Farm>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct Farm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: String,
}

/// Outcome of one region's classify+lookup pipeline.
///
/// `failed` distinguishes "the balancer answered with an unrecognized variant"
/// (false) from "the query could not complete at all" (true).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionResult {
    pub region: String,
    pub state: VariantState,
    pub build: String,
    pub failed: bool,
}

impl RegionResult {
    /// Marker result for a region whose pipeline could not produce an answer
    /// (transport failure, timeout, cancellation, or task loss).
    pub fn unresolved(region: &str) -> Self {
        Self {
            region: region.to_string(),
            state: VariantState::Unknown,
            build: String::new(),
            failed: true,
        }
    }
}

/// One completed aggregation cycle, keyed by region name.
/// Holds exactly one entry per configured region.
pub type AggregateReport = HashMap<String, RegionResult>;

/// The classified purpose of an inbound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ActiveNode,
    Help,
    Fallback,
}

impl Intent {
    /// Classify command text by case-insensitive substring match.
    ///
    /// Precedence is fixed: the status-query keywords win over `help`, so a
    /// message containing both resolves to the status query.
    pub fn of_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("active_node") || text.contains("!an") {
            Intent::ActiveNode
        } else if text.contains("help") {
            Intent::Help
        } else {
            Intent::Fallback
        }
    }
}

/// Closed set of inbound events the dispatch loop recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// The bot was addressed directly; carries the raw text and sender id.
    Mention { text: String, sender: String },
    /// Anything else in the room; ignored.
    Other,
}

impl InboundEvent {
    /// Classify a room message: it is a mention when the text contains the
    /// bot's name (case-insensitive).
    pub fn classify(text: &str, sender: &str, bot_name: &str) -> Self {
        if !bot_name.is_empty() && text.to_lowercase().contains(&bot_name.to_lowercase()) {
            InboundEvent::Mention {
                text: text.to_string(),
                sender: sender.to_string(),
            }
        } else {
            InboundEvent::Other
        }
    }
}

/// A fully rendered reply ready for delivery. The accent color is opaque to
/// the core; the transport decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPayload {
    pub text: String,
    pub accent: Option<String>,
}
