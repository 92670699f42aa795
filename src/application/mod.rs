//! # Application Layer
//!
//! Core logic of the bot: intent routing, the concurrent region aggregation
//! pipeline, and reply formatting.

pub mod aggregator;
pub mod classifier;
pub mod detail;
pub mod formatter;
pub mod router;
