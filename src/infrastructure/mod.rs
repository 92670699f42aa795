//! # Infrastructure Layer
//!
//! Handles interactions with external systems: the Matrix transport and the
//! HTTP probes. Implements the traits defined in the Domain layer.

pub mod http;
pub mod matrix;
