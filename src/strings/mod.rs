//! # Strings Module
//!
//! Centralizes user-facing strings and reply templates.

pub mod messages;
