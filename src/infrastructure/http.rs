//! # HTTP Probe
//!
//! Implements the `StatusProbe` trait with a shared `reqwest` client. Balancer
//! responses are fetched as text and decoded explicitly so parse failures
//! carry the endpoint in their context.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::traits::StatusProbe;
use crate::domain::types::FarmStatus;

pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// `timeout` caps each individual request; the aggregator enforces its own
    /// per-pipeline bound on top of it.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl StatusProbe for HttpProbe {
    async fn farm_status(&self, endpoint: &str) -> Result<FarmStatus> {
        let body = self
            .client
            .get(endpoint)
            .send()
            .await
            .with_context(|| format!("balancer request to {endpoint} failed"))?
            .text()
            .await
            .with_context(|| format!("balancer response from {endpoint} unreadable"))?;

        serde_json::from_str(&body)
            .with_context(|| format!("balancer response from {endpoint} did not parse"))
    }

    async fn host_banner(&self, host: &str) -> Result<String> {
        let url = format!("http://{host}/");
        self.client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("banner request to {host} failed"))?
            .text()
            .await
            .with_context(|| format!("banner response from {host} unreadable"))
    }
}
