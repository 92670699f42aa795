//! # Region Aggregator
//!
//! Fans one classify+lookup pipeline out per configured region, joins them
//! all, and produces the per-region report. Pipelines run as independent tokio
//! tasks; each is bounded by a per-pipeline timeout and aborted when the
//! dispatch loop's cancellation token fires. The report always holds exactly
//! one entry per configured region, keyed by region name.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::application::{classifier, detail};
use crate::domain::config::{AppConfig, RegionConfig};
use crate::domain::traits::StatusProbe;
use crate::domain::types::{AggregateReport, RegionResult};

pub struct RegionAggregator {
    regions: Arc<Vec<RegionConfig>>,
    probe: Arc<dyn StatusProbe>,
    timeout: Duration,
}

impl RegionAggregator {
    pub fn new(config: &AppConfig, probe: Arc<dyn StatusProbe>) -> Self {
        Self {
            regions: Arc::new(config.regions.clone()),
            probe,
            timeout: Duration::from_secs(config.query.timeout_secs),
        }
    }

    /// Run one full aggregation cycle across all configured regions.
    ///
    /// Never fails: a region whose pipeline errors, times out, or is cancelled
    /// contributes an unresolved marker instead of being omitted.
    pub async fn aggregate(&self, cancel: &CancellationToken) -> AggregateReport {
        let mut tasks = JoinSet::new();

        for region in self.regions.iter().cloned() {
            let probe = self.probe.clone();
            let cancel = cancel.clone();
            let timeout = self.timeout;

            tasks.spawn(async move {
                let name = region.name.clone();
                let pipeline = run_pipeline(probe.as_ref(), &region);

                let result = tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!("Aggregation for region '{name}' cancelled");
                        RegionResult::unresolved(&name)
                    }
                    outcome = tokio::time::timeout(timeout, pipeline) => match outcome {
                        Ok(result) => result,
                        Err(_) => {
                            tracing::warn!("Pipeline for region '{name}' timed out");
                            RegionResult::unresolved(&name)
                        }
                    }
                };
                (name, result)
            });
        }

        let mut report = AggregateReport::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((name, result)) => {
                    report.insert(name, result);
                }
                Err(err) => {
                    tracing::error!("Region pipeline task lost: {err}");
                }
            }
        }

        // Every configured region must be represented, even if its task was
        // lost to a panic.
        for region in self.regions.iter() {
            report
                .entry(region.name.clone())
                .or_insert_with(|| RegionResult::unresolved(&region.name));
        }

        report
    }
}

/// One region's two-step pipeline: classify the active variant, then look up
/// the build on the host serving it. An unclassifiable region has no host to
/// ask, so its detail stays empty.
async fn run_pipeline(probe: &dyn StatusProbe, region: &RegionConfig) -> RegionResult {
    let classification = classifier::classify(probe, region).await;

    let build = match classification.state.host(&region.hosts) {
        Some(host) => detail::lookup(probe, host).await,
        None => String::new(),
    };

    RegionResult {
        region: region.name.clone(),
        state: classification.state,
        build,
        failed: classification.failed,
    }
}
