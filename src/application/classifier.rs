//! # Status Classifier
//!
//! Maps a region's raw balancer payload to a [`VariantState`]. The farm name
//! embeds the live variant as a case-sensitive substring; anything else, or a
//! failed query, classifies as `Unknown`.

use crate::domain::config::RegionConfig;
use crate::domain::traits::StatusProbe;
use crate::domain::types::VariantState;

/// Result of classifying one region. `failed` is set when the balancer could
/// not be queried or parsed, as opposed to answering with an unrecognized farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub state: VariantState,
    pub failed: bool,
}

/// Pure mapping from a farm name to a variant. Case-sensitive by contract:
/// balancers report lowercase variant markers in the farm name.
pub fn classify_farm(name: &str) -> VariantState {
    if name.contains("blue") {
        VariantState::Blue
    } else if name.contains("green") {
        VariantState::Green
    } else {
        VariantState::Unknown
    }
}

/// Query a region's balancer and classify its active farm.
///
/// Transport and parse errors are captured, not propagated: the region ends up
/// `Unknown` with the failure flag set so the caller can tell it apart from an
/// explicitly unrecognized farm name.
pub async fn classify(probe: &dyn StatusProbe, region: &RegionConfig) -> Classification {
    match probe.farm_status(&region.endpoint).await {
        Ok(status) => {
            let state = status
                .farms
                .first()
                .map(|farm| classify_farm(&farm.name))
                .unwrap_or(VariantState::Unknown);
            Classification {
                state,
                failed: false,
            }
        }
        Err(err) => {
            tracing::warn!("Balancer query for region '{}' failed: {err:#}", region.name);
            Classification {
                state: VariantState::Unknown,
                failed: true,
            }
        }
    }
}
