// =============================================================================
// Post-processing — volume floor, metadata join, categorical filters
// =============================================================================
//
// Runs after the batch pipeline: snapshots pass the non-negotiable minimum
// volume bound, are joined against universe metadata (a missing join key
// drops the row, it never fails the run), and are then narrowed by any
// combination of categorical equality filters.
// =============================================================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::snapshot::Snapshot;
use crate::types::{AoMovement, Bias, CloudStatus};
use crate::universe::SymbolMeta;

/// One row of the final screener table: a snapshot plus its join metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenerRow {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    #[serde(rename = "Security")]
    pub security: String,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Sub_Industry")]
    pub sub_industry: String,
}

/// Equality filters over the snapshot's categorical fields, plus the volume
/// floor. `None` means "no constraint" for the categorical fields; the volume
/// bound always applies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenerFilter {
    #[serde(default)]
    pub min_volume: f64,
    #[serde(default)]
    pub cloud_status: Option<CloudStatus>,
    #[serde(default)]
    pub ao_interpretation: Option<Bias>,
    #[serde(default)]
    pub ao_movement: Option<AoMovement>,
    #[serde(default)]
    pub cahold_status: Option<Bias>,
}

impl ScreenerFilter {
    /// Exact-match test; a snapshot whose categorical field is undefined
    /// never matches a constraint on that field.
    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        if snapshot.volume <= self.min_volume {
            return false;
        }
        if let Some(want) = self.cloud_status {
            if snapshot.cloud_status != want {
                return false;
            }
        }
        if let Some(want) = self.ao_interpretation {
            if snapshot.ao_interpretation != Some(want) {
                return false;
            }
        }
        if let Some(want) = self.ao_movement {
            if snapshot.ao_movement != Some(want) {
                return false;
            }
        }
        if let Some(want) = self.cahold_status {
            if snapshot.cahold_status != Some(want) {
                return false;
            }
        }
        true
    }
}

/// Join snapshots against universe metadata, preserving table order.
///
/// A snapshot whose ticker has no metadata entry is dropped — the identifier
/// mismatch outcome, not a failure.
pub fn join_metadata(
    snapshots: Vec<Snapshot>,
    meta: &HashMap<String, SymbolMeta>,
) -> Vec<ScreenerRow> {
    snapshots
        .into_iter()
        .filter_map(|snapshot| match meta.get(&snapshot.ticker) {
            Some(m) => Some(ScreenerRow {
                security: m.security.clone(),
                sector: m.sector.clone(),
                sub_industry: m.sub_industry.clone(),
                snapshot,
            }),
            None => {
                debug!(ticker = %snapshot.ticker, "no universe metadata — dropping row");
                None
            }
        })
        .collect()
}

/// Apply the filter to joined rows, preserving order.
pub fn apply(rows: Vec<ScreenerRow>, filter: &ScreenerFilter) -> Vec<ScreenerRow> {
    rows.into_iter()
        .filter(|row| filter.matches(&row.snapshot))
        .collect()
}
