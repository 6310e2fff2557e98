//! Per-station dispatch outcomes and the aggregated alert report.

use serde::{Deserialize, Serialize};

use crate::category::AlertCategory;
use crate::event::AlertEvent;
use crate::station::{ServerCluster, Station};

/// The cluster endpoint that actually answered for a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerUsed {
    pub cluster: ServerCluster,
    pub port: u16,
}

/// Result of one (event, station) dispatch attempt.
///
/// Produced exactly once per resolved station. A `skipped` outcome means the
/// event's category maps to no protocol code (or dispatch was suppressed);
/// no connection was opened and the station neither succeeded nor failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub station: Station,
    pub success: bool,
    /// Set on success: which cluster endpoint answered.
    pub server_used: Option<ServerUsed>,
    /// Set on failure: the last per-port error.
    pub error: Option<String>,
    pub skipped: bool,
}

impl DispatchOutcome {
    /// The station was notified through the given cluster port.
    pub fn succeeded(station: Station, cluster: ServerCluster, port: u16) -> Self {
        Self {
            station,
            success: true,
            server_used: Some(ServerUsed { cluster, port }),
            error: None,
            skipped: false,
        }
    }

    /// Every port for the station's cluster failed.
    pub fn failed(station: Station, error: impl Into<String>) -> Self {
        Self {
            station,
            success: false,
            server_used: None,
            error: Some(error.into()),
            skipped: false,
        }
    }

    /// No connection was opened for this station.
    pub fn skipped(station: Station) -> Self {
        Self {
            station,
            success: false,
            server_used: None,
            error: None,
            skipped: true,
        }
    }
}

/// Aggregate counts over a batch of outcomes.
///
/// `failed` counts stations whose ports all failed; skipped stations are
/// counted separately and are neither successes nor failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl DispatchSummary {
    /// Tally a batch of outcomes.
    pub fn of(outcomes: &[DispatchOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            if outcome.skipped {
                summary.skipped += 1;
            } else if outcome.success {
                summary.success += 1;
            } else {
                summary.failed += 1;
            }
        }
        summary
    }
}

/// Everything the reporting layer learns about one admitted event.
///
/// Emitted to every subscribed [`ReportSink`](crate::ReportSink) after the
/// dispatch batch (if any) has fully drained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertReport {
    pub category: AlertCategory,
    pub area_names: Vec<String>,
    pub instructions: String,
    /// False when no station resolved or dispatch was suppressed
    /// (dry-run / muted category).
    pub dispatched: bool,
    pub outcomes: Vec<DispatchOutcome>,
    pub summary: DispatchSummary,
}

impl AlertReport {
    /// Build a report for an event, computing the summary from the outcomes.
    pub fn new(event: &AlertEvent, dispatched: bool, outcomes: Vec<DispatchOutcome>) -> Self {
        let summary = DispatchSummary::of(&outcomes);
        Self {
            category: event.category,
            area_names: event.area_names.clone(),
            instructions: event.instructions.clone(),
            dispatched,
            outcomes,
            summary,
        }
    }
}
