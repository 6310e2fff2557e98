//! The report sink seam.

use async_trait::async_trait;

use crate::outcome::AlertReport;

/// Receiver of finished alert reports.
///
/// Sinks are subscribed on the pipeline before it runs; every admitted event
/// produces exactly one report, delivered to every sink after its dispatch
/// batch (if any) has drained. Sinks must not fail: anything that can go
/// wrong downstream is the sink's own concern.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn on_report(&self, report: &AlertReport);
}
