//! Logging report sink.

use alert_core::{async_trait, AlertReport, ReportSink};
use tracing::{info, warn};

/// Sink that writes each finished report to the log, one line per station.
pub struct LogReportSink;

#[async_trait]
impl ReportSink for LogReportSink {
    async fn on_report(&self, report: &AlertReport) {
        info!(
            category = %report.category,
            areas = ?report.area_names,
            dispatched = report.dispatched,
            total = report.summary.total,
            success = report.summary.success,
            failed = report.summary.failed,
            skipped = report.summary.skipped,
            "alert report"
        );
        for outcome in &report.outcomes {
            if outcome.success {
                // server_used is always set on success
                if let Some(server) = outcome.server_used {
                    info!(
                        station = %outcome.station.display_name,
                        code = %outcome.station.station_code,
                        cluster = %server.cluster,
                        port = server.port,
                        "station notified"
                    );
                }
            } else if outcome.skipped {
                info!(
                    station = %outcome.station.display_name,
                    "station skipped"
                );
            } else {
                warn!(
                    station = %outcome.station.display_name,
                    cluster = %outcome.station.cluster,
                    error = outcome.error.as_deref().unwrap_or("unknown"),
                    "station dispatch failed"
                );
            }
        }
    }
}
