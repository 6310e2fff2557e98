//! The pipeline itself: poll loop, cycle processing, injection.

use std::collections::HashSet;
use std::sync::Arc;

use alert_core::{
    AlertEvent, AlertReport, AlertSource, DispatchOutcome, ReportSink, Station,
};
use station_index::StationIndex;
use telnet_dispatch::TelnetDispatcher;
use tokio::sync::{watch, RwLock};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::dedup::Deduplicator;
use crate::error::PipelineError;
use crate::stats::PipelineStats;

/// Control and observation handle for a running pipeline.
///
/// Cheap to clone; outlives the pipeline it was taken from.
#[derive(Debug, Clone)]
pub struct PipelineHandle {
    stop: watch::Sender<bool>,
    stats: Arc<RwLock<PipelineStats>>,
}

impl PipelineHandle {
    /// Request a stop. No new poll cycle starts after this; a cycle that is
    /// already dispatching drains to completion.
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }

    /// Snapshot of the running counters.
    pub async fn stats(&self) -> PipelineStats {
        *self.stats.read().await
    }
}

/// Orchestrates poll -> dedup -> resolve -> dispatch -> report.
///
/// The loop is cooperative: one cycle at a time, never concurrent with
/// itself. Dispatch *within* a cycle fans out per cluster (see
/// [`TelnetDispatcher`]), but the cycle only completes once every outcome
/// is in.
pub struct AlertPipeline {
    source: Arc<dyn AlertSource>,
    index: StationIndex,
    dispatcher: TelnetDispatcher,
    dedup: Deduplicator,
    sinks: Vec<Arc<dyn ReportSink>>,
    config: PipelineConfig,
    stats: Arc<RwLock<PipelineStats>>,
    stop: watch::Sender<bool>,
    stopped: watch::Receiver<bool>,
}

impl AlertPipeline {
    pub fn new(
        source: Arc<dyn AlertSource>,
        index: StationIndex,
        dispatcher: TelnetDispatcher,
        config: PipelineConfig,
    ) -> Self {
        let (stop, stopped) = watch::channel(false);
        let dedup = Deduplicator::new(config.dedup.clone());
        Self {
            source,
            index,
            dispatcher,
            dedup,
            sinks: Vec::new(),
            config,
            stats: Arc::new(RwLock::new(PipelineStats::default())),
            stop,
            stopped,
        }
    }

    /// Subscribe a report sink. Must happen before [`run`](Self::run);
    /// sinks are a constructor-time extension point, not a runtime rebind.
    pub fn subscribe(&mut self, sink: Arc<dyn ReportSink>) {
        self.sinks.push(sink);
    }

    /// Control handle, valid for the lifetime of the process.
    pub fn handle(&self) -> PipelineHandle {
        PipelineHandle {
            stop: self.stop.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Drive the poll loop until a stop request.
    ///
    /// Cycles run strictly one at a time; interval ticks that fire while a
    /// cycle is still in flight are skipped, so a slow dispatch batch never
    /// causes overlapping bursts.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut stopped = self.stopped.clone();

        info!(
            source = self.source.name(),
            stations = self.index.len(),
            interval = ?self.config.poll_interval,
            dry_run = self.config.dry_run,
            "alert pipeline started"
        );

        loop {
            tokio::select! {
                _ = stopped.changed() => {
                    if *stopped.borrow() {
                        break;
                    }
                }
                _ = interval.tick() => {
                    self.run_cycle().await;
                }
            }
        }

        let stats = *self.stats.read().await;
        info!(
            scans = stats.scan_count,
            alerts = stats.alert_count,
            sent_ok = stats.sent_ok,
            sent_failed = stats.sent_failed,
            "alert pipeline stopped"
        );
    }

    /// One poll cycle. Source errors end the cycle without touching dedup
    /// state; everything else flows through [`process`](Self::process).
    async fn run_cycle(&mut self) {
        self.stats.write().await.scan_count += 1;

        let event = match self.source.current_alert().await {
            Ok(Some(event)) => event,
            Ok(None) => {
                debug!("no active alert");
                return;
            }
            Err(error) => {
                warn!(error = %error, "alert source poll failed, skipping cycle");
                return;
            }
        };

        if event.category.is_none() {
            debug!("source reported the none category, ignoring");
            return;
        }
        if !self.dedup.admit(&event) {
            return;
        }

        info!(
            category = %event.category,
            areas = ?event.area_names,
            "alert admitted"
        );
        let report = self.process(&event).await;
        self.record(&report).await;
        self.emit(&report).await;
    }

    /// Inject an externally built event, running it through resolution and
    /// dispatch exactly as a polled one. `dry_run` suppresses only the
    /// socket work; the pipeline's own dry-run setting also applies.
    pub async fn inject(
        &mut self,
        event: AlertEvent,
        dry_run: bool,
    ) -> Result<AlertReport, PipelineError> {
        if event.category.is_none() {
            return Err(PipelineError::NoneCategory);
        }
        if !self.dedup.admit(&event) {
            return Err(PipelineError::Duplicate);
        }

        info!(
            category = %event.category,
            areas = ?event.area_names,
            dry_run,
            "injected alert admitted"
        );
        let report = if dry_run {
            let stations = self.resolve_all(&event.area_names);
            Self::suppressed_report(&event, stations)
        } else {
            self.process(&event).await
        };
        self.record(&report).await;
        self.emit(&report).await;
        Ok(report)
    }

    /// Resolve and, unless suppressed, dispatch an admitted event.
    async fn process(&self, event: &AlertEvent) -> AlertReport {
        let stations = self.resolve_all(&event.area_names);
        if stations.is_empty() {
            // Not an error: no station serves the affected areas. Worth a
            // warning because it usually means a registry gap.
            warn!(
                areas = ?event.area_names,
                "no stations resolved for affected areas"
            );
            return AlertReport::new(event, false, Vec::new());
        }

        if self.config.dry_run || self.config.is_muted(event.category) {
            info!(
                category = %event.category,
                stations = stations.len(),
                muted = self.config.is_muted(event.category),
                "dispatch suppressed"
            );
            return Self::suppressed_report(event, stations);
        }

        let outcomes = self
            .dispatcher
            .send_to_stations(&stations, event.category)
            .await;
        AlertReport::new(event, true, outcomes)
    }

    /// Union of resolutions over all area names, deduplicated by serial in
    /// first-seen order.
    fn resolve_all(&self, area_names: &[String]) -> Vec<Station> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stations = Vec::new();
        for area in area_names {
            for station in self.index.resolve(area) {
                if seen.insert(station.serial.as_str()) {
                    stations.push(station.clone());
                }
            }
        }
        stations
    }

    /// Report for a resolved-but-not-dispatched event: every station is
    /// marked skipped, since no connection was opened.
    fn suppressed_report(event: &AlertEvent, stations: Vec<Station>) -> AlertReport {
        let outcomes = stations.into_iter().map(DispatchOutcome::skipped).collect();
        AlertReport::new(event, false, outcomes)
    }

    async fn record(&self, report: &AlertReport) {
        let mut stats = self.stats.write().await;
        stats.alert_count += 1;
        stats.sent_ok += report.summary.success as u64;
        stats.sent_failed += report.summary.failed as u64;
    }

    async fn emit(&self, report: &AlertReport) {
        for sink in &self.sinks {
            sink.on_report(report).await;
        }
    }
}
