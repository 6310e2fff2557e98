//! Pipeline configuration.

use std::collections::HashSet;
use std::time::Duration;

use alert_core::AlertCategory;

use crate::dedup::DedupConfig;

/// Knobs for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Poll cadence. Ticks that fire while a cycle is still running are
    /// skipped, never queued.
    pub poll_interval: Duration,
    /// Resolve and report only; never open station connections.
    pub dry_run: bool,
    /// Categories an operator has muted: admitted events of these
    /// categories are resolved and reported but not dispatched.
    pub muted_categories: HashSet<AlertCategory>,
    pub dedup: DedupConfig,
}

impl PipelineConfig {
    pub fn is_muted(&self, category: AlertCategory) -> bool {
        self.muted_categories.contains(&category)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            dry_run: false,
            muted_categories: HashSet::new(),
            dedup: DedupConfig::default(),
        }
    }
}
