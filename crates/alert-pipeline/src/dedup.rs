//! Suppression of repeated reports of the same active event.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use alert_core::{AlertCategory, AlertEvent};
use tracing::debug;

/// Bucketing and expiry knobs for the deduplicator.
///
/// The two constants are independent: a repeat report keys identically only
/// while its observation falls in the same coarse time bucket, and a key is
/// forgotten once its lifetime elapses. Consequences worth knowing:
///
/// - repeats inside one bucket are suppressed for the whole `ttl`, so a
///   feed that re-reports an active event every poll stays quiet;
/// - an identical event observed in a *different* bucket forms a new key
///   and is admitted again, even inside the earlier key's lifetime.
///
/// Defaults (10s buckets, 60s lifetime) match the upstream feed's
/// re-reporting behavior.
#[derive(Debug, Clone)]
pub struct DedupConfig {
    pub bucket: Duration,
    pub ttl: Duration,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            bucket: Duration::from_secs(10),
            ttl: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupKey {
    category: AlertCategory,
    /// Area names sorted, so feed ordering differences don't split keys.
    areas: Vec<String>,
    bucket: i64,
}

/// Presence set over `(category, sorted areas, time bucket)` with a TTL.
///
/// Mutated only by the pipeline's single poll loop, so it needs no lock;
/// expired entries are purged on every admission.
#[derive(Debug)]
pub struct Deduplicator {
    config: DedupConfig,
    entries: HashMap<DedupKey, Instant>,
}

impl Deduplicator {
    pub fn new(config: DedupConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    /// True if the event should be processed, false if it repeats a
    /// still-active occurrence. Admission records the event.
    pub fn admit(&mut self, event: &AlertEvent) -> bool {
        self.admit_at(event, Instant::now())
    }

    fn admit_at(&mut self, event: &AlertEvent, now: Instant) -> bool {
        let ttl = self.config.ttl;
        self.entries.retain(|_, seen| now.duration_since(*seen) < ttl);

        let key = self.key_for(event);
        if self.entries.contains_key(&key) {
            debug!(
                category = %event.category,
                areas = ?event.area_names,
                "event already processed, suppressing"
            );
            return false;
        }
        self.entries.insert(key, now);
        true
    }

    /// Number of live (unexpired at last admission) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key_for(&self, event: &AlertEvent) -> DedupKey {
        let mut areas = event.area_names.clone();
        areas.sort();
        let bucket_secs = self.config.bucket.as_secs().max(1) as i64;
        DedupKey {
            category: event.category,
            areas,
            bucket: event.observed_at.timestamp() / bucket_secs,
        }
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(DedupConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event_at(secs: i64, areas: &[&str]) -> AlertEvent {
        AlertEvent::new(
            AlertCategory::Missiles,
            areas.iter().map(|a| a.to_string()).collect(),
            "",
        )
        .with_observed_at(Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[test]
    fn test_admit_then_suppress() {
        let mut dedup = Deduplicator::default();
        let now = Instant::now();
        let event = event_at(1_000_000, &["Ashdod"]);

        assert!(dedup.admit_at(&event, now));
        assert!(!dedup.admit_at(&event, now + Duration::from_secs(3)));
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn test_readmitted_after_ttl() {
        let mut dedup = Deduplicator::default();
        let now = Instant::now();
        let event = event_at(1_000_000, &["Ashdod"]);

        assert!(dedup.admit_at(&event, now));
        assert!(!dedup.admit_at(&event, now + Duration::from_secs(59)));
        assert!(dedup.admit_at(&event, now + Duration::from_secs(61)));
    }

    #[test]
    fn test_area_order_does_not_split_keys() {
        let mut dedup = Deduplicator::default();
        let now = Instant::now();

        assert!(dedup.admit_at(&event_at(1_000_000, &["Ashdod", "Yavne"]), now));
        assert!(!dedup.admit_at(&event_at(1_000_000, &["Yavne", "Ashdod"]), now));
    }

    #[test]
    fn test_different_bucket_is_a_new_occurrence() {
        let mut dedup = Deduplicator::default();
        let now = Instant::now();

        // 1_000_000 and 1_000_009 share the 10s bucket; 1_000_010 does not
        assert!(dedup.admit_at(&event_at(1_000_000, &["Ashdod"]), now));
        assert!(!dedup.admit_at(&event_at(1_000_009, &["Ashdod"]), now));
        assert!(dedup.admit_at(&event_at(1_000_010, &["Ashdod"]), now));
    }

    #[test]
    fn test_different_category_is_distinct() {
        let mut dedup = Deduplicator::default();
        let now = Instant::now();
        let missiles = event_at(1_000_000, &["Ashdod"]);
        let mut quake = missiles.clone();
        quake.category = AlertCategory::Earthquake;

        assert!(dedup.admit_at(&missiles, now));
        assert!(dedup.admit_at(&quake, now));
    }

    #[test]
    fn test_expired_entries_are_purged() {
        let mut dedup = Deduplicator::default();
        let now = Instant::now();

        assert!(dedup.admit_at(&event_at(1_000_000, &["Ashdod"]), now));
        assert!(dedup.admit_at(&event_at(1_000_020, &["Yavne"]), now + Duration::from_secs(90)));
        // The first entry aged out during the second admission
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn test_custom_bucket_width() {
        let mut dedup = Deduplicator::new(DedupConfig {
            bucket: Duration::from_secs(2),
            ttl: Duration::from_secs(60),
        });
        let now = Instant::now();

        assert!(dedup.admit_at(&event_at(1_000_000, &["Ashdod"]), now));
        assert!(dedup.admit_at(&event_at(1_000_002, &["Ashdod"]), now));
    }
}
