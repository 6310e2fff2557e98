//! Alert events as observed on the feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::AlertCategory;

/// A point-in-time alert observation.
///
/// Created once per poll cycle (or by manual injection) and discarded after
/// processing. The observation timestamp feeds the deduplication time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub category: AlertCategory,
    /// Affected area names, in feed order.
    pub area_names: Vec<String>,
    /// Free-text civil-defense instructions from the feed.
    pub instructions: String,
    pub observed_at: DateTime<Utc>,
}

impl AlertEvent {
    /// Create an event observed now.
    pub fn new(
        category: AlertCategory,
        area_names: Vec<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            category,
            area_names,
            instructions: instructions.into(),
            observed_at: Utc::now(),
        }
    }

    /// Pin the observation timestamp, mainly for tests and replays.
    pub fn with_observed_at(mut self, observed_at: DateTime<Utc>) -> Self {
        self.observed_at = observed_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_with_observed_at() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let event = AlertEvent::new(AlertCategory::Missiles, vec!["Ashdod".into()], "")
            .with_observed_at(at);
        assert_eq!(event.observed_at, at);
        assert_eq!(event.category, AlertCategory::Missiles);
    }
}
