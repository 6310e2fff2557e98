//! HTTP client for the public alert feed.

use std::time::Duration;

use alert_core::{async_trait, AlertCategory, AlertEvent, AlertSource, SourceError};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Public alerts endpoint. Returns an empty (or whitespace) body while no
/// alert is active, and a small JSON object during one.
pub const DEFAULT_ALERTS_URL: &str =
    "https://www.oref.org.il/WarningMessages/alert/alerts.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The feed's active-alert payload.
#[derive(Debug, Deserialize)]
struct FeedPayload {
    /// Numeric category, serialized as a string ("1", "101", ...).
    cat: String,
    /// Affected area names.
    #[serde(default)]
    data: Vec<String>,
    /// Civil-defense instructions.
    #[serde(default)]
    desc: String,
}

/// Map the feed's numeric category to ours.
///
/// Drill categories are the real category plus 100. Anything unrecognized
/// maps to [`AlertCategory::Unknown`], which still dispatches with the
/// rocket-fire code.
fn category_from_cat(cat: &str) -> AlertCategory {
    match cat.trim() {
        "1" => AlertCategory::Missiles,
        "3" => AlertCategory::Earthquake,
        "4" => AlertCategory::RadiologicalEvent,
        "5" => AlertCategory::Tsunami,
        "6" => AlertCategory::HostileAircraftIntrusion,
        "7" => AlertCategory::HazardousMaterials,
        "8" => AlertCategory::TerroristInfiltration,
        "13" => AlertCategory::NewsFlash,
        "101" => AlertCategory::MissilesDrill,
        "103" => AlertCategory::EarthquakeDrill,
        "104" => AlertCategory::RadiologicalEventDrill,
        "105" => AlertCategory::TsunamiDrill,
        "106" => AlertCategory::HostileAircraftIntrusionDrill,
        "107" => AlertCategory::HazardousMaterialsDrill,
        "108" => AlertCategory::TerroristInfiltrationDrill,
        _ => AlertCategory::Unknown,
    }
}

/// [`AlertSource`] backed by the public alerts endpoint.
pub struct OrefAlertSource {
    client: Client,
    url: String,
}

impl OrefAlertSource {
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SourceError::Request(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    fn parse_body(body: &str) -> Result<Option<AlertEvent>, SourceError> {
        let body = body.trim_start_matches('\u{feff}').trim();
        if body.is_empty() {
            return Ok(None);
        }
        let payload: FeedPayload =
            serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;
        let category = category_from_cat(&payload.cat);
        Ok(Some(AlertEvent::new(category, payload.data, payload.desc)))
    }
}

#[async_trait]
impl AlertSource for OrefAlertSource {
    async fn current_alert(&self) -> Result<Option<AlertEvent>, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Referer", "https://www.oref.org.il/")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout(REQUEST_TIMEOUT)
                } else {
                    SourceError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Request(format!(
                "feed answered with status {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;
        debug!(bytes = body.len(), "feed polled");
        Self::parse_body(&body)
    }

    fn name(&self) -> &str {
        "OrefAlertSource"
    }
}

/// Source that never reports an alert. The simulate subcommand builds its
/// pipeline around this and injects the event manually.
pub struct IdleSource;

#[async_trait]
impl AlertSource for IdleSource {
    async fn current_alert(&self) -> Result<Option<AlertEvent>, SourceError> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "IdleSource"
    }
}
