//! The area-name index over the station list.

use std::collections::HashSet;
use std::str::FromStr;

use alert_core::{ServerCluster, Station};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::RegistryError;
use crate::normalize::{match_tokens, normalize};
use crate::registry::StationRecord;

/// Width of the zero-padded numeric station code on the wire.
pub const STATION_CODE_WIDTH: usize = 3;

/// Immutable name-to-station lookup, rebuilt wholesale from the registry.
///
/// Every station appears in exactly one bucket (keyed by its normalized
/// area name) and exactly once in the full list; multiple stations may
/// legitimately share one area name. Bucket order is first-seen, which
/// makes fallback scans deterministic.
#[derive(Debug)]
pub struct StationIndex {
    stations: Vec<Station>,
    /// Normalized area name -> indexes into `stations`.
    buckets: IndexMap<String, Vec<usize>>,
}

impl StationIndex {
    /// Validate registry records and build the index.
    ///
    /// Rejects records with missing required fields, non-numeric station
    /// codes, unknown cluster letters, or duplicate serials. Station codes
    /// are zero-padded to [`STATION_CODE_WIDTH`] here so the rest of the
    /// system never sees an unpadded code.
    pub fn build(records: Vec<StationRecord>) -> Result<Self, RegistryError> {
        if records.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut stations = Vec::with_capacity(records.len());
        let mut buckets: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut serials: HashSet<String> = HashSet::with_capacity(records.len());

        for record in records {
            let station = validate(record)?;
            if !serials.insert(station.serial.clone()) {
                return Err(RegistryError::DuplicateSerial(station.serial));
            }
            let key = normalize(&station.area_name);
            let idx = stations.len();
            stations.push(station);
            buckets.entry(key).or_default().push(idx);
        }

        info!(
            stations = stations.len(),
            areas = buckets.len(),
            "station index built"
        );
        Ok(Self { stations, buckets })
    }

    /// Number of indexed stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// The full station list, in registry order.
    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    /// Resolve an area name to the stations serving it. Never errors;
    /// an unknown area yields an empty result.
    ///
    /// Matching is a union of two steps, deduplicated by serial in
    /// first-seen order:
    ///
    /// 1. exact match on the normalized area name;
    /// 2. fallback over every bucket key: the key contains the full query,
    ///    the query contains the full key, or any query token (longer than
    ///    two characters) equals a token of the key.
    ///
    /// The fallback exists because feed area names are often compound
    /// ("North City - District 2") while the registry carries the bare
    /// name; the token length guard keeps short common fragments from
    /// matching half the country.
    pub fn resolve(&self, area: &str) -> Vec<&Station> {
        let query = normalize(area);
        if query.is_empty() {
            return Vec::new();
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut found: Vec<&Station> = Vec::new();

        if let Some(bucket) = self.buckets.get(query.as_str()) {
            self.collect(bucket, &mut seen, &mut found);
        }

        let query_tokens: Vec<&str> = match_tokens(&query).collect();
        for (key, bucket) in &self.buckets {
            let hit = key.contains(query.as_str())
                || query.contains(key.as_str())
                || query_tokens
                    .iter()
                    .any(|qt| match_tokens(key).any(|kt| kt == *qt));
            if hit {
                self.collect(bucket, &mut seen, &mut found);
            }
        }

        debug!(area = %area, matched = found.len(), "area resolved");
        found
    }

    /// Strict resolution: full-string equality against the normalized area
    /// name or display name, or whole-token equality. No substring
    /// containment, for callers that want precision over recall.
    pub fn resolve_exact(&self, query: &str) -> Vec<&Station> {
        let q = normalize(query);
        if q.is_empty() {
            return Vec::new();
        }
        let query_tokens: Vec<&str> = match_tokens(&q).collect();

        let mut seen: HashSet<&str> = HashSet::new();
        let mut found: Vec<&Station> = Vec::new();
        for station in &self.stations {
            let area = normalize(&station.area_name);
            let name = normalize(&station.display_name);
            let hit = area == q
                || name == q
                || query_tokens.iter().any(|qt| {
                    match_tokens(&area).any(|t| t == *qt) || match_tokens(&name).any(|t| t == *qt)
                });
            if hit && seen.insert(station.serial.as_str()) {
                found.push(station);
            }
        }
        found
    }

    fn collect<'a>(
        &'a self,
        bucket: &[usize],
        seen: &mut HashSet<&'a str>,
        found: &mut Vec<&'a Station>,
    ) {
        for &idx in bucket {
            let station = &self.stations[idx];
            if seen.insert(station.serial.as_str()) {
                found.push(station);
            }
        }
    }
}

fn validate(record: StationRecord) -> Result<Station, RegistryError> {
    let serial = record.serial.trim().to_string();
    let invalid = |reason: &str| RegistryError::InvalidRecord {
        serial: serial.clone(),
        reason: reason.to_string(),
    };

    if serial.is_empty() {
        return Err(invalid("missing serial"));
    }
    let area_name = record.area_name.trim().to_string();
    if area_name.is_empty() {
        return Err(invalid("missing area name"));
    }
    let display_name = record.display_name.trim().to_string();
    if display_name.is_empty() {
        return Err(invalid("missing station name"));
    }

    let cluster = ServerCluster::from_str(&record.cluster)
        .map_err(|e| invalid(&e.to_string()))?;

    let station_code = record.station_code.trim().to_string();
    if station_code.is_empty() || !station_code.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("station code must be numeric"));
    }
    if station_code.len() > STATION_CODE_WIDTH {
        return Err(invalid("station code too wide"));
    }
    let width = STATION_CODE_WIDTH;
    let station_code = format!("{station_code:0>width$}");

    Ok(Station {
        serial,
        area_name,
        display_name,
        cluster,
        station_code,
        region_label: record.region_label.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(serial: &str, area: &str, name: &str, cluster: &str, code: &str) -> StationRecord {
        StationRecord {
            serial: serial.to_string(),
            area_name: area.to_string(),
            display_name: name.to_string(),
            cluster: cluster.to_string(),
            station_code: code.to_string(),
            region_label: String::new(),
        }
    }

    fn sample_index() -> StationIndex {
        StationIndex::build(vec![
            record("1", "North City", "North City HQ", "A", "121"),
            record("2", "Central-East", "Central East 1", "B", "122"),
            record("3", "Central-East", "Central East 2", "B", "123"),
            record("4", "Southport", "Southport", "C", "124"),
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_match_law() {
        let index = sample_index();
        let found = index.resolve("North City");
        assert!(found.iter().any(|s| s.serial == "1"));
    }

    #[test]
    fn test_shared_area_returns_both() {
        let index = sample_index();
        let found = index.resolve("Central-East");
        let serials: Vec<&str> = found.iter().map(|s| s.serial.as_str()).collect();
        assert_eq!(serials, vec!["2", "3"]);
    }

    #[test]
    fn test_compound_name_fallback() {
        // Exact match fails, containment fallback must still find it
        let index = sample_index();
        let found = index.resolve("North City - District 2");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].serial, "1");
    }

    #[test]
    fn test_key_contains_query() {
        let index = sample_index();
        // Query is a fragment of the registry name
        let found = index.resolve("Southpor");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].serial, "4");
    }

    #[test]
    fn test_token_match() {
        let index = StationIndex::build(vec![record(
            "1",
            "Ramat Gan Center",
            "Ramat Gan",
            "A",
            "5",
        )])
        .unwrap();
        let found = index.resolve("Givatayim / Ramat Quarter");
        assert_eq!(found.len(), 1, "token 'ramat' should match");
    }

    #[test]
    fn test_short_tokens_do_not_match() {
        let index = StationIndex::build(vec![record("1", "El Ad", "El Ad", "A", "7")]).unwrap();
        // "el" and "ad" are both two characters; no containment either way
        let found = index.resolve("Elsewhere Entirely");
        assert!(found.is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let index = sample_index();
        assert!(index.resolve("Atlantis").is_empty());
        assert!(index.resolve("").is_empty());
    }

    #[test]
    fn test_resolution_monotonicity() {
        let mut records = vec![
            record("1", "North City", "North City HQ", "A", "121"),
            record("2", "Central-East", "Central East 1", "B", "122"),
        ];
        let before = StationIndex::build(records.clone())
            .unwrap()
            .resolve("North City")
            .into_iter()
            .map(|s| s.serial.clone())
            .collect::<Vec<_>>();

        records.push(record("9", "Brand New Area", "Brand New", "C", "199"));
        let after = StationIndex::build(records)
            .unwrap()
            .resolve("North City")
            .into_iter()
            .map(|s| s.serial.clone())
            .collect::<Vec<_>>();

        assert_eq!(before, after);
    }

    #[test]
    fn test_resolve_exact_no_substring() {
        let index = sample_index();
        // Fuzzy resolution accepts the fragment, exact must not
        assert_eq!(index.resolve("Southpor").len(), 1);
        assert!(index.resolve_exact("Southpor").is_empty());
        assert_eq!(index.resolve_exact("Southport").len(), 1);
    }

    #[test]
    fn test_resolve_exact_display_name_and_tokens() {
        let index = sample_index();
        // Full display-name equality; "hq" is too short to token-match
        assert_eq!(index.resolve_exact("North City HQ").len(), 1);
        // Whole-token equality ("central" appears in both stations)
        let found = index.resolve_exact("central");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_station_code_padding() {
        let index =
            StationIndex::build(vec![record("1", "Yavne", "Yavne", "C", "7")]).unwrap();
        assert_eq!(index.all()[0].station_code, "007");
    }

    #[test]
    fn test_duplicate_serial_rejected() {
        let result = StationIndex::build(vec![
            record("1", "Ashdod", "Ashdod", "C", "121"),
            record("1", "Ashkelon", "Ashkelon", "C", "122"),
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicateSerial(s)) if s == "1"));
    }

    #[test]
    fn test_invalid_records_rejected() {
        assert!(StationIndex::build(vec![record("1", "", "Name", "A", "1")]).is_err());
        assert!(StationIndex::build(vec![record("1", "Area", "Name", "Q", "1")]).is_err());
        assert!(StationIndex::build(vec![record("1", "Area", "Name", "A", "12x")]).is_err());
        assert!(matches!(
            StationIndex::build(Vec::new()),
            Err(RegistryError::Empty)
        ));
    }

    #[test]
    fn test_hebrew_compound_resolution() {
        let index = StationIndex::build(vec![record(
            "1",
            "תל אביב",
            "תחנת תל אביב",
            "A",
            "122",
        )])
        .unwrap();
        let found = index.resolve("תל אביב - מזרח");
        assert_eq!(found.len(), 1);
    }
}
