//! Station registry loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::RegistryError;

/// A raw registry row, before validation.
///
/// Field order matches the columns of the registry export:
/// serial, area name, station name, cluster letter, station code, region.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    pub serial: String,
    pub area_name: String,
    pub display_name: String,
    pub cluster: String,
    pub station_code: String,
    #[serde(default)]
    pub region_label: String,
}

/// Provider of the station list.
///
/// Called once at startup (and on explicit reload); the storage format is
/// the implementation's concern. A load failure is fatal at startup, never
/// to a running pipeline.
pub trait StationRegistry {
    fn load_stations(&self) -> Result<Vec<StationRecord>, RegistryError>;
}

/// Registry backed by a CSV export of the station spreadsheet.
///
/// Expects a header row; blank filler rows (the export contains them) are
/// silently skipped.
#[derive(Debug, Clone)]
pub struct CsvStationRegistry {
    path: PathBuf,
}

impl CsvStationRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StationRegistry for CsvStationRegistry {
    fn load_stations(&self) -> Result<Vec<StationRecord>, RegistryError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: StationRecord = row?;
            if record.serial.trim().is_empty() && record.area_name.trim().is_empty() {
                continue;
            }
            records.push(record);
        }
        info!(
            path = %self.path.display(),
            records = records.len(),
            "station registry loaded"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = write_csv(
            "serial,area_name,display_name,cluster,station_code,region_label\n\
             1,Ashdod,Ashdod Central,C,121,South\n\
             2,Bnei Brak,Bnei Brak,A,129,Dan\n",
        );
        let registry = CsvStationRegistry::new(file.path());
        let records = registry.load_stations().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].serial, "1");
        assert_eq!(records[1].cluster, "A");
        assert_eq!(records[1].station_code, "129");
    }

    #[test]
    fn test_blank_rows_skipped() {
        let file = write_csv(
            "serial,area_name,display_name,cluster,station_code,region_label\n\
             1,Ashdod,Ashdod Central,C,121,South\n\
             ,,,,,\n\
             2,Bnei Brak,Bnei Brak,A,129,Dan\n",
        );
        let registry = CsvStationRegistry::new(file.path());
        let records = registry.load_stations().unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_missing_file_is_error() {
        let registry = CsvStationRegistry::new("/nonexistent/stations.csv");
        assert!(registry.load_stations().is_err());
    }
}
