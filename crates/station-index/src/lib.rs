//! Area-name to field-station resolution.
//!
//! The alert feed describes affected areas by *name* ("polygon" in feed
//! jargon), not by geometry, and the names it uses do not always match the
//! registry's spelling ("North City - District 2" vs. "North City"). This
//! crate owns the one normalization function applied to both sides, the
//! index built from the station registry, and the two resolution modes:
//!
//! - [`StationIndex::resolve`] - exact match plus a containment/token
//!   fallback, tuned for recall (a missed station means a missed siren)
//! - [`StationIndex::resolve_exact`] - equality-only, tuned for precision
//!
//! # Example
//!
//! ```no_run
//! use station_index::{CsvStationRegistry, StationIndex, StationRegistry};
//!
//! # fn example() -> Result<(), station_index::RegistryError> {
//! let registry = CsvStationRegistry::new("stations.csv");
//! let index = StationIndex::build(registry.load_stations()?)?;
//!
//! for station in index.resolve("Tel Aviv - East") {
//!     println!("{} via cluster {}", station.display_name, station.cluster);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod index;
mod normalize;
mod registry;

pub use error::RegistryError;
pub use index::{StationIndex, STATION_CODE_WIDTH};
pub use normalize::{match_tokens, normalize};
pub use registry::{CsvStationRegistry, StationRecord, StationRegistry};
