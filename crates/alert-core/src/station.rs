//! Field station and server cluster types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a cluster letter is not A, B or C.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown server cluster: {0:?} (expected A, B or C)")]
pub struct UnknownCluster(pub String);

/// One of the three regional protocol server clusters.
///
/// Each cluster owns one host address and a fixed, ordered list of ports;
/// every station belongs to exactly one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServerCluster {
    A,
    B,
    C,
}

impl ServerCluster {
    /// All clusters, in declaration order.
    pub const ALL: [ServerCluster; 3] = [ServerCluster::A, ServerCluster::B, ServerCluster::C];

    /// Single-letter code used by the registry.
    pub fn letter(&self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }
}

impl FromStr for ServerCluster {
    type Err = UnknownCluster;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            other => Err(UnknownCluster(other.to_string())),
        }
    }
}

impl fmt::Display for ServerCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A physical field station that receives dispatch commands.
///
/// Immutable once loaded; owned by the station index and rebuilt wholesale
/// on registry reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Unique registry serial.
    pub serial: String,
    /// Name of the geographic area the station serves, as the registry
    /// spells it. Matched against incoming alert area names.
    pub area_name: String,
    /// Human-readable station name.
    pub display_name: String,
    /// Server cluster the station is reachable through.
    pub cluster: ServerCluster,
    /// Zero-padded numeric code embedded in the wire command.
    pub station_code: String,
    /// Administrative region label, informational only.
    pub region_label: String,
}
