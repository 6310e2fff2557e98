//! Alert categories reported by the public alert feed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a public alert, named after the feed's wire strings.
///
/// Drill variants are rehearsals of their real counterparts and are
/// dispatched with the same protocol code. [`AlertCategory::None`] means
/// "no active alert" and is filtered out at ingestion; it never reaches
/// resolution or dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertCategory {
    #[serde(rename = "missiles")]
    Missiles,
    #[serde(rename = "earthQuake")]
    Earthquake,
    #[serde(rename = "radiologicalEvent")]
    RadiologicalEvent,
    #[serde(rename = "tsunami")]
    Tsunami,
    #[serde(rename = "hostileAircraftIntrusion")]
    HostileAircraftIntrusion,
    #[serde(rename = "hazardousMaterials")]
    HazardousMaterials,
    #[serde(rename = "terroristInfiltration")]
    TerroristInfiltration,
    #[serde(rename = "missilesDrill")]
    MissilesDrill,
    #[serde(rename = "earthQuakeDrill")]
    EarthquakeDrill,
    #[serde(rename = "radiologicalEventDrill")]
    RadiologicalEventDrill,
    #[serde(rename = "tsunamiDrill")]
    TsunamiDrill,
    #[serde(rename = "hostileAircraftIntrusionDrill")]
    HostileAircraftIntrusionDrill,
    #[serde(rename = "hazardousMaterialsDrill")]
    HazardousMaterialsDrill,
    #[serde(rename = "terroristInfiltrationDrill")]
    TerroristInfiltrationDrill,
    /// Pre-alert flash ("newsFlash" on the wire).
    #[serde(rename = "newsFlash")]
    NewsFlash,
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "none")]
    None,
}

impl AlertCategory {
    /// All known categories, in the feed's declaration order.
    pub const ALL: [AlertCategory; 17] = [
        AlertCategory::Missiles,
        AlertCategory::RadiologicalEvent,
        AlertCategory::Earthquake,
        AlertCategory::Tsunami,
        AlertCategory::HostileAircraftIntrusion,
        AlertCategory::HazardousMaterials,
        AlertCategory::TerroristInfiltration,
        AlertCategory::MissilesDrill,
        AlertCategory::EarthquakeDrill,
        AlertCategory::RadiologicalEventDrill,
        AlertCategory::TsunamiDrill,
        AlertCategory::HostileAircraftIntrusionDrill,
        AlertCategory::HazardousMaterialsDrill,
        AlertCategory::TerroristInfiltrationDrill,
        AlertCategory::NewsFlash,
        AlertCategory::Unknown,
        AlertCategory::None,
    ];

    /// Parse a feed wire name. Unrecognized names map to [`Unknown`],
    /// never to an error: the feed occasionally grows new categories and
    /// an unrecognized alert must still be dispatchable.
    ///
    /// [`Unknown`]: AlertCategory::Unknown
    pub fn from_wire(name: &str) -> Self {
        match name {
            "missiles" => Self::Missiles,
            "earthQuake" => Self::Earthquake,
            "radiologicalEvent" => Self::RadiologicalEvent,
            "tsunami" => Self::Tsunami,
            "hostileAircraftIntrusion" => Self::HostileAircraftIntrusion,
            "hazardousMaterials" => Self::HazardousMaterials,
            "terroristInfiltration" => Self::TerroristInfiltration,
            "missilesDrill" => Self::MissilesDrill,
            "earthQuakeDrill" => Self::EarthquakeDrill,
            "radiologicalEventDrill" => Self::RadiologicalEventDrill,
            "tsunamiDrill" => Self::TsunamiDrill,
            "hostileAircraftIntrusionDrill" => Self::HostileAircraftIntrusionDrill,
            "hazardousMaterialsDrill" => Self::HazardousMaterialsDrill,
            "terroristInfiltrationDrill" => Self::TerroristInfiltrationDrill,
            "newsFlash" => Self::NewsFlash,
            "none" => Self::None,
            _ => Self::Unknown,
        }
    }

    /// The feed's wire name for this category.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Missiles => "missiles",
            Self::Earthquake => "earthQuake",
            Self::RadiologicalEvent => "radiologicalEvent",
            Self::Tsunami => "tsunami",
            Self::HostileAircraftIntrusion => "hostileAircraftIntrusion",
            Self::HazardousMaterials => "hazardousMaterials",
            Self::TerroristInfiltration => "terroristInfiltration",
            Self::MissilesDrill => "missilesDrill",
            Self::EarthquakeDrill => "earthQuakeDrill",
            Self::RadiologicalEventDrill => "radiologicalEventDrill",
            Self::TsunamiDrill => "tsunamiDrill",
            Self::HostileAircraftIntrusionDrill => "hostileAircraftIntrusionDrill",
            Self::HazardousMaterialsDrill => "hazardousMaterialsDrill",
            Self::TerroristInfiltrationDrill => "terroristInfiltrationDrill",
            Self::NewsFlash => "newsFlash",
            Self::Unknown => "unknown",
            Self::None => "none",
        }
    }

    /// True for rehearsal variants of real alert types.
    pub fn is_drill(&self) -> bool {
        matches!(
            self,
            Self::MissilesDrill
                | Self::EarthquakeDrill
                | Self::RadiologicalEventDrill
                | Self::TsunamiDrill
                | Self::HostileAircraftIntrusionDrill
                | Self::HazardousMaterialsDrill
                | Self::TerroristInfiltrationDrill
        )
    }

    /// True for the "no active alert" marker.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
