//! Wire command construction for the station protocol.

use alert_core::AlertCategory;

/// Marker token that opens every station command.
pub const COMMAND_MARKER: &str = "$GMNG";

/// Line terminator appended on the wire, never part of the built command.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Protocol code for an alert category, if the category is dispatchable.
///
/// Only four codes exist on the receiving hardware: rocket fire (00112),
/// earthquake (00110), hostile aircraft (00111) and the pre-alert flash
/// (00113). Drills use their real counterpart's code; `Unknown` falls back
/// to the rocket-fire code so a new feed category still raises the siren.
/// Every other category maps to no code and the station is skipped.
pub fn alert_code(category: AlertCategory) -> Option<&'static str> {
    use AlertCategory::*;
    match category {
        Missiles | MissilesDrill | Unknown => Some("00112"),
        Earthquake | EarthquakeDrill => Some("00110"),
        HostileAircraftIntrusion | HostileAircraftIntrusionDrill => Some("00111"),
        NewsFlash => Some("00113"),
        _ => Option::None,
    }
}

/// Build the positional command for one station, without the terminator.
///
/// Format: marker, station code, space, `L`, alert code - e.g.
/// `$GMNG122 L00112`. The receiving hardware parses this positionally, so
/// the layout is byte-exact; callers must pass the zero-padded code the
/// index produced.
pub fn build_command(station_code: &str, category: AlertCategory) -> Option<String> {
    alert_code(category).map(|code| format!("{COMMAND_MARKER}{station_code} L{code}"))
}
