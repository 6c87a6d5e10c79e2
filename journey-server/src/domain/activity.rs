//! Activity kinds and their display palette.
//!
//! Activity codes on segments are free-form strings. The kinds known here
//! get a human label and a map color; anything else falls back to the raw
//! code and a neutral grey.

use std::fmt;

/// Color used for activity codes without a palette entry.
pub const FALLBACK_COLOR: &str = "#636363";

/// An activity type with a known label and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    PassengerVehicle,
    Cycling,
    Walking,
    Vehicle,
    OnFoot,
    Running,
    RoadVehicle,
    RailVehicle,
    Motorcycling,
    Flying,
    Bus,
    Subway,
    Train,
    Tram,
    Sailing,
}

impl ActivityKind {
    /// Every known kind, in legend order.
    pub const ALL: [ActivityKind; 15] = [
        ActivityKind::PassengerVehicle,
        ActivityKind::Cycling,
        ActivityKind::Walking,
        ActivityKind::Vehicle,
        ActivityKind::OnFoot,
        ActivityKind::Running,
        ActivityKind::RoadVehicle,
        ActivityKind::RailVehicle,
        ActivityKind::Motorcycling,
        ActivityKind::Flying,
        ActivityKind::Bus,
        ActivityKind::Subway,
        ActivityKind::Train,
        ActivityKind::Tram,
        ActivityKind::Sailing,
    ];

    /// Look up a kind by its exact activity code.
    ///
    /// # Examples
    ///
    /// ```
    /// use journey_server::domain::ActivityKind;
    ///
    /// assert_eq!(ActivityKind::from_code("IN_BUS"), Some(ActivityKind::Bus));
    /// assert_eq!(ActivityKind::from_code("in_bus"), None);
    /// assert_eq!(ActivityKind::from_code("HOVERBOARD"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// The activity code as sent by the statistics API.
    pub fn code(self) -> &'static str {
        match self {
            ActivityKind::PassengerVehicle => "IN_PASSENGER_VEHICLE",
            ActivityKind::Cycling => "CYCLING",
            ActivityKind::Walking => "WALKING",
            ActivityKind::Vehicle => "IN_VEHICLE",
            ActivityKind::OnFoot => "ON_FOOT",
            ActivityKind::Running => "RUNNING",
            ActivityKind::RoadVehicle => "IN_ROAD_VEHICLE",
            ActivityKind::RailVehicle => "IN_RAIL_VEHICLE",
            ActivityKind::Motorcycling => "MOTORCYCLING",
            ActivityKind::Flying => "FLYING",
            ActivityKind::Bus => "IN_BUS",
            ActivityKind::Subway => "IN_SUBWAY",
            ActivityKind::Train => "IN_TRAIN",
            ActivityKind::Tram => "IN_TRAM",
            ActivityKind::Sailing => "SAILING",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::PassengerVehicle => "Van Drive",
            ActivityKind::Cycling => "Cycling",
            ActivityKind::Walking => "Walking",
            ActivityKind::Vehicle => "Car Ride",
            ActivityKind::OnFoot => "On Foot",
            ActivityKind::Running => "Running",
            ActivityKind::RoadVehicle => "Road Vehicle",
            ActivityKind::RailVehicle => "Train",
            ActivityKind::Motorcycling => "Motorcycle",
            ActivityKind::Flying => "Flight",
            ActivityKind::Bus => "Bus",
            ActivityKind::Subway => "Subway",
            ActivityKind::Train => "Train",
            ActivityKind::Tram => "Tram",
            ActivityKind::Sailing => "Sailing",
        }
    }

    /// Map line color as a CSS hex string.
    pub fn color(self) -> &'static str {
        match self {
            ActivityKind::PassengerVehicle => "#4FC3F7",
            ActivityKind::Cycling => "#66BB6A",
            ActivityKind::Walking => "#FFA726",
            ActivityKind::Vehicle => "#EF5350",
            ActivityKind::OnFoot => "#AB47BC",
            ActivityKind::Running => "#EC407A",
            ActivityKind::RoadVehicle => "#7E57C2",
            ActivityKind::RailVehicle => "#9CCC65",
            ActivityKind::Motorcycling => "#FFEE58",
            ActivityKind::Flying => "#FF7043",
            ActivityKind::Bus => "#17becf",
            ActivityKind::Subway => "#bcbd22",
            ActivityKind::Train => "#e377c2",
            ActivityKind::Tram => "#7f7f7f",
            ActivityKind::Sailing => "#1f77b4",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display label for any activity code, falling back to the code itself.
pub fn activity_label(code: &str) -> &str {
    ActivityKind::from_code(code).map_or(code, |kind| kind.label())
}

/// Map color for any activity code, falling back to [`FALLBACK_COLOR`].
pub fn activity_color(code: &str) -> &'static str {
    ActivityKind::from_code(code).map_or(FALLBACK_COLOR, ActivityKind::color)
}

/// Activity code made readable by replacing underscores with spaces.
///
/// Used where the raw code is shown without going through the palette,
/// e.g. "Most Frequent Mode" on the dashboard.
pub fn humanize_code(code: &str) -> String {
    code.replace('_', " ")
}
