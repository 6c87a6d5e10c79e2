//! Statistics API request and response DTOs.
//!
//! These types map directly to the JSON the statistics API sends. Keys are
//! snake_case; optional fields are omitted or `null`.

use serde::{Deserialize, Serialize};

/// One entry of `GET /map/data`.
#[derive(Debug, Clone, Deserialize)]
pub struct MapDataPoint {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,

    /// Activity code, e.g. `IN_PASSENGER_VEHICLE`.
    pub activity_type: String,

    /// Color suggested by the API. Ignored; the dashboard has its own palette.
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub distance_meters: f64,

    /// ISO-8601 start timestamp.
    pub start_time: String,

    /// ISO-8601 end timestamp.
    pub end_time: String,

    #[serde(default)]
    pub duration_hours: f64,

    /// Country at the start, when the API could place it.
    #[serde(default)]
    pub start_location: Option<String>,

    /// Country at the end, when the API could place it.
    #[serde(default)]
    pub end_location: Option<String>,
}

/// Response of `GET /filters`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterOptionsDto {
    #[serde(default)]
    pub countries: Vec<String>,

    #[serde(default)]
    pub transport_modes: Vec<String>,

    #[serde(default)]
    pub date_range: DateRangeDto,
}

/// Earliest/latest activity days, as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeDto {
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}

/// Body of `POST /waitlist`.
#[derive(Debug, Clone, Serialize)]
pub struct WaitlistRequest<'a> {
    pub email: &'a str,
    pub source: &'a str,
}

/// Error body the API sends with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
