//! Recorded travel segments.

use chrono::{DateTime, Utc};

use super::geo::LatLng;
use super::time::{TimeError, parse_instant};

/// One recorded leg of travel with a single activity type.
///
/// Segments come from the statistics API and are never mutated. Timestamps
/// are kept exactly as supplied and parsed on demand, so one malformed
/// record cannot stop the rest of a list from loading.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelSegment {
    pub start: LatLng,
    pub end: LatLng,

    /// Activity code such as `WALKING` or `IN_BUS`. Not validated.
    pub activity_type: String,

    pub distance_meters: f64,

    /// ISO-8601 start timestamp, as supplied.
    pub start_time: String,

    /// ISO-8601 end timestamp, as supplied.
    pub end_time: String,

    /// Duration reported by the source; not derived from the timestamps.
    pub duration_hours: f64,

    /// Country or place label at the start, if known.
    pub start_location: Option<String>,

    /// Country or place label at the end, if known.
    pub end_location: Option<String>,
}

impl TravelSegment {
    /// Parsed start instant.
    pub fn started_at(&self) -> Result<DateTime<Utc>, TimeError> {
        parse_instant(&self.start_time)
    }

    /// Parsed end instant.
    pub fn ended_at(&self) -> Result<DateTime<Utc>, TimeError> {
        parse_instant(&self.end_time)
    }

    /// Whether either end of the segment carries the given location label.
    pub fn touches_location(&self, location: &str) -> bool {
        self.start_location.as_deref() == Some(location)
            || self.end_location.as_deref() == Some(location)
    }

    /// Both endpoints, start first.
    pub fn endpoints(&self) -> [LatLng; 2] {
        [self.start, self.end]
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}
