//! Conversion from statistics API DTOs to domain types.

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::{DayRange, FilterOptions, LatLng, TravelSegment, parse_day};

use super::types::{FilterOptionsDto, MapDataPoint};

/// Convert one map data point into a travel segment.
///
/// Timestamps are carried over verbatim; they are only parsed when a date
/// filter needs them.
pub fn convert_map_point(point: MapDataPoint) -> TravelSegment {
    TravelSegment {
        start: LatLng::new(point.start_lat, point.start_lng),
        end: LatLng::new(point.end_lat, point.end_lng),
        activity_type: point.activity_type,
        distance_meters: point.distance_meters,
        start_time: point.start_time,
        end_time: point.end_time,
        duration_hours: point.duration_hours,
        start_location: point.start_location.filter(|s| !s.is_empty()),
        end_location: point.end_location.filter(|s| !s.is_empty()),
    }
}

/// Convert a `GET /map/data` response, preserving order.
pub fn convert_map_data(points: Vec<MapDataPoint>) -> Vec<TravelSegment> {
    points.into_iter().map(convert_map_point).collect()
}

/// Convert a `GET /filters` response.
///
/// Duplicate and empty choices are dropped. Dates that fail to parse are
/// logged and treated as unknown.
pub fn convert_filter_options(dto: FilterOptionsDto) -> FilterOptions {
    FilterOptions {
        countries: dto.countries.into_iter().filter(|c| !c.is_empty()).collect(),
        transport_modes: dto
            .transport_modes
            .into_iter()
            .filter(|m| !m.is_empty())
            .collect(),
        date_range: DayRange {
            min: optional_day(dto.date_range.min_date.as_deref(), "min_date"),
            max: optional_day(dto.date_range.max_date.as_deref(), "max_date"),
        },
    }
}

fn optional_day(value: Option<&str>, field: &'static str) -> Option<NaiveDate> {
    let value = value?;
    match parse_day(value) {
        Ok(day) => Some(day),
        Err(e) => {
            warn!(field, error = %e, "ignoring unparseable filter date");
            None
        }
    }
}
