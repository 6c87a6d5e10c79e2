//! Segment filtering and bounds computation.

use crate::domain::{FilterCriteria, GeoBounds, TravelSegment};

/// The segments selected by a set of criteria, and the area they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSelection<'a> {
    /// Matching segments, in input order.
    pub segments: Vec<&'a TravelSegment>,

    /// Bounds over both endpoints of every selected segment.
    /// Invalid when `segments` is empty.
    pub bounds: GeoBounds,
}

impl RouteSelection<'_> {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Select the segments matching `criteria` and compute their bounds.
///
/// All active criteria must hold for a segment to be selected:
///
/// 1. transport mode: exact, case-sensitive match on the activity code;
/// 2. country: either the start or the end location equals it;
/// 3. date range: the segment's start time falls inside the range (the end
///    day is included through 23:59:59.999 UTC). A start time that does not
///    parse never matches an active date bound.
///
/// Unset criteria select everything. The input is never modified.
///
/// # Examples
///
/// ```
/// use journey_server::domain::{FilterCriteria, LatLng, TravelSegment};
/// use journey_server::route_filter::filter_and_bound;
///
/// let walk = TravelSegment {
///     start: LatLng::new(38.7, -9.1),
///     end: LatLng::new(38.8, -9.2),
///     activity_type: "WALKING".into(),
///     distance_meters: 900.0,
///     start_time: "2024-12-01T08:00:00Z".into(),
///     end_time: "2024-12-01T08:20:00Z".into(),
///     duration_hours: 0.33,
///     start_location: Some("Portugal".into()),
///     end_location: None,
/// };
/// let segments = vec![walk];
///
/// let selection = filter_and_bound(&segments, &FilterCriteria::none().with_transport_mode("IN_BUS"));
/// assert!(selection.is_empty());
/// assert!(!selection.bounds.is_valid());
///
/// let selection = filter_and_bound(&segments, &FilterCriteria::none().with_country("Portugal"));
/// assert_eq!(selection.len(), 1);
/// assert!(selection.bounds.contains(LatLng::new(38.75, -9.15)));
/// ```
pub fn filter_and_bound<'a>(
    segments: &'a [TravelSegment],
    criteria: &FilterCriteria,
) -> RouteSelection<'a> {
    let selected: Vec<&TravelSegment> = segments
        .iter()
        .filter(|segment| matches(segment, criteria))
        .collect();

    let bounds = selected
        .iter()
        .flat_map(|segment| segment.endpoints())
        .collect();

    RouteSelection {
        segments: selected,
        bounds,
    }
}

/// Whether a single segment satisfies every active criterion.
pub fn matches(segment: &TravelSegment, criteria: &FilterCriteria) -> bool {
    matches_transport_mode(segment, criteria)
        && matches_country(segment, criteria)
        && matches_date_range(segment, criteria)
}

fn matches_transport_mode(segment: &TravelSegment, criteria: &FilterCriteria) -> bool {
    criteria
        .transport_mode
        .as_deref()
        .is_none_or(|mode| segment.activity_type == mode)
}

fn matches_country(segment: &TravelSegment, criteria: &FilterCriteria) -> bool {
    criteria
        .country
        .as_deref()
        .is_none_or(|country| segment.touches_location(country))
}

fn matches_date_range(segment: &TravelSegment, criteria: &FilterCriteria) -> bool {
    let Some(range) = criteria.date_range.filter(|r| !r.is_open()) else {
        return true;
    };

    // Only the start time decides membership; the end time is never checked.
    match segment.started_at() {
        Ok(t) => range.contains(t),
        Err(_) => false,
    }
}
