//! Scene construction.

use serde::Serialize;

use crate::domain::{ActivityKind, LatLng, TravelSegment, activity_color, activity_label};
use crate::route_filter::RouteSelection;

/// Zoom level used before any bounds have been fitted.
pub const INITIAL_ZOOM: u8 = 6;

/// Padding, in pixels, kept around fitted bounds.
pub const FIT_PADDING_PX: u16 = 50;

const POLYLINE_WEIGHT: u8 = 4;
const POLYLINE_OPACITY: f64 = 0.8;

/// Tile layer settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Basemap {
    pub tile_url: &'static str,
    pub attribution: &'static str,
    pub subdomains: &'static str,
    pub max_zoom: u8,
}

/// The CartoDB Voyager basemap.
pub const BASEMAP: Basemap = Basemap {
    tile_url: "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png",
    attribution: "© OpenStreetMap contributors © CARTO",
    subdomains: "abcd",
    max_zoom: 19,
};

/// Text shown when a route is clicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentPopup {
    /// Activity label, e.g. "Van Drive".
    pub title: String,
    /// e.g. "28.4 km"
    pub distance: String,
    /// e.g. "0.8h"
    pub duration: String,
}

impl SegmentPopup {
    fn for_segment(segment: &TravelSegment) -> Self {
        Self {
            title: activity_label(&segment.activity_type).to_string(),
            distance: format!("{:.1} km", segment.distance_km()),
            duration: format!("{:.1}h", segment.duration_hours),
        }
    }
}

/// One segment drawn as a straight line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePolyline {
    pub points: [LatLng; 2],
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f64,
    pub popup: SegmentPopup,
}

impl RoutePolyline {
    pub fn for_segment(segment: &TravelSegment) -> Self {
        Self {
            points: segment.endpoints(),
            color: activity_color(&segment.activity_type),
            weight: POLYLINE_WEIGHT,
            opacity: POLYLINE_OPACITY,
            popup: SegmentPopup::for_segment(segment),
        }
    }
}

/// Legend row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

/// Area the map should fit, as `[[south, west], [north, east]]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub bounds: [[f64; 2]; 2],
    pub padding: u16,
}

/// Everything the map draws for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub polylines: Vec<RoutePolyline>,
    pub legend: Vec<LegendEntry>,
    /// `None` when nothing is selected; the map keeps its current view.
    pub viewport: Option<Viewport>,
    pub basemap: Basemap,
}

impl MapScene {
    /// Describe a selection.
    ///
    /// Previously drawn routes are meant to be replaced wholesale by the
    /// returned polylines.
    pub fn from_selection(selection: &RouteSelection<'_>) -> Self {
        let polylines = selection
            .segments
            .iter()
            .map(|segment| RoutePolyline::for_segment(segment))
            .collect();

        let viewport = selection
            .bounds
            .south_west()
            .zip(selection.bounds.north_east())
            .map(|(sw, ne)| Viewport {
                bounds: [[sw.lat, sw.lng], [ne.lat, ne.lng]],
                padding: FIT_PADDING_PX,
            });

        Self {
            polylines,
            legend: legend(),
            viewport,
            basemap: BASEMAP,
        }
    }
}

fn legend() -> Vec<LegendEntry> {
    ActivityKind::ALL
        .iter()
        .map(|kind| LegendEntry {
            code: kind.code(),
            label: kind.label(),
            color: kind.color(),
        })
        .collect()
}

/// Where to center the map before any filter has run.
///
/// The arithmetic mean of every start and end coordinate, or `None` when
/// there are no segments.
pub fn initial_center(segments: &[TravelSegment]) -> Option<LatLng> {
    if segments.is_empty() {
        return None;
    }

    let (lat_sum, lng_sum) = segments
        .iter()
        .flat_map(|s| s.endpoints())
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));

    let n = (segments.len() * 2) as f64;
    Some(LatLng::new(lat_sum / n, lng_sum / n))
}
