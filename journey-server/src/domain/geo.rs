//! Coordinates and bounding rectangles.

use serde::Serialize;

/// A point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Minimal rectangle enclosing a set of points.
///
/// A fresh `GeoBounds` is empty and therefore invalid; it becomes valid
/// once it has been extended by at least one point.
///
/// # Examples
///
/// ```
/// use journey_server::domain::{GeoBounds, LatLng};
///
/// let mut bounds = GeoBounds::empty();
/// assert!(!bounds.is_valid());
///
/// bounds.extend(LatLng::new(38.7, -9.1));
/// bounds.extend(LatLng::new(38.8, -9.2));
/// assert!(bounds.is_valid());
/// assert_eq!(bounds.south_west(), Some(LatLng::new(38.7, -9.2)));
/// assert_eq!(bounds.north_east(), Some(LatLng::new(38.8, -9.1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl GeoBounds {
    /// An empty, invalid accumulator.
    pub fn empty() -> Self {
        Self {
            south: f64::INFINITY,
            west: f64::INFINITY,
            north: f64::NEG_INFINITY,
            east: f64::NEG_INFINITY,
        }
    }

    /// Grow the rectangle to include `point`.
    ///
    /// Points with a NaN coordinate are ignored.
    pub fn extend(&mut self, point: LatLng) {
        if point.lat.is_nan() || point.lng.is_nan() {
            return;
        }
        self.south = self.south.min(point.lat);
        self.north = self.north.max(point.lat);
        self.west = self.west.min(point.lng);
        self.east = self.east.max(point.lng);
    }

    /// Whether at least one point has been folded in.
    pub fn is_valid(&self) -> bool {
        self.south <= self.north && self.west <= self.east
    }

    /// Whether `point` lies inside the rectangle, edges included.
    ///
    /// An invalid bounds contains nothing.
    pub fn contains(&self, point: LatLng) -> bool {
        self.is_valid()
            && point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }

    pub fn south_west(&self) -> Option<LatLng> {
        self.is_valid().then(|| LatLng::new(self.south, self.west))
    }

    pub fn north_east(&self) -> Option<LatLng> {
        self.is_valid().then(|| LatLng::new(self.north, self.east))
    }

    /// Midpoint of the rectangle.
    pub fn center(&self) -> Option<LatLng> {
        self.is_valid().then(|| {
            LatLng::new(
                (self.south + self.north) / 2.0,
                (self.west + self.east) / 2.0,
            )
        })
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<LatLng> for GeoBounds {
    fn from_iter<I: IntoIterator<Item = LatLng>>(iter: I) -> Self {
        let mut bounds = Self::empty();
        for point in iter {
            bounds.extend(point);
        }
        bounds
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn point() -> impl Strategy<Value = LatLng> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| LatLng::new(lat, lng))
    }

    proptest! {
        /// Every folded point is contained
        #[test]
        fn contains_every_point(points in prop::collection::vec(point(), 1..50)) {
            let bounds: GeoBounds = points.iter().copied().collect();
            prop_assert!(bounds.is_valid());
            for p in &points {
                prop_assert!(bounds.contains(*p));
            }
        }

        /// The rectangle is minimal: each edge is touched by some point
        #[test]
        fn edges_are_tight(points in prop::collection::vec(point(), 1..50)) {
            let bounds: GeoBounds = points.iter().copied().collect();
            let sw = bounds.south_west().unwrap();
            let ne = bounds.north_east().unwrap();
            prop_assert!(points.iter().any(|p| p.lat == sw.lat));
            prop_assert!(points.iter().any(|p| p.lng == sw.lng));
            prop_assert!(points.iter().any(|p| p.lat == ne.lat));
            prop_assert!(points.iter().any(|p| p.lng == ne.lng));
        }

        /// Folding order does not matter
        #[test]
        fn order_independent(mut points in prop::collection::vec(point(), 1..30)) {
            let forward: GeoBounds = points.iter().copied().collect();
            points.reverse();
            let backward: GeoBounds = points.iter().copied().collect();
            prop_assert_eq!(forward, backward);
        }
    }
}
