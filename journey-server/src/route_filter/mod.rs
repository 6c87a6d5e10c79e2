//! Route filtering for the dashboard map.
//!
//! Given the travel segments loaded for the dashboard and the filters the
//! visitor has picked, selects the segments to draw and the area the map
//! should fit. This is a pure function over an in-memory list: it is
//! re-run on every filter change and nothing it computes is cached.

mod engine;


pub use engine::{RouteSelection, filter_and_bound, matches};
