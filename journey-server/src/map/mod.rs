//! What the dashboard map should draw.
//!
//! The server never touches a map widget. It turns a route selection into a
//! [`MapScene`], a plain JSON description of polylines, legend, viewport and
//! basemap, which the browser script hands to Leaflet.

mod scene;

pub use scene::{
    BASEMAP, Basemap, FIT_PADDING_PX, INITIAL_ZOOM, LegendEntry, MapScene, RoutePolyline,
    SegmentPopup, Viewport, initial_center,
};
