//! Domain types for the Van Journey dashboard.
//!
//! Travel segments, filter criteria and map bounds, plus the smaller
//! value types the dashboard and waitlist work with. Types that carry an
//! invariant enforce it at construction time.

mod activity;
mod criteria;
mod email;
mod geo;
mod segment;
mod stats;
mod time;

pub use activity::{ActivityKind, FALLBACK_COLOR, activity_color, activity_label, humanize_code};
pub use criteria::{DateRange, FilterCriteria};
pub use email::{InvalidEmail, WaitlistEmail};
pub use geo::{GeoBounds, LatLng};
pub use segment::TravelSegment;
pub use stats::{
    DashboardStats, DayRange, FilterOptions, GatewayHealth, RecentStop, WaitlistOutcome,
};
pub use time::{TimeError, day_end, day_start, parse_day, parse_instant};
