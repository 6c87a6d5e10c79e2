//! Access to the journey statistics API.
//!
//! The dashboard never computes statistics itself. It asks a [`StatsGateway`]
//! for travel segments, filter choices, headline numbers and recent stops.
//! [`HttpStatsGateway`] talks to the real API; [`MockStatsGateway`] serves
//! JSON fixtures for development and tests.

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    DashboardStats, FilterOptions, GatewayHealth, RecentStop, TravelSegment, WaitlistEmail,
    WaitlistOutcome,
};

pub use client::{DEFAULT_BASE_URL, GatewayConfig, HttpStatsGateway};
pub use convert::{convert_filter_options, convert_map_data, convert_map_point};
pub use error::GatewayError;
pub use mock::MockStatsGateway;
pub use types::{DateRangeDto, FilterOptionsDto, MapDataPoint};

/// Shared, immutable list of segments as returned by the API.
pub type SegmentList = Arc<Vec<TravelSegment>>;

/// Source of journey statistics.
#[async_trait]
pub trait StatsGateway: Send + Sync {
    /// Travel segments, coarsely restricted to the given days when set.
    ///
    /// The restriction is a server-side optimisation only; callers still
    /// apply the exact filter themselves.
    async fn fetch_segments(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<SegmentList, GatewayError>;

    /// Choices for the filter controls.
    async fn fetch_filter_options(&self) -> Result<FilterOptions, GatewayError>;

    /// Headline numbers.
    async fn fetch_stats(&self) -> Result<DashboardStats, GatewayError>;

    /// Most recent stops, newest first, at most `limit` of them.
    async fn fetch_recent_stops(&self, limit: usize) -> Result<Vec<RecentStop>, GatewayError>;

    /// Liveness of the API.
    async fn fetch_health(&self) -> Result<GatewayHealth, GatewayError>;

    /// Register an address for launch notifications.
    async fn join_waitlist(
        &self,
        email: &WaitlistEmail,
        source: &str,
    ) -> Result<WaitlistOutcome, GatewayError>;
}
