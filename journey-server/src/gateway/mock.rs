//! Mock statistics gateway for running without the statistics API.
//!
//! Loads fixture files in the API's wire format from a directory and serves
//! them as if they were live responses.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{
    DashboardStats, FilterOptions, GatewayHealth, RecentStop, TravelSegment, WaitlistEmail,
    WaitlistOutcome, day_start, parse_instant,
};

use super::convert::{convert_filter_options, convert_map_data};
use super::error::GatewayError;
use super::types::{FilterOptionsDto, MapDataPoint};
use super::{SegmentList, StatsGateway};

const MAP_DATA_FILE: &str = "map_data.json";
const STATS_FILE: &str = "stats.json";
const RECENT_STOPS_FILE: &str = "recent_stops.json";
const FILTERS_FILE: &str = "filters.json";

/// Gateway that serves fixture data from memory.
#[derive(Clone)]
pub struct MockStatsGateway {
    segments: SegmentList,
    stats: DashboardStats,
    recent_stops: Arc<Vec<RecentStop>>,
    filters: FilterOptions,
    waitlist: Arc<RwLock<HashSet<String>>>,
}

impl MockStatsGateway {
    /// Load fixtures from a directory.
    ///
    /// Expects `map_data.json`, `stats.json`, `recent_stops.json` and
    /// `filters.json`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let data_dir = data_dir.as_ref();

        let points: Vec<MapDataPoint> = load_fixture(data_dir, MAP_DATA_FILE)?;
        let stats: DashboardStats = load_fixture(data_dir, STATS_FILE)?;
        let recent_stops: Vec<RecentStop> = load_fixture(data_dir, RECENT_STOPS_FILE)?;
        let filters: FilterOptionsDto = load_fixture(data_dir, FILTERS_FILE)?;

        let gateway = Self::from_parts(
            convert_map_data(points),
            stats,
            recent_stops,
            convert_filter_options(filters),
        );
        info!(
            dir = %data_dir.display(),
            segments = gateway.segments.len(),
            "loaded mock statistics"
        );
        Ok(gateway)
    }

    /// Build a gateway from already-converted data.
    pub fn from_parts(
        segments: Vec<TravelSegment>,
        stats: DashboardStats,
        mut recent_stops: Vec<RecentStop>,
        filters: FilterOptions,
    ) -> Self {
        // Newest first; stops with unreadable times sink to the end.
        recent_stops.sort_by_key(|stop| Reverse(parse_instant(&stop.start_time).ok()));

        Self {
            segments: Arc::new(segments),
            stats,
            recent_stops: Arc::new(recent_stops),
            filters,
            waitlist: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Number of addresses collected so far.
    pub async fn waitlist_len(&self) -> usize {
        self.waitlist.read().await.len()
    }
}

fn load_fixture<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T, GatewayError> {
    let path = dir.join(name);
    let json = std::fs::read_to_string(&path)
        .map_err(|e| GatewayError::Fixture(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&json)
        .map_err(|e| GatewayError::Fixture(format!("failed to parse {}: {}", path.display(), e)))
}

/// The statistics API's own date restriction: both bounds compare against
/// midnight, so the end day itself is mostly excluded. The engine refines
/// this afterwards.
fn coarse_date_match(
    segment: &TravelSegment,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> bool {
    if start.is_none() && end.is_none() {
        return true;
    }
    let Ok(started) = segment.started_at() else {
        return false;
    };
    start.is_none_or(|day| started >= day_start(day))
        && end.is_none_or(|day| started <= day_start(day))
}

#[async_trait]
impl StatsGateway for MockStatsGateway {
    async fn fetch_segments(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<SegmentList, GatewayError> {
        if start.is_none() && end.is_none() {
            return Ok(Arc::clone(&self.segments));
        }

        let selected: Vec<TravelSegment> = self
            .segments
            .iter()
            .filter(|s| coarse_date_match(s, start, end))
            .cloned()
            .collect();
        Ok(Arc::new(selected))
    }

    async fn fetch_filter_options(&self) -> Result<FilterOptions, GatewayError> {
        Ok(self.filters.clone())
    }

    async fn fetch_stats(&self) -> Result<DashboardStats, GatewayError> {
        Ok(self.stats.clone())
    }

    async fn fetch_recent_stops(&self, limit: usize) -> Result<Vec<RecentStop>, GatewayError> {
        Ok(self.recent_stops.iter().take(limit).cloned().collect())
    }

    async fn fetch_health(&self) -> Result<GatewayHealth, GatewayError> {
        Ok(GatewayHealth {
            status: "healthy".to_string(),
            timeline_loaded: true,
            activities_count: self.segments.len() as u64,
        })
    }

    async fn join_waitlist(
        &self,
        email: &WaitlistEmail,
        _source: &str,
    ) -> Result<WaitlistOutcome, GatewayError> {
        let mut waitlist = self.waitlist.write().await;
        if waitlist.insert(email.as_str().to_string()) {
            Ok(WaitlistOutcome::Added)
        } else {
            Ok(WaitlistOutcome::AlreadyListed)
        }
    }
}
