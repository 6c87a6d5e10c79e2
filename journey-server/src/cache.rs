//! Caching layer for statistics API responses.
//!
//! The API recomputes its statistics from a large timeline on every request,
//! while the underlying data changes rarely. Responses are kept for a short
//! TTL so that repeated filter changes on the dashboard stay cheap.
//!
//! Errors are never cached. Health and waitlist calls always pass through.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{
    DashboardStats, FilterOptions, GatewayHealth, RecentStop, WaitlistEmail, WaitlistOutcome,
};
use crate::gateway::{GatewayError, SegmentList, StatsGateway};

/// Cache key for segment lists: the coarse date restriction sent upstream.
type SegmentKey = (Option<NaiveDate>, Option<NaiveDate>);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per response kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 64,
        }
    }
}

/// Statistics gateway with caching.
///
/// Wraps any [`StatsGateway`] and caches its read-only responses.
pub struct CachedStatsGateway<G> {
    inner: G,
    segments: MokaCache<SegmentKey, SegmentList>,
    filters: MokaCache<(), FilterOptions>,
    stats: MokaCache<(), DashboardStats>,
    recent_stops: MokaCache<usize, Vec<RecentStop>>,
}

fn build_cache<K, V>(config: &CacheConfig) -> MokaCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}

impl<G: StatsGateway> CachedStatsGateway<G> {
    /// Create a new cached gateway.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        Self {
            inner,
            segments: build_cache(config),
            filters: build_cache(config),
            stats: build_cache(config),
            recent_stops: build_cache(config),
        }
    }

    /// Access the wrapped gateway for operations that bypass the cache.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Number of cached segment lists.
    pub fn segment_entry_count(&self) -> u64 {
        self.segments.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.segments.invalidate_all();
        self.filters.invalidate_all();
        self.stats.invalidate_all();
        self.recent_stops.invalidate_all();
    }
}

#[async_trait]
impl<G: StatsGateway> StatsGateway for CachedStatsGateway<G> {
    async fn fetch_segments(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<SegmentList, GatewayError> {
        let key = (start, end);

        if let Some(cached) = self.segments.get(&key).await {
            debug!(?start, ?end, "segment cache hit");
            return Ok(cached);
        }

        debug!(?start, ?end, "segment cache miss");
        let segments = self.inner.fetch_segments(start, end).await?;
        self.segments.insert(key, segments.clone()).await;
        Ok(segments)
    }

    async fn fetch_filter_options(&self) -> Result<FilterOptions, GatewayError> {
        if let Some(cached) = self.filters.get(&()).await {
            return Ok(cached);
        }

        let options = self.inner.fetch_filter_options().await?;
        self.filters.insert((), options.clone()).await;
        Ok(options)
    }

    async fn fetch_stats(&self) -> Result<DashboardStats, GatewayError> {
        if let Some(cached) = self.stats.get(&()).await {
            return Ok(cached);
        }

        let stats = self.inner.fetch_stats().await?;
        self.stats.insert((), stats.clone()).await;
        Ok(stats)
    }

    async fn fetch_recent_stops(&self, limit: usize) -> Result<Vec<RecentStop>, GatewayError> {
        if let Some(cached) = self.recent_stops.get(&limit).await {
            return Ok(cached);
        }

        let stops = self.inner.fetch_recent_stops(limit).await?;
        self.recent_stops.insert(limit, stops.clone()).await;
        Ok(stops)
    }

    async fn fetch_health(&self) -> Result<GatewayHealth, GatewayError> {
        self.inner.fetch_health().await
    }

    async fn join_waitlist(
        &self,
        email: &WaitlistEmail,
        source: &str,
    ) -> Result<WaitlistOutcome, GatewayError> {
        self.inner.join_waitlist(email, source).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;
    use crate::domain::TravelSegment;

    /// Counts calls and fails on demand.
    #[derive(Default)]
    struct CountingGateway {
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl CountingGateway {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn record(&self) -> Result<(), GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(GatewayError::Api {
                    status: 503,
                    message: "unavailable".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl StatsGateway for CountingGateway {
        async fn fetch_segments(
            &self,
            _start: Option<NaiveDate>,
            _end: Option<NaiveDate>,
        ) -> Result<SegmentList, GatewayError> {
            self.record()?;
            Ok(Arc::new(Vec::<TravelSegment>::new()))
        }

        async fn fetch_filter_options(&self) -> Result<FilterOptions, GatewayError> {
            self.record()?;
            Ok(FilterOptions::default())
        }

        async fn fetch_stats(&self) -> Result<DashboardStats, GatewayError> {
            self.record()?;
            Ok(DashboardStats {
                vehicle_distance: 1.0,
                walking_distance: 0.0,
                cycling_distance: 0.0,
                countries_visited: 1,
                days_on_road: 1,
                current_location: "Lisbon".into(),
                total_activities: 1,
                avg_distance_per_day: 1.0,
                most_common_activity: "WALKING".into(),
            })
        }

        async fn fetch_recent_stops(&self, limit: usize) -> Result<Vec<RecentStop>, GatewayError> {
            self.record()?;
            Ok((0..limit)
                .map(|i| RecentStop {
                    name: format!("stop {i}"),
                    start_time: String::new(),
                    end_time: String::new(),
                    duration_hours: 0.0,
                    coordinates: None,
                })
                .collect())
        }

        async fn fetch_health(&self) -> Result<GatewayHealth, GatewayError> {
            self.record()?;
            Ok(GatewayHealth {
                status: "healthy".into(),
                timeline_loaded: true,
                activities_count: 0,
            })
        }

        async fn join_waitlist(
            &self,
            _email: &WaitlistEmail,
            _source: &str,
        ) -> Result<WaitlistOutcome, GatewayError> {
            self.record()?;
            Ok(WaitlistOutcome::Added)
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 64);
    }

    #[tokio::test]
    async fn segments_cached_per_date_range() {
        let cached = CachedStatsGateway::new(CountingGateway::default(), &CacheConfig::default());

        cached.fetch_segments(None, None).await.unwrap();
        cached.fetch_segments(None, None).await.unwrap();
        assert_eq!(cached.inner().calls(), 1);

        cached
            .fetch_segments(Some(day(2024, 12, 5)), None)
            .await
            .unwrap();
        assert_eq!(cached.inner().calls(), 2);

        cached
            .fetch_segments(Some(day(2024, 12, 5)), Some(day(2024, 12, 31)))
            .await
            .unwrap();
        cached
            .fetch_segments(Some(day(2024, 12, 5)), Some(day(2024, 12, 31)))
            .await
            .unwrap();
        assert_eq!(cached.inner().calls(), 3);
    }

    #[tokio::test]
    async fn single_entry_responses_cached() {
        let cached = CachedStatsGateway::new(CountingGateway::default(), &CacheConfig::default());

        cached.fetch_stats().await.unwrap();
        cached.fetch_stats().await.unwrap();
        cached.fetch_filter_options().await.unwrap();
        cached.fetch_filter_options().await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn recent_stops_keyed_by_limit() {
        let cached = CachedStatsGateway::new(CountingGateway::default(), &CacheConfig::default());

        assert_eq!(cached.fetch_recent_stops(3).await.unwrap().len(), 3);
        assert_eq!(cached.fetch_recent_stops(3).await.unwrap().len(), 3);
        assert_eq!(cached.fetch_recent_stops(5).await.unwrap().len(), 5);

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn errors_not_cached() {
        let inner = CountingGateway::default();
        inner.fail.store(true, Ordering::SeqCst);
        let cached = CachedStatsGateway::new(inner, &CacheConfig::default());

        assert!(cached.fetch_stats().await.is_err());

        cached.inner().fail.store(false, Ordering::SeqCst);
        assert!(cached.fetch_stats().await.is_ok());
        assert!(cached.fetch_stats().await.is_ok());

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn health_and_waitlist_pass_through() {
        let cached = CachedStatsGateway::new(CountingGateway::default(), &CacheConfig::default());
        let email = WaitlistEmail::parse("van@example.com").unwrap();

        cached.fetch_health().await.unwrap();
        cached.fetch_health().await.unwrap();
        cached.join_waitlist(&email, "homepage").await.unwrap();
        cached.join_waitlist(&email, "homepage").await.unwrap();

        assert_eq!(cached.inner().calls(), 4);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cached = CachedStatsGateway::new(CountingGateway::default(), &CacheConfig::default());

        cached.fetch_stats().await.unwrap();
        cached.invalidate_all();
        cached.fetch_stats().await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }
}
