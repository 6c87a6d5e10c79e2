//! HTTP client for the statistics API.
//!
//! Fetches travel segments, filter options, headline statistics and recent
//! stops, and forwards waitlist sign-ups.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{
    DashboardStats, FilterOptions, GatewayHealth, RecentStop, WaitlistEmail, WaitlistOutcome,
};

use super::convert::{convert_filter_options, convert_map_data};
use super::error::GatewayError;
use super::types::{ApiErrorBody, FilterOptionsDto, MapDataPoint, WaitlistRequest};
use super::{SegmentList, StatsGateway};

/// Default base URL of the statistics API.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL for the API, without a trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Statistics API client.
#[derive(Debug, Clone)]
pub struct HttpStatsGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpStatsGateway {
    /// Create a new client with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        if config.base_url.is_empty() {
            return Err(GatewayError::NotConfigured("empty API base URL".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a path and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let url = self.url(path);
        debug!(%url, ?query, "statistics API request");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::json(e, &body))
    }
}

/// Turn a non-success response into an error, preferring the API's own message.
fn api_error(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string());
    GatewayError::Api {
        status: status.as_u16(),
        message,
    }
}

fn date_query(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<(&'static str, String)> {
    let mut query = Vec::with_capacity(2);
    if let Some(start) = start {
        query.push(("start_date", start.format("%Y-%m-%d").to_string()));
    }
    if let Some(end) = end {
        query.push(("end_date", end.format("%Y-%m-%d").to_string()));
    }
    query
}

#[async_trait]
impl StatsGateway for HttpStatsGateway {
    async fn fetch_segments(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<SegmentList, GatewayError> {
        let points: Vec<MapDataPoint> = self.get_json("/map/data", &date_query(start, end)).await?;
        debug!(count = points.len(), "received map data");
        Ok(SegmentList::new(convert_map_data(points)))
    }

    async fn fetch_filter_options(&self) -> Result<FilterOptions, GatewayError> {
        let dto: FilterOptionsDto = self.get_json("/filters", &[]).await?;
        Ok(convert_filter_options(dto))
    }

    async fn fetch_stats(&self) -> Result<DashboardStats, GatewayError> {
        self.get_json("/dashboard/stats", &[]).await
    }

    async fn fetch_recent_stops(&self, limit: usize) -> Result<Vec<RecentStop>, GatewayError> {
        self.get_json("/recent-stops", &[("limit", limit.to_string())])
            .await
    }

    async fn fetch_health(&self) -> Result<GatewayHealth, GatewayError> {
        self.get_json("/health", &[]).await
    }

    async fn join_waitlist(
        &self,
        email: &WaitlistEmail,
        source: &str,
    ) -> Result<WaitlistOutcome, GatewayError> {
        let request = WaitlistRequest {
            email: email.as_str(),
            source,
        };

        let response = self
            .http
            .post(self.url("/waitlist"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::CREATED => Ok(WaitlistOutcome::Added),
            StatusCode::OK => Ok(WaitlistOutcome::AlreadyListed),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(api_error(status, &body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    async fn gateway_for(server: &mockito::ServerGuard) -> HttpStatsGateway {
        HttpStatsGateway::new(GatewayConfig::new(server.url())).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn config_builder() {
        let config = GatewayConfig::new("http://localhost:5001/api/").with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:5001/api");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn empty_base_url_rejected() {
        let result = HttpStatsGateway::new(GatewayConfig::new(""));
        assert!(matches!(result, Err(GatewayError::NotConfigured(_))));
    }

    #[test]
    fn date_query_only_includes_set_bounds() {
        assert!(date_query(None, None).is_empty());
        assert_eq!(
            date_query(Some(day(2024, 12, 5)), None),
            vec![("start_date", "2024-12-05".to_string())]
        );
        assert_eq!(
            date_query(Some(day(2024, 12, 5)), Some(day(2024, 12, 31))),
            vec![
                ("start_date", "2024-12-05".to_string()),
                ("end_date", "2024-12-31".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn fetch_segments_sends_date_bounds() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/map/data")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("start_date".into(), "2024-12-05".into()),
                Matcher::UrlEncoded("end_date".into(), "2024-12-31".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r##"[{"start_lat":40.0,"start_lng":-3.0,"end_lat":40.1,"end_lng":-3.1,
                     "activity_type":"IN_BUS","color":"#17becf","distance_meters":5000.0,
                     "start_time":"2024-12-10T08:00:00+00:00","end_time":"2024-12-10T09:00:00+00:00",
                     "duration_hours":1.0,"start_location":"Spain","end_location":"Spain"}]"##,
            )
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let segments = gateway
            .fetch_segments(Some(day(2024, 12, 5)), Some(day(2024, 12, 31)))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].activity_type, "IN_BUS");
        assert_eq!(segments[0].start_location.as_deref(), Some("Spain"));
    }

    #[tokio::test]
    async fn api_error_uses_error_field() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/dashboard/stats")
            .with_status(500)
            .with_body(r#"{"error": "timeline not loaded"}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let err = gateway.fetch_stats().await.unwrap_err();

        match err {
            GatewayError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "timeline not loaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/filters")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let err = gateway.fetch_filter_options().await.unwrap_err();

        assert!(matches!(err, GatewayError::Json { .. }));
        assert!(err.to_string().contains("<html>oops</html>"));
    }

    #[tokio::test]
    async fn fetch_filter_options_converts() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/filters")
            .with_status(200)
            .with_body(
                r#"{"countries":["Spain","Portugal"],"transport_modes":["WALKING"],
                    "date_range":{"min_date":"2025-06-10","max_date":"2025-10-01"}}"#,
            )
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let options = gateway.fetch_filter_options().await.unwrap();

        assert!(options.countries.contains("Portugal"));
        assert_eq!(options.date_range.min, Some(day(2025, 6, 10)));
        assert_eq!(options.date_range.max, Some(day(2025, 10, 1)));
    }

    #[tokio::test]
    async fn fetch_recent_stops_sends_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/recent-stops")
            .match_query(Matcher::UrlEncoded("limit".into(), "3".into()))
            .with_status(200)
            .with_body(
                r#"[{"name":"Sintra","start_time":"2025-09-01T10:00:00+00:00",
                     "end_time":"2025-09-01T14:00:00+00:00","duration_hours":4.0,
                     "coordinates":[38.8,-9.39]}]"#,
            )
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let stops = gateway.fetch_recent_stops(3).await.unwrap();

        mock.assert_async().await;
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].name, "Sintra");
        assert_eq!(stops[0].coordinates, Some((38.8, -9.39)));
    }

    #[tokio::test]
    async fn waitlist_status_codes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/waitlist")
            .match_body(Matcher::PartialJsonString(
                r#"{"email":"new@example.com"}"#.into(),
            ))
            .with_status(201)
            .with_body(r#"{"message":"Successfully added to waitlist"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/waitlist")
            .match_body(Matcher::PartialJsonString(
                r#"{"email":"old@example.com"}"#.into(),
            ))
            .with_status(200)
            .with_body(r#"{"message":"Email already on waitlist"}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;

        let added = gateway
            .join_waitlist(&WaitlistEmail::parse("new@example.com").unwrap(), "homepage")
            .await
            .unwrap();
        assert_eq!(added, WaitlistOutcome::Added);

        let again = gateway
            .join_waitlist(&WaitlistEmail::parse("old@example.com").unwrap(), "homepage")
            .await
            .unwrap();
        assert_eq!(again, WaitlistOutcome::AlreadyListed);
    }

    #[tokio::test]
    async fn waitlist_rejection_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/waitlist")
            .with_status(400)
            .with_body(r#"{"error":"Invalid email format"}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let err = gateway
            .join_waitlist(&WaitlistEmail::parse("a@b.c").unwrap(), "homepage")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API error 400: Invalid email format");
    }
}
