//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DateRange, FilterCriteria, LatLng, TimeError, parse_day};
use crate::map::MapScene;

/// Default and maximum number of recent stops returned.
pub const DEFAULT_RECENT_STOPS: usize = 10;
pub const MAX_RECENT_STOPS: usize = 50;

/// Where a waitlist sign-up came from, when the client does not say.
pub const DEFAULT_WAITLIST_SOURCE: &str = "homepage";

/// Query of `GET /api/map`. Empty values mean "not set".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapQuery {
    /// Activity code, e.g. `WALKING`
    pub transport_mode: Option<String>,

    /// Country label, e.g. `Portugal`
    pub country: Option<String>,

    /// First day, `YYYY-MM-DD`
    pub start_date: Option<String>,

    /// Last day (inclusive), `YYYY-MM-DD`
    pub end_date: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl MapQuery {
    fn day(value: &Option<String>) -> Result<Option<NaiveDate>, TimeError> {
        non_empty(value).map(parse_day).transpose()
    }

    /// The requested start and end days.
    pub fn days(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), TimeError> {
        Ok((Self::day(&self.start_date)?, Self::day(&self.end_date)?))
    }

    /// Days to request from the statistics API.
    ///
    /// The API keeps segments starting at or before midnight of the end
    /// day, so the upstream end is moved to the following day and the
    /// exact range is left to the route filter.
    pub fn fetch_days(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), TimeError> {
        let (start, end) = self.days()?;
        Ok((start, end.and_then(|day| day.succ_opt())))
    }

    /// Build filter criteria from the query.
    pub fn criteria(&self) -> Result<FilterCriteria, TimeError> {
        let (start, end) = self.days()?;
        let range = DateRange::new(start, end);

        let mut criteria = FilterCriteria::none();
        if let Some(mode) = non_empty(&self.transport_mode) {
            criteria = criteria.with_transport_mode(mode);
        }
        if let Some(country) = non_empty(&self.country) {
            criteria = criteria.with_country(country);
        }
        if !range.is_open() {
            criteria = criteria.with_date_range(range);
        }
        Ok(criteria)
    }
}

/// Response of `GET /api/map`.
#[derive(Debug, Serialize)]
pub struct MapResponse {
    /// Segments fetched for the date range, before filtering.
    pub total_segments: usize,

    /// Segments drawn.
    pub shown_segments: usize,

    /// Mean of every fetched coordinate; where the map starts.
    pub center: Option<LatLng>,

    pub zoom: u8,

    pub scene: MapScene,
}

/// Query of `GET /api/recent-stops`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentStopsQuery {
    pub limit: Option<usize>,
}

impl RecentStopsQuery {
    /// Requested limit, defaulted and capped.
    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_RECENT_STOPS)
            .min(MAX_RECENT_STOPS)
    }
}

/// Body of `POST /api/waitlist`.
#[derive(Debug, Clone, Deserialize)]
pub struct WaitlistSubmission {
    #[serde(default)]
    pub email: String,
    pub source: Option<String>,
}

impl WaitlistSubmission {
    pub fn source(&self) -> &str {
        non_empty(&self.source).unwrap_or(DEFAULT_WAITLIST_SOURCE)
    }
}

/// Reply to a waitlist submission.
#[derive(Debug, Serialize)]
pub struct WaitlistResponse {
    pub message: &'static str,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
