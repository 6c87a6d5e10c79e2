//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use crate::dashboard::{
    LOAD_ERROR_MESSAGE, RecentStopView, fallback_journey_stats, journey_stats, metric_cards,
};
use crate::domain::{
    DashboardStats, FilterOptions, GatewayHealth, InvalidEmail, RecentStop, TimeError,
    WaitlistEmail, WaitlistOutcome,
};
use crate::gateway::GatewayError;
use crate::journal::{EntryId, JournalDraft, JournalEntry, JournalError};
use crate::map::{INITIAL_ZOOM, MapScene, initial_center};
use crate::route_filter::filter_and_bound;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Number of recent stops shown on the dashboard page.
const DASHBOARD_RECENT_STOPS: usize = 5;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/waitlist", get(waitlist_page))
        .route("/dashboard", get(dashboard_page))
        .route("/journal", get(journal_page))
        .route("/health", get(health))
        .route("/api/health", get(api_health))
        .route("/api/waitlist", post(join_waitlist))
        .route("/api/map", get(map_data))
        .route("/api/filters", get(api_filters))
        .route("/api/stats", get(api_stats))
        .route("/api/recent-stops", get(api_recent_stops))
        .route("/api/journal", get(list_entries).post(create_entry))
        .route(
            "/api/journal/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .with_state(state)
}

fn render_page(template: &impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Health of the statistics API.
async fn api_health(State(state): State<AppState>) -> Result<Json<GatewayHealth>, AppError> {
    Ok(Json(state.gateway.fetch_health().await?))
}

/// Landing page.
async fn index_page() -> Result<Html<String>, AppError> {
    render_page(&IndexTemplate)
}

/// Waitlist page.
async fn waitlist_page() -> Result<Html<String>, AppError> {
    render_page(&WaitlistTemplate)
}

/// Add an address to the waitlist.
async fn join_waitlist(
    State(state): State<AppState>,
    body: Result<Json<WaitlistSubmission>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = body?;
    let email = WaitlistEmail::parse(&req.email)?;
    let outcome = state.gateway.join_waitlist(&email, req.source()).await?;

    let status = match outcome {
        WaitlistOutcome::Added => {
            info!(source = req.source(), "waitlist sign-up");
            StatusCode::CREATED
        }
        WaitlistOutcome::AlreadyListed => StatusCode::OK,
    };

    Ok((
        status,
        Json(WaitlistResponse {
            message: outcome.message(),
        }),
    )
        .into_response())
}

/// Dashboard page.
///
/// Statistics, recent stops and filter options load concurrently. Any
/// failure is logged and shown as a banner; the page still renders with
/// whatever did load.
async fn dashboard_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (stats, stops, options) = futures::join!(
        state.gateway.fetch_stats(),
        state.gateway.fetch_recent_stops(DASHBOARD_RECENT_STOPS),
        state.gateway.fetch_filter_options(),
    );

    let mut failed = false;
    let stats = loaded(stats, "stats", &mut failed);
    let stops = loaded(stops, "recent stops", &mut failed).unwrap_or_default();
    let options = loaded(options, "filter options", &mut failed).unwrap_or_default();

    let template = DashboardTemplate {
        cards: stats.as_ref().map(metric_cards).unwrap_or_default(),
        journey_stats: stats
            .as_ref()
            .map_or_else(fallback_journey_stats, journey_stats),
        current_location: stats.map(|s| s.current_location),
        recent_stops: stops.iter().map(RecentStopView::from).collect(),
        filters: FilterControlsView::from_options(&options),
        error: failed.then_some(LOAD_ERROR_MESSAGE),
    };
    render_page(&template)
}

fn loaded<T>(result: Result<T, GatewayError>, what: &'static str, failed: &mut bool) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "failed to load dashboard {what}");
            *failed = true;
            None
        }
    }
}

/// Filtered map data.
///
/// Fetches segments for the requested days (coarsely, from the API), then
/// applies the exact filter and describes the result for the map.
async fn map_data(
    State(state): State<AppState>,
    Query(query): Query<MapQuery>,
) -> Result<Json<MapResponse>, AppError> {
    let criteria = query.criteria()?;
    let (start, end) = query.fetch_days()?;

    let segments = state.gateway.fetch_segments(start, end).await?;
    let selection = filter_and_bound(&segments, &criteria);
    debug!(
        total = segments.len(),
        shown = selection.len(),
        "filtered map segments"
    );

    Ok(Json(MapResponse {
        total_segments: segments.len(),
        shown_segments: selection.len(),
        center: initial_center(&segments),
        zoom: INITIAL_ZOOM,
        scene: MapScene::from_selection(&selection),
    }))
}

async fn api_filters(State(state): State<AppState>) -> Result<Json<FilterOptions>, AppError> {
    Ok(Json(state.gateway.fetch_filter_options().await?))
}

async fn api_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.gateway.fetch_stats().await?))
}

async fn api_recent_stops(
    State(state): State<AppState>,
    Query(query): Query<RecentStopsQuery>,
) -> Result<Json<Vec<RecentStop>>, AppError> {
    Ok(Json(state.gateway.fetch_recent_stops(query.limit()).await?))
}

/// Journal page.
async fn journal_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let entries = state.journal.read().await.list().to_vec();
    render_page(&JournalTemplate::new(entries))
}

async fn list_entries(State(state): State<AppState>) -> Json<Vec<JournalEntry>> {
    Json(state.journal.read().await.list().to_vec())
}

async fn get_entry(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<JournalEntry>, AppError> {
    let Path(id) = id?;
    let id = EntryId::new(id);
    let journal = state.journal.read().await;
    let entry = journal.get(id).ok_or(JournalError::NotFound(id))?;
    Ok(Json(entry.clone()))
}

async fn create_entry(
    State(state): State<AppState>,
    body: Result<Json<JournalDraft>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(draft) = body?;
    let mut journal = state.journal.write().await;
    let entry = journal.add(&draft)?.clone();
    info!(id = %entry.id, "journal entry added");
    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

async fn update_entry(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<JournalDraft>, JsonRejection>,
) -> Result<Json<JournalEntry>, AppError> {
    let Path(id) = id?;
    let Json(draft) = body?;
    let mut journal = state.journal.write().await;
    let entry = journal.update(EntryId::new(id), &draft)?.clone();
    Ok(Json(entry))
}

async fn delete_entry(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let mut journal = state.journal.write().await;
    let removed = journal.delete(EntryId::new(id))?;
    info!(id = %removed.id, "journal entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Not-found page for unknown paths.
async fn not_found(uri: Uri) -> Response {
    let template = NotFoundTemplate {
        path: uri.path().to_string(),
    };
    match render_page(&template) {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl From<JournalError> for AppError {
    fn from(e: JournalError) -> Self {
        match e {
            JournalError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            JournalError::MissingField(_) | JournalError::InvalidDate(_) => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<TimeError> for AppError {
    fn from(e: TimeError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<InvalidEmail> for AppError {
    fn from(e: InvalidEmail) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::BadGateway { message }
            | AppError::Internal { message } => message,
        };

        if status.is_server_error() {
            warn!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
