//! Askama templates for the web frontend.

use askama::Template;

use crate::dashboard::{MetricCard, RecentStopView, StatRow};
use crate::domain::{FilterOptions, activity_label};
use crate::journal::{EntryKind, JournalEntry};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Landing page with the waitlist form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

/// Standalone waitlist page.
#[derive(Template)]
#[template(path = "waitlist.html")]
pub struct WaitlistTemplate;

/// Dashboard page.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub cards: Vec<MetricCard>,
    pub journey_stats: Vec<StatRow>,
    pub current_location: Option<String>,
    pub recent_stops: Vec<RecentStopView>,
    pub filters: FilterControlsView,
    /// Banner text when some data failed to load.
    pub error: Option<&'static str>,
}

/// Journal page.
#[derive(Template)]
#[template(path = "journal.html")]
pub struct JournalTemplate {
    pub entries: Vec<JournalEntry>,
    pub kinds: [EntryKind; 3],
}

impl JournalTemplate {
    pub fn new(entries: Vec<JournalEntry>) -> Self {
        Self {
            entries,
            kinds: EntryKind::ALL,
        }
    }
}

/// Not-found page.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub path: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A transport mode choice in the filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeOption {
    pub code: String,
    pub label: String,
}

/// Choices and initial values of the dashboard filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterControlsView {
    pub countries: Vec<String>,
    pub modes: Vec<ModeOption>,
    /// Initial start date, `YYYY-MM-DD`, or empty.
    pub start_date: String,
    /// Initial end date, `YYYY-MM-DD`, or empty.
    pub end_date: String,
}

impl FilterControlsView {
    /// Build the controls from the available options.
    ///
    /// The date inputs start at the full data range, but only when both
    /// ends are known.
    pub fn from_options(options: &FilterOptions) -> Self {
        let (start_date, end_date) = match (options.date_range.min, options.date_range.max) {
            (Some(min), Some(max)) => (
                min.format("%Y-%m-%d").to_string(),
                max.format("%Y-%m-%d").to_string(),
            ),
            _ => (String::new(), String::new()),
        };

        Self {
            countries: options.countries.iter().cloned().collect(),
            modes: options
                .transport_modes
                .iter()
                .map(|code| ModeOption {
                    code: code.clone(),
                    label: activity_label(code).to_string(),
                })
                .collect(),
            start_date,
            end_date,
        }
    }
}
