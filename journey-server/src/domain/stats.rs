//! Aggregate journey statistics reported by the statistics API.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Headline numbers for the dashboard.
///
/// Distances are in kilometres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub vehicle_distance: f64,
    pub walking_distance: f64,
    pub cycling_distance: f64,
    pub countries_visited: u32,
    pub days_on_road: u32,
    pub current_location: String,
    pub total_activities: u32,
    pub avg_distance_per_day: f64,
    pub most_common_activity: String,
}

/// A place where the van stopped for a while.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentStop {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_hours: f64,
    /// `(lat, lng)` when the stop could be located.
    #[serde(default)]
    pub coordinates: Option<(f64, f64)>,
}

/// Earliest and latest days with recorded activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayRange {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

/// Choices offered by the dashboard filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub countries: BTreeSet<String>,
    pub transport_modes: BTreeSet<String>,
    pub date_range: DayRange,
}

/// Health report of the statistics API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayHealth {
    pub status: String,
    pub timeline_loaded: bool,
    pub activities_count: u64,
}

/// Result of submitting an address to the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitlistOutcome {
    Added,
    AlreadyListed,
}

impl WaitlistOutcome {
    /// Message shown to the visitor after submitting.
    pub fn message(self) -> &'static str {
        match self {
            WaitlistOutcome::Added => {
                "Thanks! You're on the waitlist. We'll notify you when VAN'GON launches!"
            }
            WaitlistOutcome::AlreadyListed => {
                "You're already on the waitlist! We'll notify you when VAN'GON launches."
            }
        }
    }
}
