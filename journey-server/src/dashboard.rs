//! Presentation of dashboard statistics.
//!
//! Turns the raw numbers from the statistics API into the strings shown on
//! the dashboard page. Nothing here performs I/O.

use crate::domain::{DashboardStats, RecentStop, humanize_code, parse_instant};

/// Banner shown when any dashboard data failed to load.
pub const LOAD_ERROR_MESSAGE: &str = "Could not load data";

/// Day the journey started, shown under the day count.
const JOURNEY_START_LABEL: &str = "Since June 10, 2025";

/// Icon drawn on a metric card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardIcon {
    Van,
    Walker,
    Bicycle,
    Pin,
    Calendar,
}

impl CardIcon {
    /// CSS class of the icon.
    pub fn css_class(self) -> &'static str {
        match self {
            CardIcon::Van => "icon-van",
            CardIcon::Walker => "icon-walker",
            CardIcon::Bicycle => "icon-bicycle",
            CardIcon::Pin => "icon-pin",
            CardIcon::Calendar => "icon-calendar",
        }
    }
}

/// One headline number on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: &'static str,
    pub primary: String,
    pub secondary: String,
    pub icon: CardIcon,
}

/// A label/value row of the journey statistics panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub label: &'static str,
    pub value: String,
}

/// A recent stop ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentStopView {
    pub name: String,
    /// e.g. "1 Sep 2025"; empty if the start time is unreadable.
    pub date: String,
    /// e.g. "21.5h"
    pub duration: String,
}

impl From<&RecentStop> for RecentStopView {
    fn from(stop: &RecentStop) -> Self {
        Self {
            name: stop.name.clone(),
            date: parse_instant(&stop.start_time)
                .map(|t| t.format("%-d %b %Y").to_string())
                .unwrap_or_default(),
            duration: format!("{:.1}h", stop.duration_hours),
        }
    }
}

/// Build the metric cards.
pub fn metric_cards(stats: &DashboardStats) -> Vec<MetricCard> {
    vec![
        MetricCard {
            label: "Vehicle Kilometers",
            primary: whole_km(stats.vehicle_distance),
            secondary: format!("{:.1} km per day", stats.avg_distance_per_day),
            icon: CardIcon::Van,
        },
        MetricCard {
            label: "Walking Distance",
            primary: whole_km(stats.walking_distance),
            secondary: "On foot exploration".to_string(),
            icon: CardIcon::Walker,
        },
        MetricCard {
            label: "Cycling Distance",
            primary: whole_km(stats.cycling_distance),
            secondary: "Pedal-powered adventures".to_string(),
            icon: CardIcon::Bicycle,
        },
        MetricCard {
            label: "Countries Traveled",
            primary: stats.countries_visited.to_string(),
            secondary: format!("{} recorded activities", stats.total_activities),
            icon: CardIcon::Pin,
        },
        MetricCard {
            label: "Days On The Road",
            primary: stats.days_on_road.to_string(),
            secondary: JOURNEY_START_LABEL.to_string(),
            icon: CardIcon::Calendar,
        },
    ]
}

/// Rows of the journey statistics panel.
pub fn journey_stats(stats: &DashboardStats) -> Vec<StatRow> {
    vec![
        StatRow {
            label: "Average Distance / Day",
            value: format!("{:.1} km", stats.avg_distance_per_day),
        },
        StatRow {
            label: "Total Activities Logged",
            value: stats.total_activities.to_string(),
        },
        StatRow {
            label: "Most Frequent Mode",
            value: humanize_code(&stats.most_common_activity),
        },
    ]
}

/// Rows shown when statistics are unavailable.
pub fn fallback_journey_stats() -> Vec<StatRow> {
    vec![
        StatRow {
            label: "Average Distance / Day",
            value: "0.0 km".to_string(),
        },
        StatRow {
            label: "Total Activities",
            value: "0".to_string(),
        },
        StatRow {
            label: "Countries Logged",
            value: "0".to_string(),
        },
    ]
}

/// Kilometres rounded to a whole number, with thousands separators.
fn whole_km(km: f64) -> String {
    format!("{} km", group_thousands(km.round() as i64))
}

/// Format an integer with `,` between groups of three digits.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
