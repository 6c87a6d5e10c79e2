//! Route filter criteria.

use chrono::{DateTime, NaiveDate, Utc};

use super::time::{day_end, day_start};

/// Inclusive range of calendar days.
///
/// Either end may be open. The end day is included through its last
/// millisecond.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Range with both ends set.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// True when neither end is set.
    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether an instant falls inside the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use journey_server::domain::{DateRange, parse_instant};
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    /// let range = DateRange::new(None, Some(day));
    ///
    /// assert!(range.contains(parse_instant("2024-12-31T23:59:59Z").unwrap()));
    /// assert!(!range.contains(parse_instant("2025-01-01T00:00:00Z").unwrap()));
    /// ```
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        let after_start = self.start.is_none_or(|start| t >= day_start(start));
        let before_end = self.end.is_none_or(|end| t <= day_end(end));
        after_start && before_end
    }
}

/// User-selected filter combination.
///
/// Every field is independently optional; an unset field filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact, case-sensitive activity code.
    pub transport_mode: Option<String>,

    /// Location label matched against either end of a segment.
    pub country: Option<String>,

    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    /// Criteria that pass every segment through.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_transport_mode(mut self, mode: impl Into<String>) -> Self {
        self.transport_mode = Some(mode.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.transport_mode.is_none()
            && self.country.is_none()
            && self.date_range.is_none_or(|r| r.is_open())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_instant;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn open_range_contains_everything() {
        let range = DateRange::default();
        assert!(range.is_open());
        assert!(range.contains(parse_instant("1970-01-01T00:00:00Z").unwrap()));
        assert!(range.contains(parse_instant("2999-01-01T00:00:00Z").unwrap()));
    }

    #[test]
    fn start_is_midnight_inclusive() {
        let range = DateRange::new(Some(day(2024, 12, 5)), None);
        assert!(range.contains(parse_instant("2024-12-05T00:00:00Z").unwrap()));
        assert!(!range.contains(parse_instant("2024-12-04T23:59:59.999Z").unwrap()));
    }

    #[test]
    fn end_covers_whole_day() {
        let range = DateRange::new(None, Some(day(2024, 12, 31)));
        assert!(range.contains(parse_instant("2024-12-31T00:00:00Z").unwrap()));
        assert!(range.contains(parse_instant("2024-12-31T23:59:59.999Z").unwrap()));
        assert!(!range.contains(parse_instant("2025-01-01T00:00:00Z").unwrap()));
    }

    #[test]
    fn single_day_range() {
        let range = DateRange::between(day(2024, 12, 10), day(2024, 12, 10));
        assert!(range.contains(parse_instant("2024-12-10T08:00:00Z").unwrap()));
        assert!(!range.contains(parse_instant("2024-12-11T08:00:00Z").unwrap()));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let range = DateRange::between(day(2024, 12, 10), day(2024, 12, 1));
        assert!(!range.contains(parse_instant("2024-12-05T08:00:00Z").unwrap()));
    }

    #[test]
    fn builder_and_emptiness() {
        assert!(FilterCriteria::none().is_empty());
        assert!(
            FilterCriteria::none()
                .with_date_range(DateRange::default())
                .is_empty()
        );

        let c = FilterCriteria::none()
            .with_transport_mode("WALKING")
            .with_country("Portugal");
        assert!(!c.is_empty());
        assert_eq!(c.transport_mode.as_deref(), Some("WALKING"));
        assert_eq!(c.country.as_deref(), Some("Portugal"));
    }
}
