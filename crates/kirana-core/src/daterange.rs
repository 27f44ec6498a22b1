//! # Date Range Module
//!
//! Dashboard range presets, resolved client-side into the start/end instants
//! the analytics endpoints take as query parameters. The backend never sees
//! a preset name, only concrete timestamps.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A dashboard date-range selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RangePreset {
    Today,
    Yesterday,
    Last7Days,
    #[default]
    Last30Days,
    MonthToDate,
    YearToDate,
    LastMonth,
    /// No bounds at all; analytics queries go out without date filters.
    AllTime,
    Custom {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl RangePreset {
    /// Resolves the preset to `(start, end)` relative to `now`.
    ///
    /// `None` means unbounded (all time). Day-based presets start at
    /// midnight; rolling presets ("last 7 days") are exact offsets from
    /// `now` so two dashboards opened a minute apart differ by a minute,
    /// same as the original behavior.
    pub fn resolve(&self, now: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let today = now.date();
        match *self {
            RangePreset::Today => Some((midnight(today), now)),
            RangePreset::Yesterday => {
                let yesterday = today - Duration::days(1);
                Some((midnight(yesterday), midnight(today)))
            }
            RangePreset::Last7Days => Some((now - Duration::days(7), now)),
            RangePreset::Last30Days => Some((now - Duration::days(30), now)),
            RangePreset::MonthToDate => Some((midnight(first_of_month(today)), now)),
            RangePreset::YearToDate => {
                let jan1 = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                    .expect("January 1st is always a valid date");
                Some((midnight(jan1), now))
            }
            RangePreset::LastMonth => {
                let this_month = first_of_month(today);
                let prev_month = first_of_month(this_month - Duration::days(1));
                Some((midnight(prev_month), midnight(this_month)))
            }
            RangePreset::AllTime => None,
            RangePreset::Custom { start, end } => Some((start, end)),
        }
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).expect("midnight is always valid")
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 is always valid")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_today_starts_at_midnight() {
        let now = at(2026, 3, 15, 14);
        let (start, end) = RangePreset::Today.resolve(now).unwrap();
        assert_eq!(start, at(2026, 3, 15, 0));
        assert_eq!(end, now);
    }

    #[test]
    fn test_yesterday_is_a_closed_day() {
        let now = at(2026, 3, 15, 14);
        let (start, end) = RangePreset::Yesterday.resolve(now).unwrap();
        assert_eq!(start, at(2026, 3, 14, 0));
        assert_eq!(end, at(2026, 3, 15, 0));
    }

    #[test]
    fn test_rolling_presets_are_exact_offsets() {
        let now = at(2026, 3, 15, 14);
        let (start, _) = RangePreset::Last7Days.resolve(now).unwrap();
        assert_eq!(start, at(2026, 3, 8, 14));
    }

    #[test]
    fn test_last_month_spans_previous_calendar_month() {
        let now = at(2026, 3, 15, 14);
        let (start, end) = RangePreset::LastMonth.resolve(now).unwrap();
        assert_eq!(start, at(2026, 2, 1, 0));
        assert_eq!(end, at(2026, 3, 1, 0));
    }

    #[test]
    fn test_last_month_across_year_boundary() {
        let now = at(2026, 1, 10, 9);
        let (start, end) = RangePreset::LastMonth.resolve(now).unwrap();
        assert_eq!(start, at(2025, 12, 1, 0));
        assert_eq!(end, at(2026, 1, 1, 0));
    }

    #[test]
    fn test_all_time_is_unbounded() {
        assert!(RangePreset::AllTime.resolve(at(2026, 3, 15, 14)).is_none());
    }

    #[test]
    fn test_custom_passes_through() {
        let start = at(2026, 1, 1, 0);
        let end = at(2026, 2, 1, 0);
        let preset = RangePreset::Custom { start, end };
        assert_eq!(preset.resolve(at(2026, 6, 1, 12)).unwrap(), (start, end));
    }
}
