use crate::config::Config;
use crate::date::add_days;
use crate::model::Project;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` date range shown by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl Span {
    pub fn new(min: NaiveDate, max: NaiveDate) -> Self {
        Self { min, max }
    }

    /// Number of calendar days covered, or 0 when the range is inverted.
    pub fn days(&self) -> i64 {
        let n = (self.max - self.min).num_days() + 1;
        n.max(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanOptions {
    /// Days added before the earliest project date.
    pub pad_before_days: i64,
    /// Days added after the latest project date.
    pub pad_after_days: i64,
    /// Length of the `[today, today + n]` window used when no project has a date.
    pub default_window_days: i64,
}

impl Default for SpanOptions {
    fn default() -> Self {
        Self {
            pad_before_days: 30,
            pad_after_days: 60,
            default_window_days: 90,
        }
    }
}

impl SpanOptions {
    /// Reads `timeline.padBeforeDays`, `timeline.padAfterDays` and
    /// `timeline.defaultWindowDays`; negative or missing values keep the defaults.
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: i64| {
            config
                .get_i64(&format!("timeline.{key}"))
                .filter(|v| *v >= 0)
                .unwrap_or(fallback)
        };
        Self {
            pad_before_days: read("padBeforeDays", defaults.pad_before_days),
            pad_after_days: read("padAfterDays", defaults.pad_after_days),
            default_window_days: read("defaultWindowDays", defaults.default_window_days),
        }
    }
}

/// Resolves the displayed span with the default padding (30 days before, 60 after) and the
/// default 90-day window.
pub fn resolve_span(projects: &[Project], today: NaiveDate) -> Span {
    resolve_span_with(projects, today, &SpanOptions::default())
}

pub fn resolve_span_with(projects: &[Project], today: NaiveDate, options: &SpanOptions) -> Span {
    let mut dates = projects.iter().flat_map(Project::dates);
    let Some(first) = dates.next() else {
        return Span::new(today, add_days(today, options.default_window_days));
    };

    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Span::new(
        add_days(min, -options.pad_before_days),
        add_days(max, options.pad_after_days),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn empty_and_undated_sets_fall_back_to_ninety_days_from_today() {
        let today = d(2025, 6, 15);
        let expected = Span::new(today, d(2025, 9, 13));
        assert_eq!(resolve_span(&[], today), expected);

        let undated = vec![Project::new(1, "a"), Project::new(2, "b")];
        assert_eq!(resolve_span(&undated, today), expected);
        assert_eq!(expected.days(), 91);
    }

    #[test]
    fn dated_sets_are_padded_around_the_extremes() {
        let projects = vec![
            Project::new(1, "a").with_dates(Some(d(2025, 3, 10)), Some(d(2025, 3, 20))),
            Project::new(2, "b").with_dates(None, Some(d(2025, 4, 1))),
            Project::new(3, "c").with_dates(Some(d(2025, 2, 1)), None),
            Project::new(4, "unplanned"),
        ];
        let span = resolve_span(&projects, d(2000, 1, 1));
        assert_eq!(span, Span::new(d(2025, 1, 2), d(2025, 5, 31)));
    }

    #[test]
    fn inverted_project_dates_still_produce_an_ordered_span() {
        let projects =
            vec![Project::new(1, "bad").with_dates(Some(d(2025, 5, 1)), Some(d(2025, 4, 1)))];
        let span = resolve_span(&projects, d(2000, 1, 1));
        assert!(span.min <= span.max);
        assert_eq!(span, Span::new(d(2025, 3, 2), d(2025, 6, 30)));
    }

    #[test]
    fn padding_saturates_at_the_calendar_edges() {
        let projects =
            vec![Project::new(1, "edge").with_dates(Some(NaiveDate::MIN), Some(NaiveDate::MAX))];
        let span = resolve_span(&projects, d(2000, 1, 1));
        assert_eq!(span, Span::new(NaiveDate::MIN, NaiveDate::MAX));
    }

    #[test]
    fn options_come_from_config() {
        let cfg = Config::from_value(json!({
            "timeline": { "padBeforeDays": 7, "padAfterDays": -3, "defaultWindowDays": 14 }
        }));
        let opts = SpanOptions::from_config(&cfg);
        assert_eq!(
            opts,
            SpanOptions {
                pad_before_days: 7,
                pad_after_days: 60,
                default_window_days: 14,
            }
        );
        assert_eq!(
            resolve_span_with(&[], d(2025, 1, 1), &opts),
            Span::new(d(2025, 1, 1), d(2025, 1, 15))
        );
    }
}
