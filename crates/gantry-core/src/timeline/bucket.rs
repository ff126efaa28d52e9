use super::Span;
use crate::date::{
    day_label, end_of_month, end_of_week, month_label, next_day, start_of_month, start_of_week,
    week_label,
};
use crate::i18n::Language;
use crate::model::ViewMode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One timeline column: an inclusive calendar interval plus its header label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl Bucket {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Splits `span` into contiguous columns using English labels.
pub fn bucket_span(span: Span, view: ViewMode) -> Vec<Bucket> {
    bucket_span_localized(span, view, Language::En)
}

/// Splits `span` into contiguous, ascending columns of the requested granularity.
///
/// Week and month iteration is aligned to the boundary on or before `span.min`; the first and
/// last columns are clamped to the span so the union is exactly `[span.min, span.max]`. An
/// inverted span yields no columns.
pub fn bucket_span_localized(span: Span, view: ViewMode, language: Language) -> Vec<Bucket> {
    if span.max < span.min {
        return Vec::new();
    }

    match view {
        ViewMode::Day => day_buckets(span),
        ViewMode::Week => aligned_buckets(span, start_of_week, end_of_week, week_label),
        ViewMode::Month => aligned_buckets(span, start_of_month, end_of_month, |start, _| {
            month_label(start, language)
        }),
    }
}

fn day_buckets(span: Span) -> Vec<Bucket> {
    let mut out = Vec::with_capacity(usize::try_from(span.days()).unwrap_or(0).min(4096));
    let mut cur = span.min;
    loop {
        out.push(Bucket {
            start: cur,
            end: cur,
            label: day_label(cur),
        });
        if cur >= span.max {
            break;
        }
        let Some(next) = next_day(cur) else {
            break;
        };
        cur = next;
    }
    out
}

fn aligned_buckets(
    span: Span,
    align_start: fn(NaiveDate) -> NaiveDate,
    natural_end: fn(NaiveDate) -> NaiveDate,
    label: impl Fn(NaiveDate, NaiveDate) -> String,
) -> Vec<Bucket> {
    let mut out = Vec::new();
    let mut cur = align_start(span.min);
    while cur <= span.max {
        let unit_end = natural_end(cur);
        let end = unit_end.min(span.max);
        // Only the interval is clamped; the label keeps the natural week or month start.
        out.push(Bucket {
            start: cur.max(span.min),
            end,
            label: label(cur, end),
        });
        let Some(next) = next_day(unit_end) else {
            break;
        };
        cur = next;
    }
    out
}
