//! Timeline layout engine.
//!
//! The three stages compose linearly: [`resolve_span`] picks the visible date range,
//! [`bucket_span`] splits it into day/week/month columns, and [`project_position`] maps each
//! project onto those columns as percentages. Every stage is total: anomalous input is clamped,
//! never rejected.

mod bucket;
mod position;
mod span;

pub use bucket::{Bucket, bucket_span, bucket_span_localized};
pub use position::{
    BarPosition, UNPLANNED_LEFT, UNPLANNED_WIDTH, bucket_index, position_for_schedule,
    project_position,
};
pub use span::{Span, SpanOptions, resolve_span, resolve_span_with};

use crate::i18n::Language;
use crate::model::{Project, ViewMode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBar {
    pub project_id: u64,
    pub position: BarPosition,
}

/// Result of one full layout pass, in percentage space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub span: Span,
    pub view_mode: ViewMode,
    pub buckets: Vec<Bucket>,
    /// One entry per input project, in input order.
    pub bars: Vec<ProjectBar>,
}

impl Timeline {
    pub fn bar(&self, project_id: u64) -> Option<&BarPosition> {
        self.bars
            .iter()
            .find(|b| b.project_id == project_id)
            .map(|b| &b.position)
    }
}

/// Runs span resolution, bucketing and positioning for `projects`.
pub fn layout_timeline(
    projects: &[Project],
    view: ViewMode,
    today: NaiveDate,
    options: &SpanOptions,
    language: Language,
) -> Timeline {
    let span = resolve_span_with(projects, today, options);
    let buckets = bucket_span_localized(span, view, language);
    let bars = projects
        .iter()
        .map(|p| ProjectBar {
            project_id: p.id,
            position: project_position(p, &buckets, view),
        })
        .collect();
    tracing::debug!(
        projects = projects.len(),
        buckets = buckets.len(),
        view = %view,
        min = %span.min,
        max = %span.max,
        "timeline layout"
    );
    Timeline {
        span,
        view_mode: view,
        buckets,
        bars,
    }
}
