use super::Bucket;
use crate::model::{Project, Schedule, ViewMode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placement of an unplanned project's placeholder bar (centered, 10% wide).
pub const UNPLANNED_LEFT: f64 = 45.0;
pub const UNPLANNED_WIDTH: f64 = 10.0;

/// Horizontal bar geometry as percentages of the full timeline width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPosition {
    pub left: f64,
    pub width: f64,
    /// Set when a date fell outside every bucket, the end preceded the start, or there were
    /// no buckets at all. Never affects `left`/`width`.
    #[serde(default)]
    pub clamped: bool,
}

impl BarPosition {
    pub const UNPLANNED: BarPosition = BarPosition {
        left: UNPLANNED_LEFT,
        width: UNPLANNED_WIDTH,
        clamped: false,
    };

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Index of the bucket holding `date`.
///
/// Day view matches a bucket's start day exactly; week and month views test interval
/// containment. Buckets must be ascending.
pub fn bucket_index(buckets: &[Bucket], date: NaiveDate, view: ViewMode) -> Option<usize> {
    let idx = buckets.partition_point(|b| b.end < date);
    let bucket = buckets.get(idx)?;
    let hit = match view {
        ViewMode::Day => bucket.start == date,
        ViewMode::Week | ViewMode::Month => bucket.contains(date),
    };
    hit.then_some(idx)
}

pub fn project_position(project: &Project, buckets: &[Bucket], view: ViewMode) -> BarPosition {
    let pos = position_for_schedule(project.schedule(), buckets, view);
    if pos.clamped {
        tracing::warn!(
            project_id = project.id,
            buckets = buckets.len(),
            left = pos.left,
            width = pos.width,
            "bar position clamped"
        );
    }
    pos
}

/// Bar geometry for a bare schedule. Never fails: anomalies are clamped into a renderable,
/// non-negative, in-range result.
pub fn position_for_schedule(schedule: Schedule, buckets: &[Bucket], view: ViewMode) -> BarPosition {
    let (start, end) = match schedule {
        Schedule::Unplanned => return BarPosition::UNPLANNED,
        Schedule::StartsOn(s) => (Some(s), None),
        Schedule::EndsOn(e) => (None, Some(e)),
        Schedule::Between(s, e) => (Some(s), Some(e)),
    };

    let Some(last) = buckets.len().checked_sub(1) else {
        return BarPosition {
            left: 0.0,
            width: 100.0,
            clamped: true,
        };
    };

    let mut clamped = false;
    let mut locate = |date: Option<NaiveDate>, fallback: usize| match date {
        None => fallback,
        Some(d) => bucket_index(buckets, d, view).unwrap_or_else(|| {
            clamped = true;
            fallback
        }),
    };
    let start_idx = locate(start, 0);
    let mut end_idx = locate(end, last);
    if end_idx < start_idx {
        end_idx = start_idx;
        clamped = true;
    }

    let total = buckets.len() as f64;
    let pct = |n: usize| n as f64 / total * 100.0;
    let (left, width) = match schedule {
        Schedule::StartsOn(_) => {
            let left = pct(start_idx);
            (left, 100.0 - left)
        }
        Schedule::EndsOn(_) => (0.0, pct(end_idx + 1)),
        _ => (pct(start_idx), pct(end_idx - start_idx + 1)),
    };

    BarPosition {
        left,
        width,
        clamped,
    }
}
