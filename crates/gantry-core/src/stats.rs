use crate::model::Project;
use serde::Serialize;

/// Header counters. `planned` counts projects with both dates; everything else, including
/// projects with a single date, is `unplanned`, so the two always add up to `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub planned: usize,
    pub unplanned: usize,
}

impl ProjectStats {
    pub fn collect(projects: &[Project]) -> Self {
        projects.iter().fold(Self::default(), |mut acc, p| {
            acc.total += 1;
            acc.planned += usize::from(p.is_planned());
            acc.unplanned += usize::from(!p.is_planned());
            acc
        })
    }

    /// Projects with exactly one date. They are part of `unplanned`.
    pub fn partially_planned(projects: &[Project]) -> usize {
        projects
            .iter()
            .filter(|p| !p.is_planned() && !p.is_unplanned())
            .count()
    }
}
