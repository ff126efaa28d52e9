use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Informational project category. Never consulted by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    #[default]
    Feature,
    Bugfix,
    Milestone,
    Release,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 4] = [
        ProjectKind::Feature,
        ProjectKind::Bugfix,
        ProjectKind::Milestone,
        ProjectKind::Release,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectKind::Feature => "feature",
            ProjectKind::Bugfix => "bugfix",
            ProjectKind::Milestone => "milestone",
            ProjectKind::Release => "release",
        }
    }
}

impl FromStr for ProjectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feature" => Ok(Self::Feature),
            "bugfix" => Ok(Self::Bugfix),
            "milestone" => Ok(Self::Milestone),
            "release" => Ok(Self::Release),
            _ => Err(Error::InvalidProjectKind {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timeline granularity. Only changes how the span is bucketed, never the project dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Day,
    /// Sunday-start weeks.
    Week,
    Month,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Day, ViewMode::Week, ViewMode::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        }
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(Error::InvalidViewMode {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of a project's two dates are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Unplanned,
    /// Open-ended forward: the bar runs to the right edge.
    StartsOn(NaiveDate),
    /// Open-ended backward: the bar runs from the left edge.
    EndsOn(NaiveDate),
    Between(NaiveDate, NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ProjectKind,
    #[serde(default, with = "crate::date::serde_opt")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "crate::date::serde_opt")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Project {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ProjectKind::default(),
            start_date: None,
            end_date: None,
            description: None,
            color: None,
        }
    }

    pub fn from_draft(id: u64, draft: ProjectDraft) -> Self {
        Self {
            id,
            name: draft.name,
            kind: draft.kind,
            start_date: draft.start_date,
            end_date: draft.end_date,
            description: draft.description,
            color: draft.color,
        }
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn schedule(&self) -> Schedule {
        match (self.start_date, self.end_date) {
            (None, None) => Schedule::Unplanned,
            (Some(s), None) => Schedule::StartsOn(s),
            (None, Some(e)) => Schedule::EndsOn(e),
            (Some(s), Some(e)) => Schedule::Between(s, e),
        }
    }

    /// Both dates set.
    pub fn is_planned(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    pub fn is_unplanned(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    /// Every date this project contributes to the timeline span.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start_date.into_iter().chain(self.end_date)
    }

    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone(),
            kind: self.kind,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description.clone(),
            color: self.color.clone(),
        }
    }
}

/// A project as entered in a form, before it has an identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ProjectKind,
    #[serde(default, with = "crate::date::serde_opt")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "crate::date::serde_opt")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Form defaults for a new project: starts today, ends a week later.
    pub fn with_default_dates(name: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date: Some(today),
            end_date: Some(crate::date::add_days(today, 7)),
            ..Default::default()
        }
    }
}
