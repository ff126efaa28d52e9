use chrono::NaiveDate;
use gantry_core::{BarPosition, Language, Span, Theme, ViewMode};
use serde::{Deserialize, Serialize};

/// Chart zoom factor. Scales column pixel widths only; bucket math never sees it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct ZoomLevel(f64);

impl ZoomLevel {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 2.0;
    pub const STEP: f64 = 0.1;
    pub const DEFAULT: f64 = 1.0;

    /// Clamps into `[MIN, MAX]`; non-finite input resets to `DEFAULT`.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self(Self::DEFAULT);
        }
        // Keep one decimal so repeated steps don't accumulate float noise.
        let tenths = (value * 10.0).round() / 10.0;
        Self(tenths.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + Self::STEP)
    }

    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - Self::STEP)
    }

    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn percent(self) -> i64 {
        (self.0 * 100.0).round() as i64
    }
}

impl From<f64> for ZoomLevel {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<ZoomLevel> for f64 {
    fn from(zoom: ZoomLevel) -> Self {
        zoom.0
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Unzoomed column width in pixels.
pub fn base_column_width(view: ViewMode) -> f64 {
    match view {
        ViewMode::Day => 60.0,
        ViewMode::Week => 120.0,
        ViewMode::Month => 180.0,
    }
}

/// `max(base * zoom, base * 0.7)`.
pub fn column_width(view: ViewMode, zoom: ZoomLevel) -> f64 {
    let base = base_column_width(view);
    (base * zoom.value()).max(base * 0.7)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
    pub x: f64,
    pub width: f64,
    /// The column holding "today".
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Percentage geometry the pixel values were derived from.
    pub position: BarPosition,
    pub unplanned: bool,
    /// Hover text: name, then `start - end` with placeholders for missing dates.
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    pub project_id: u64,
    pub name: String,
    /// Date summary shown under the name, e.g. `2025-01-03 - Open`.
    pub caption: String,
    pub color: Option<String>,
    pub y: f64,
    pub height: f64,
    pub bar: BarLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub view_mode: ViewMode,
    pub zoom: ZoomLevel,
    pub theme: Theme,
    pub language: Language,
    pub today: NaiveDate,
    pub span: Span,
    /// e.g. `91 days`.
    pub unit_summary: String,
    pub column_width: f64,
    pub label_width: f64,
    pub title_height: f64,
    pub header_height: f64,
    pub row_height: f64,
    pub footer_height: f64,
    pub width: f64,
    pub height: f64,
    pub columns: Vec<ColumnLayout>,
    pub rows: Vec<RowLayout>,
}

impl TimelineLayout {
    pub fn track_x(&self) -> f64 {
        self.label_width
    }

    pub fn track_width(&self) -> f64 {
        self.columns.len() as f64 * self.column_width
    }

    pub fn header_y(&self) -> f64 {
        self.title_height
    }

    pub fn body_y(&self) -> f64 {
        self.title_height + self.header_height
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
