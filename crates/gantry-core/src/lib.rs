#![forbid(unsafe_code)]

//! Project timeline model + Gantt layout engine (headless).
//!
//! Design goals:
//! - pure, deterministic layout: the same projects, view mode and "today" give the same output
//! - total functions: missing or inverted dates are clamped into a drawable bar, never an error
//! - everything the editor persists (projects, theme, language) round-trips through plain JSON

pub mod config;
pub mod date;
pub mod error;
pub mod exchange;
pub mod i18n;
pub mod model;
mod runtime;
pub mod stats;
pub mod store;
pub mod theme;
pub mod time;
pub mod timeline;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use i18n::{Language, Message};
pub use model::{Project, ProjectDraft, ProjectKind, Schedule, ViewMode};
pub use stats::ProjectStats;
pub use store::Store;
pub use theme::{Palette, Theme};
pub use timeline::{
    BarPosition, Bucket, ProjectBar, Span, SpanOptions, Timeline, bucket_span, project_position,
    resolve_span,
};

/// Entry point bundling the knobs a layout pass depends on.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    span_options: SpanOptions,
    language: Language,
    fixed_today_local: Option<chrono::NaiveDate>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the "today" value used for the empty-timeline fallback window.
    ///
    /// By default the current local date is used, honoring [`time::with_fixed_today`].
    pub fn with_fixed_today(mut self, today: Option<chrono::NaiveDate>) -> Self {
        self.fixed_today_local = today;
        self
    }

    pub fn with_span_options(mut self, options: SpanOptions) -> Self {
        self.span_options = options;
        self
    }

    /// Language used for month column labels.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Applies the `timeline.*` keys of `config`.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.span_options = SpanOptions::from_config(config);
        self
    }

    pub fn span_options(&self) -> &SpanOptions {
        &self.span_options
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.fixed_today_local.unwrap_or_else(time::today)
    }

    pub fn resolve_span(&self, projects: &[Project]) -> Span {
        timeline::resolve_span_with(projects, self.today(), &self.span_options)
    }

    pub fn buckets(&self, span: Span, view: ViewMode) -> Vec<Bucket> {
        timeline::bucket_span_localized(span, view, self.language)
    }

    pub fn position(&self, project: &Project, buckets: &[Bucket], view: ViewMode) -> BarPosition {
        timeline::project_position(project, buckets, view)
    }

    pub fn layout(&self, projects: &[Project], view: ViewMode) -> Timeline {
        timeline::layout_timeline(
            projects,
            view,
            self.today(),
            &self.span_options,
            self.language,
        )
    }
}
