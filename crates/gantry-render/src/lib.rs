#![forbid(unsafe_code)]

//! Pixel layout and SVG output for gantry timelines.
//!
//! [`layout_timeline`] turns projects into a [`model::TimelineLayout`] (columns, rows and bar
//! rectangles in pixels); [`svg::render_timeline_svg`] draws that layout. Theme and language are
//! carried explicitly in [`LayoutOptions`].

pub mod layout;
pub mod model;
pub mod svg;

pub use layout::layout_timeline;
pub use model::{TimelineLayout, ZoomLevel};

use chrono::NaiveDate;
use gantry_core::{Config, Language, SpanOptions, Theme, ViewMode};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] gantry_core::Error),
    #[error("invalid render option `{key}`: {message}")]
    InvalidOption { key: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub view_mode: ViewMode,
    pub zoom: ZoomLevel,
    pub theme: Theme,
    pub language: Language,
    pub span_options: SpanOptions,
    /// `None` uses [`gantry_core::time::today`].
    pub today: Option<NaiveDate>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            zoom: ZoomLevel::default(),
            theme: Theme::default(),
            language: Language::default(),
            span_options: SpanOptions::default(),
            today: None,
        }
    }
}

impl LayoutOptions {
    /// Reads `viewMode`, `zoom`, `theme`, `language`, `today` and the `timeline.*` keys.
    ///
    /// Missing keys keep their defaults; present but unparseable values are errors.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut out = Self {
            span_options: SpanOptions::from_config(config),
            ..Self::default()
        };
        if let Some(v) = config.get_str("viewMode") {
            out.view_mode = v.parse()?;
        }
        if let Some(v) = config.get_str("theme") {
            out.theme = v.parse()?;
        }
        if let Some(v) = config.get_str("language") {
            out.language = v.parse()?;
        }
        if let Some(v) = config.get_str("today") {
            out.today = Some(gantry_core::date::parse_date(v)?);
        }
        match config.as_value().get("zoom") {
            None => {}
            Some(v) => {
                let z = v.as_f64().filter(|z| z.is_finite()).ok_or_else(|| {
                    Error::InvalidOption {
                        key: "zoom".to_string(),
                        message: format!("expected a number, got {v}"),
                    }
                })?;
                out.zoom = ZoomLevel::new(z);
            }
        }
        Ok(out)
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_zoom(mut self, zoom: ZoomLevel) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_today(mut self, today: Option<NaiveDate>) -> Self {
        self.today = today;
        self
    }
}
