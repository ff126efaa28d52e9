#![forbid(unsafe_code)]

//! `gantry` is a headless project timeline (Gantt) engine.
//!
//! The core crate is re-exported at the root: the project model, the file store, JSON exchange,
//! validation, and the percentage-space layout engine.
//!
//! # Features
//!
//! - `render`: pixel layout + SVG rendering (`gantry::render`)
//! - `raster`: PNG output via pure-Rust SVG rasterization (`gantry::render::raster`)

pub use gantry_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use gantry_render::layout::{bar_title, is_current_period, row_caption};
    pub use gantry_render::model::{
        BarLayout, ColumnLayout, RowLayout, TimelineLayout, ZoomLevel, column_width,
    };
    pub use gantry_render::svg::{SvgRenderOptions, render_timeline_svg};
    pub use gantry_render::{Error, LayoutOptions, Result, layout_timeline};

    #[cfg(feature = "raster")]
    pub mod raster;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several timelines
    /// can be inlined in one document without colliding `chart-title-<id>` ids.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        let mut out = String::with_capacity(raw.len() + 2);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
            out.push(if ok { ch } else { '-' });
        }
        if !out.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            out.insert_str(0, "g-");
        }
        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "g" {
            return "g-untitled".to_string();
        }
        out.to_string()
    }

    /// Lays out and draws `projects` in one call.
    pub fn render_svg(
        projects: &[crate::Project],
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> String {
        let layout = layout_timeline(projects, layout_options);
        render_timeline_svg(&layout, svg_options)
    }

    /// Bundles layout and SVG options for repeated rendering.
    #[derive(Debug, Clone, Default)]
    pub struct Renderer {
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl Renderer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Layout options from `config` (see [`LayoutOptions::from_config`]).
        pub fn from_config(config: &crate::Config) -> Result<Self> {
            Ok(Self {
                layout: LayoutOptions::from_config(config)?,
                svg: SvgRenderOptions::default(),
            })
        }

        /// Takes theme and language from the store.
        pub fn with_store_preferences(mut self, store: &crate::Store) -> Self {
            self.layout.theme = store.theme();
            self.layout.language = store.language();
            self
        }

        pub fn layout(&self, projects: &[crate::Project]) -> TimelineLayout {
            layout_timeline(projects, &self.layout)
        }

        pub fn render_svg(&self, projects: &[crate::Project]) -> String {
            render_svg(projects, &self.layout, &self.svg)
        }

        #[cfg(feature = "raster")]
        pub fn render_png(
            &self,
            projects: &[crate::Project],
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_png(&self.render_svg(projects), raster)
        }
    }

}
