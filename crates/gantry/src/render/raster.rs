#![forbid(unsafe_code)]

//! PNG export of a rendered timeline.

use crate::render::{LayoutOptions, SvgRenderOptions};

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("timeline SVG could not be parsed: {0}")]
    SvgParse(String),
    #[error("cannot allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Device pixels per SVG unit. Non-positive values fall back to 1.
    pub scale: f32,
    /// Fill painted under the chart: `transparent`, `white`, `black`, `#rgb[a]` or
    /// `#rrggbb[aa]`. Unrecognized values are ignored.
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: None,
        }
    }
}

/// Lays out, draws and rasterizes `projects` in one call.
pub fn render_png(
    projects: &[crate::Project],
    layout_options: &LayoutOptions,
    svg_options: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg(projects, layout_options, svg_options);
    svg_to_png(&svg, raster)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let mut fonts = usvg::Options::default();
    fonts.fontdb_mut().load_system_fonts();
    fonts.font_family = "Arial".to_string();
    let tree = usvg::Tree::from_str(svg, &fonts).map_err(|e| RasterError::SvgParse(e.to_string()))?;

    let scale = Some(options.scale)
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(1.0);
    let width = pixels(tree.size().width(), scale);
    let height = pixels(tree.size().height(), scale);
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::PixmapAlloc { width, height })?;

    if let Some(fill) = options.background.as_deref().and_then(background_color) {
        pixmap.fill(fill);
    }
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    pixmap
        .encode_png()
        .map_err(|e| RasterError::PngEncode(e.to_string()))
}

fn pixels(units: f32, scale: f32) -> u32 {
    (units * scale).ceil().max(1.0) as u32
}

fn background_color(text: &str) -> Option<tiny_skia::Color> {
    let text = text.trim();
    let [r, g, b, a] = match text.to_ascii_lowercase().as_str() {
        "transparent" => [0, 0, 0, 0],
        "white" => [255, 255, 255, 255],
        "black" => [0, 0, 0, 255],
        _ => hex_rgba(text.strip_prefix('#')?)?,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, a))
}

fn hex_rgba(hex: &str) -> Option<[u8; 4]> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    // Short forms double every digit: `#0f8` is `#00ff88`.
    let full: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return None,
    };
    let value = u32::from_str_radix(&full, 16).ok()?;
    Some(if full.len() == 6 {
        ((value << 8) | 0xff).to_be_bytes()
    } else {
        value.to_be_bytes()
    })
}
