use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Blue,
    Green,
    Purple,
}

/// Resolved colors for one theme. All values are `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub name: &'static str,
    pub primary: &'static str,
    pub primary_light: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_light: &'static str,
    pub border: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub danger: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Light,
        Theme::Dark,
        Theme::Blue,
        Theme::Green,
        Theme::Purple,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Blue => "blue",
            Theme::Green => "green",
            Theme::Purple => "purple",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                name: "Light",
                primary: "#4f8cff",
                primary_light: "#e6efff",
                secondary: "#1e293b",
                accent: "#10b981",
                background: "#f9fafb",
                surface: "#ffffff",
                text: "#111827",
                text_light: "#6b7280",
                border: "#e5e7eb",
                success: "#10b981",
                warning: "#f59e0b",
                danger: "#ef4444",
            },
            Theme::Dark => Palette {
                name: "Dark",
                primary: "#60a5fa",
                primary_light: "#1e3a8a",
                secondary: "#f1f5f9",
                accent: "#34d399",
                background: "#0f172a",
                surface: "#1e293b",
                text: "#f8fafc",
                text_light: "#94a3b8",
                border: "#334155",
                success: "#34d399",
                warning: "#fbbf24",
                danger: "#f87171",
            },
            Theme::Blue => Palette {
                name: "Ocean Blue",
                primary: "#0ea5e9",
                primary_light: "#e0f2fe",
                secondary: "#0f172a",
                accent: "#06b6d4",
                background: "#f0f9ff",
                surface: "#ffffff",
                text: "#0c4a6e",
                text_light: "#0369a1",
                border: "#bae6fd",
                success: "#06b6d4",
                warning: "#f59e0b",
                danger: "#ef4444",
            },
            Theme::Green => Palette {
                name: "Forest Green",
                primary: "#059669",
                primary_light: "#d1fae5",
                secondary: "#064e3b",
                accent: "#10b981",
                background: "#f0fdf4",
                surface: "#ffffff",
                text: "#064e3b",
                text_light: "#047857",
                border: "#bbf7d0",
                success: "#10b981",
                warning: "#f59e0b",
                danger: "#ef4444",
            },
            Theme::Purple => Palette {
                name: "Royal Purple",
                primary: "#7c3aed",
                primary_light: "#ede9fe",
                secondary: "#581c87",
                accent: "#a855f7",
                background: "#faf5ff",
                surface: "#ffffff",
                text: "#581c87",
                text_light: "#7c2d12",
                border: "#ddd6fe",
                success: "#10b981",
                warning: "#f59e0b",
                danger: "#ef4444",
            },
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            "purple" => Ok(Self::Purple),
            _ => Err(Error::InvalidTheme {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
struct Rgb01 {
    r: f64,
    g: f64,
    b: f64,
}

fn parse_hex_rgb01(s: &str) -> Option<Rgb01> {
    let hex = s.trim().strip_prefix('#')?;
    let (r, g, b) = match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            (r, g, b)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            (r, g, b)
        }
        _ => return None,
    };
    Some(Rgb01 {
        r: (r as f64) / 255.0,
        g: (g as f64) / 255.0,
        b: (b as f64) / 255.0,
    })
}

fn rgb01_to_hex(rgb: Rgb01) -> String {
    let r = (rgb.r.clamp(0.0, 1.0) * 255.0).round() as i64;
    let g = (rgb.g.clamp(0.0, 1.0) * 255.0).round() as i64;
    let b = (rgb.b.clamp(0.0, 1.0) * 255.0).round() as i64;
    format!(
        "#{:02x}{:02x}{:02x}",
        r.clamp(0, 255),
        g.clamp(0, 255),
        b.clamp(0, 255)
    )
}

/// Linear blend of two hex colors; `t = 0` yields `a`, `t = 1` yields `b`.
///
/// Unparseable input falls back to `a` unchanged.
pub fn mix_hex(a: &str, b: &str, t: f64) -> String {
    let (Some(ca), Some(cb)) = (parse_hex_rgb01(a), parse_hex_rgb01(b)) else {
        return a.to_string();
    };
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    rgb01_to_hex(Rgb01 {
        r: ca.r + (cb.r - ca.r) * t,
        g: ca.g + (cb.g - ca.g) * t,
        b: ca.b + (cb.b - ca.b) * t,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_has_a_parseable_palette() {
        for theme in Theme::ALL {
            let p = theme.palette();
            for c in [p.primary, p.surface, p.text, p.border, p.text_light] {
                assert!(parse_hex_rgb01(c).is_some(), "{theme}: {c}");
            }
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
        }
    }

    #[test]
    fn mix_hex_blends_linearly() {
        assert_eq!(mix_hex("#000000", "#ffffff", 0.0), "#000000");
        assert_eq!(mix_hex("#000000", "#ffffff", 1.0), "#ffffff");
        assert_eq!(mix_hex("#000", "#fff", 0.5), "#808080");
        assert_eq!(mix_hex("nope", "#fff", 0.5), "nope");
    }
}
