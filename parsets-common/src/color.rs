//! Color parsing and the default categorical palette

use std::str::FromStr;

use palette::Srgb;

use crate::error::ParsetsCommonError;
use crate::types::RgbaColor;

/// Category10 palette from D3, used for categorical fills
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", // Blue
    "#ff7f0e", // Orange
    "#2ca02c", // Green
    "#d62728", // Red
    "#9467bd", // Purple
    "#8c564b", // Brown
    "#e377c2", // Pink
    "#7f7f7f", // Gray
    "#bcbd22", // Olive
    "#17becf", // Cyan
];

/// Parse a color from a hex string (`#rrggbb`), a CSS color name, or a
/// `grey0`..`grey100` / `gray0`..`gray100` shade.
pub fn parse_color(spec: &str) -> Result<RgbaColor, ParsetsCommonError> {
    let trimmed = spec.trim();
    let lower = trimmed.to_ascii_lowercase();

    if let Some(level) = grey_level(&lower) {
        let v = level as f32 / 100.0;
        return Ok([v, v, v, 1.0]);
    }

    if lower.starts_with('#') {
        let rgb = Srgb::<u8>::from_str(&lower)
            .map_err(|_| ParsetsCommonError::InvalidColor(spec.to_string()))?;
        return Ok(to_rgba(rgb));
    }

    palette::named::from_str(&lower)
        .map(to_rgba)
        .ok_or_else(|| ParsetsCommonError::InvalidColor(spec.to_string()))
}

/// Parse a list of color strings
pub fn parse_palette<S: AsRef<str>>(specs: &[S]) -> Result<Vec<RgbaColor>, ParsetsCommonError> {
    specs.iter().map(|s| parse_color(s.as_ref())).collect()
}

/// The Category10 palette as RGBA colors
pub fn category10() -> Vec<RgbaColor> {
    CATEGORY10
        .iter()
        .filter_map(|hex| Srgb::<u8>::from_str(hex).ok())
        .map(to_rgba)
        .collect()
}

fn to_rgba(rgb: Srgb<u8>) -> RgbaColor {
    let rgb: Srgb<f32> = rgb.into_format();
    [rgb.red, rgb.green, rgb.blue, 1.0]
}

fn grey_level(name: &str) -> Option<u8> {
    let digits = name
        .strip_prefix("grey")
        .or_else(|| name.strip_prefix("gray"))?;
    if digits.is_empty() {
        return None;
    }
    let level: u8 = digits.parse().ok()?;
    (level <= 100).then_some(level)
}
