use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color with components in [0, 1]
pub type RgbaColor = [f32; 4];

pub const TRANSPARENT: RgbaColor = [0.0, 0.0, 0.0, 0.0];
pub const BLACK: RgbaColor = [0.0, 0.0, 0.0, 1.0];

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeJoin {
    Bevel,
    #[default]
    Miter,
    Round,
}

/// Replace the alpha channel of a color
pub fn with_alpha(color: RgbaColor, alpha: f32) -> RgbaColor {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}
