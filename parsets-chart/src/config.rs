use parsets_common::color::{category10, parse_color, parse_palette};
use parsets_common::types::RgbaColor;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ChartError;

/// Styling of the rendered scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlotConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Ribbon fill opacity in [0, 1]
    pub alpha: f32,
    pub bar_fill: String,
    pub text_color: String,
    pub text_size: f32,
    pub font: String,
    pub shadow_color: String,
    /// Shadow label size, the label size when unset
    pub shadow_size: Option<f32>,
    /// Ribbon colors as hex strings or color names; Category10 when unset
    pub palette: Option<Vec<String>>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH_DEFAULT,
            height: CANVAS_HEIGHT_DEFAULT,
            margin: EDGE_MARGIN,
            alpha: RIBBON_ALPHA_DEFAULT,
            bar_fill: BAR_FILL_DEFAULT.to_string(),
            text_color: TEXT_COLOR_DEFAULT.to_string(),
            text_size: TEXT_SIZE_DEFAULT,
            font: FONT_DEFAULT.to_string(),
            shadow_color: SHADOW_COLOR_DEFAULT.to_string(),
            shadow_size: None,
            palette: None,
        }
    }
}

impl PlotConfig {
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = color.into();
        self
    }

    pub fn with_text_size(mut self, size: f32) -> Self {
        self.text_size = size;
        self
    }

    pub fn with_shadow_color(mut self, color: impl Into<String>) -> Self {
        self.shadow_color = color.into();
        self
    }

    pub fn with_shadow_size(mut self, size: f32) -> Self {
        self.shadow_size = Some(size);
        self
    }

    pub fn with_palette<S: Into<String>>(mut self, colors: impl IntoIterator<Item = S>) -> Self {
        self.palette = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ChartError::InvalidParameter {
                name: "alpha",
                reason: format!("{} is outside [0, 1]", self.alpha),
            });
        }
        if !(self.width > 2.0 * self.margin && self.height > 2.0 * self.margin) {
            return Err(ChartError::InvalidParameter {
                name: "margin",
                reason: format!(
                    "{}x{} canvas leaves no room inside a {} margin",
                    self.width, self.height, self.margin
                ),
            });
        }
        let sizes = [("text-size", Some(self.text_size)), ("shadow-size", self.shadow_size)];
        for (name, size) in sizes {
            if let Some(size) = size.filter(|s| !(*s > 0.0)) {
                return Err(ChartError::InvalidParameter {
                    name,
                    reason: format!("{size} must be positive"),
                });
            }
        }
        Ok(())
    }

    /// Resolved ribbon colors, before alpha is applied
    pub fn palette_colors(&self) -> Result<Vec<RgbaColor>, ChartError> {
        let colors = match &self.palette {
            Some(specs) => parse_palette(specs.as_slice())?,
            None => category10(),
        };
        if colors.is_empty() {
            return Err(ChartError::InvalidParameter {
                name: "palette",
                reason: "at least one color is required".to_string(),
            });
        }
        Ok(colors)
    }

    pub fn bar_fill_color(&self) -> Result<RgbaColor, ChartError> {
        Ok(parse_color(&self.bar_fill)?)
    }

    pub fn text_rgba(&self) -> Result<RgbaColor, ChartError> {
        Ok(parse_color(&self.text_color)?)
    }

    pub fn shadow_rgba(&self) -> Result<RgbaColor, ChartError> {
        Ok(parse_color(&self.shadow_color)?)
    }
}
