use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::ordering::OrderSpec;

/// Numeric and labeling parameters of one layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LayoutConfig {
    /// Category bar width in slot units, in (0, 1)
    pub width: f64,
    pub order: OrderSpec,
    /// Widest ribbon as a fraction of total weight. Required for hammock and adj.angle.
    pub ratio: Option<f64>,
    /// Hammock aspect compensation, 1 when unset
    pub aspect_ratio: Option<f64>,
    pub label: bool,
    /// Label rotation in degrees
    pub text_angle: f64,
    /// Horizontal label offset from the variable slot
    pub text_offset: f64,
    pub shadow: bool,
    /// Shadow displacement; x in slot units, y as a fraction of total weight
    pub shadow_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 0.25,
            order: OrderSpec::default(),
            ratio: None,
            aspect_ratio: None,
            label: true,
            text_angle: 90.0,
            text_offset: 0.0,
            shadow: false,
            shadow_offset: 0.005,
        }
    }
}

impl LayoutConfig {
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_order(mut self, order: impl Into<OrderSpec>) -> Self {
        self.order = order.into();
        self
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    pub fn with_label(mut self, label: bool) -> Self {
        self.label = label;
        self
    }

    pub fn with_text_angle(mut self, degrees: f64) -> Self {
        self.text_angle = degrees;
        self
    }

    pub fn with_text_offset(mut self, offset: f64) -> Self {
        self.text_offset = offset;
        self
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn with_shadow_offset(mut self, offset: f64) -> Self {
        self.shadow_offset = offset;
        self
    }

    /// Check parameter ranges. A missing ratio is reported by the method itself.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.width > 0.0 && self.width < 1.0) {
            return Err(LayoutError::InvalidParameter {
                name: "width",
                reason: format!("{} is outside (0, 1)", self.width),
            });
        }
        if let Some(ratio) = self.ratio {
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(LayoutError::InvalidParameter {
                    name: "ratio",
                    reason: format!("{ratio} must be positive"),
                });
            }
        }
        if let Some(aspect) = self.aspect_ratio {
            if !(aspect.is_finite() && aspect > 0.0) {
                return Err(LayoutError::InvalidParameter {
                    name: "aspect-ratio",
                    reason: format!("{aspect} must be positive"),
                });
            }
        }
        for (name, value) in [
            ("text-angle", self.text_angle),
            ("text-offset", self.text_offset),
            ("shadow-offset", self.shadow_offset),
        ] {
            if !value.is_finite() {
                return Err(LayoutError::InvalidParameter {
                    name,
                    reason: format!("{value} is not finite"),
                });
            }
        }
        Ok(())
    }
}
