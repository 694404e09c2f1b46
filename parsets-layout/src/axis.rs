//! Category bars and their labels

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::ordering::Variable;

/// One level's stacked bar on its variable's axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSegment {
    pub variable: String,
    /// 1-based position of the variable
    pub slot: usize,
    pub key: String,
    pub label: String,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub weight: f64,
}

impl AxisSegment {
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAnchor {
    pub variable: String,
    pub key: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees
    pub angle: f64,
    /// Anchor of the duplicate drawn behind the label
    pub shadow: Option<[f64; 2]>,
}

/// Stack every variable's levels into bar segments and place their labels.
///
/// `variables` are in slot order and may repeat. Levels with zero weight get neither a
/// segment nor a label.
pub fn layout_axes(
    variables: &[&Variable],
    config: &LayoutConfig,
    total_weight: f64,
) -> (Vec<AxisSegment>, Vec<LabelAnchor>) {
    let half_width = config.width / 2.0;
    let mut segments = Vec::new();
    let mut labels = Vec::new();

    for (i, variable) in variables.iter().enumerate() {
        let slot = i + 1;
        let x = slot as f64;
        let mut running = 0.0;
        for level in variable.levels.iter().filter(|l| l.weight > 0.0) {
            let segment = AxisSegment {
                variable: variable.name.clone(),
                slot,
                key: level.key.clone(),
                label: level.label.clone(),
                x_min: x - half_width,
                x_max: x + half_width,
                y_min: running,
                y_max: running + level.weight,
                weight: level.weight,
            };
            running = segment.y_max;

            if config.label {
                let anchor_x = x + config.text_offset;
                let anchor_y = segment.center()[1];
                labels.push(LabelAnchor {
                    variable: variable.name.clone(),
                    key: level.key.clone(),
                    text: level.label.clone(),
                    x: anchor_x,
                    y: anchor_y,
                    angle: config.text_angle,
                    shadow: config.shadow.then(|| {
                        [
                            anchor_x + config.shadow_offset,
                            anchor_y - config.shadow_offset * total_weight,
                        ]
                    }),
                });
            }
            segments.push(segment);
        }
    }
    (segments, labels)
}
