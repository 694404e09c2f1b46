//! Default legend and axis configuration handed to the renderer alongside the scene

use parsets_common::types::RgbaColor;
use parsets_layout::Layout;
use serde::{Deserialize, Serialize};

use crate::scale::LinearScale;

/// Fill color assigned to one level key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub key: String,
    pub color: RgbaColor,
}

/// Categorical x axis tick, one per variable slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub variable: String,
    pub slot: usize,
    /// Pixel position
    pub x: f32,
}

/// Cycle `palette` over the canonical level ordering
pub fn legend_entries(layout: &Layout, palette: &[RgbaColor]) -> Vec<LegendEntry> {
    layout
        .level_ordering
        .iter()
        .zip(palette.iter().cycle())
        .map(|(key, color)| LegendEntry {
            key: key.clone(),
            color: *color,
        })
        .collect()
}

pub fn axis_ticks(layout: &Layout, x_scale: &LinearScale) -> Vec<AxisTick> {
    layout
        .variables
        .iter()
        .enumerate()
        .map(|(i, variable)| AxisTick {
            variable: variable.name.clone(),
            slot: i + 1,
            x: x_scale.scale((i + 1) as f64),
        })
        .collect()
}

