use parsets_common::types::{RgbaColor, TRANSPARENT};
use parsets_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ParsetsSceneGraphError;

/// Axis-aligned rectangles, used for the stacked category bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneRectMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub x2: ScalarOrArray<f32>,
    pub y2: ScalarOrArray<f32>,
    pub fill: ScalarOrArray<RgbaColor>,
    pub stroke: ScalarOrArray<RgbaColor>,
    pub stroke_width: ScalarOrArray<f32>,
    pub indices: Option<Vec<usize>>,
    pub zindex: Option<i32>,
}

impl SceneRectMark {
    pub fn x_vec(&self) -> Vec<f32> {
        self.x.as_vec(self.len as usize, self.indices.as_ref())
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn y_vec(&self) -> Vec<f32> {
        self.y.as_vec(self.len as usize, self.indices.as_ref())
    }

    pub fn x2_vec(&self) -> Vec<f32> {
        self.x2.as_vec(self.len as usize, self.indices.as_ref())
    }

    pub fn y2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y2.as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn y2_vec(&self) -> Vec<f32> {
        self.y2.as_vec(self.len as usize, self.indices.as_ref())
    }

    pub fn fill_vec(&self) -> Vec<RgbaColor> {
        self.fill.as_vec(self.len as usize, self.indices.as_ref())
    }

    /// Height of each rectangle, always non-negative
    pub fn height_vec(&self) -> Vec<f32> {
        self.y_iter()
            .zip(self.y2_iter())
            .map(|(y, y2)| (y2 - y).abs())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ParsetsSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "x", len, self.x.array_len())?;
        check_len(&self.name, "y", len, self.y.array_len())?;
        check_len(&self.name, "x2", len, self.x2.array_len())?;
        check_len(&self.name, "y2", len, self.y2.array_len())?;
        check_len(&self.name, "fill", len, self.fill.array_len())?;
        check_len(&self.name, "stroke", len, self.stroke.array_len())?;
        check_len(&self.name, "stroke_width", len, self.stroke_width.array_len())
    }
}

impl Default for SceneRectMark {
    fn default() -> Self {
        Self {
            name: "rect_mark".to_string(),
            clip: true,
            len: 1,
            x: ScalarOrArray::new_scalar(0.0),
            y: ScalarOrArray::new_scalar(0.0),
            x2: ScalarOrArray::new_scalar(1.0),
            y2: ScalarOrArray::new_scalar(1.0),
            fill: ScalarOrArray::new_scalar(TRANSPARENT),
            stroke: ScalarOrArray::new_scalar(TRANSPARENT),
            stroke_width: ScalarOrArray::new_scalar(0.0),
            indices: None,
            zindex: None,
        }
    }
}

impl From<SceneRectMark> for SceneMark {
    fn from(mark: SceneRectMark) -> Self {
        SceneMark::Rect(mark)
    }
}
