use parsets_common::types::{RgbaColor, StrokeCap, StrokeJoin, BLACK};
use parsets_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ParsetsSceneGraphError;

/// A single stroked polyline. Width-encoded ribbons emit one of these per ribbon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneLineMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub stroke: RgbaColor,
    pub stroke_width: f32,
    pub stroke_cap: StrokeCap,
    pub stroke_join: StrokeJoin,
    pub zindex: Option<i32>,
}

impl SceneLineMark {
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize, None)
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, None)
    }

    pub fn points(&self) -> Vec<[f32; 2]> {
        self.x_iter()
            .zip(self.y_iter())
            .map(|(x, y)| [*x, *y])
            .collect()
    }

    pub fn validate(&self) -> Result<(), ParsetsSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "x", len, self.x.array_len())?;
        check_len(&self.name, "y", len, self.y.array_len())
    }
}

impl Default for SceneLineMark {
    fn default() -> Self {
        Self {
            name: "line_mark".to_string(),
            clip: true,
            len: 1,
            x: ScalarOrArray::new_scalar(0.0),
            y: ScalarOrArray::new_scalar(0.0),
            stroke: BLACK,
            stroke_width: 1.0,
            stroke_cap: Default::default(),
            stroke_join: Default::default(),
            zindex: None,
        }
    }
}

impl From<SceneLineMark> for SceneMark {
    fn from(mark: SceneLineMark) -> Self {
        SceneMark::Line(mark)
    }
}
