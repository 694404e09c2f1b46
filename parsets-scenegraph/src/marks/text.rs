use parsets_common::types::{RgbaColor, BLACK};
use parsets_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ParsetsSceneGraphError;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneTextMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub text: ScalarOrArray<String>,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub align: ScalarOrArray<TextAlignSpec>,
    pub baseline: ScalarOrArray<TextBaselineSpec>,
    /// Rotation in degrees, counter-clockwise
    pub angle: ScalarOrArray<f32>,
    pub color: ScalarOrArray<RgbaColor>,
    pub font: ScalarOrArray<String>,
    pub font_size: ScalarOrArray<f32>,
    pub indices: Option<Vec<usize>>,
    pub zindex: Option<i32>,
}

impl SceneTextMark {
    pub fn text_vec(&self) -> Vec<String> {
        self.text.as_vec(self.len as usize, self.indices.as_ref())
    }
    pub fn x_vec(&self) -> Vec<f32> {
        self.x.as_vec(self.len as usize, self.indices.as_ref())
    }
    pub fn y_vec(&self) -> Vec<f32> {
        self.y.as_vec(self.len as usize, self.indices.as_ref())
    }
    pub fn angle_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.angle.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn color_iter(&self) -> Box<dyn Iterator<Item = &RgbaColor> + '_> {
        self.color.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_size_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.font_size
            .as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn validate(&self) -> Result<(), ParsetsSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "text", len, self.text.array_len())?;
        check_len(&self.name, "x", len, self.x.array_len())?;
        check_len(&self.name, "y", len, self.y.array_len())?;
        check_len(&self.name, "angle", len, self.angle.array_len())?;
        check_len(&self.name, "color", len, self.color.array_len())?;
        check_len(&self.name, "font_size", len, self.font_size.array_len())
    }
}

impl Default for SceneTextMark {
    fn default() -> Self {
        Self {
            name: "text_mark".to_string(),
            clip: true,
            len: 1,
            text: ScalarOrArray::new_scalar(String::new()),
            x: ScalarOrArray::new_scalar(0.0),
            y: ScalarOrArray::new_scalar(0.0),
            align: ScalarOrArray::new_scalar(TextAlignSpec::Left),
            baseline: ScalarOrArray::new_scalar(TextBaselineSpec::Alphabetic),
            angle: ScalarOrArray::new_scalar(0.0),
            color: ScalarOrArray::new_scalar(BLACK),
            font: ScalarOrArray::new_scalar("sans serif".to_string()),
            font_size: ScalarOrArray::new_scalar(10.0),
            indices: None,
            zindex: None,
        }
    }
}

impl From<SceneTextMark> for SceneMark {
    fn from(mark: SceneTextMark) -> Self {
        SceneMark::Text(Arc::new(mark))
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignSpec {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextBaselineSpec {
    #[default]
    Alphabetic,
    Top,
    Middle,
    Bottom,
}
