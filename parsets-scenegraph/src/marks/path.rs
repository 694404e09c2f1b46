use itertools::izip;
use lyon_path::Path;
use parsets_common::lyon::lyon_paths_equal;
use parsets_common::types::{RgbaColor, StrokeCap, StrokeJoin, TRANSPARENT};
use parsets_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ParsetsSceneGraphError;

/// Filled polygons, used for ribbons
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScenePathMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub stroke_cap: StrokeCap,
    pub stroke_join: StrokeJoin,
    pub stroke_width: Option<f32>,
    pub path: ScalarOrArray<Path>,
    pub fill: ScalarOrArray<RgbaColor>,
    pub stroke: ScalarOrArray<RgbaColor>,
    pub indices: Option<Vec<usize>>,
    pub zindex: Option<i32>,
}

impl ScenePathMark {
    pub fn path_iter(&self) -> Box<dyn Iterator<Item = &Path> + '_> {
        self.path.as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn fill_vec(&self) -> Vec<RgbaColor> {
        self.fill.as_vec(self.len as usize, self.indices.as_ref())
    }

    /// Axis-aligned bounds of every path, as `[x0, y0, x1, y1]`
    pub fn bounds(&self) -> Option<[f32; 4]> {
        let mut bounds: Option<[f32; 4]> = None;
        for path in self.path_iter() {
            for p in path.iter().map(|evt| evt.to()) {
                bounds = Some(match bounds {
                    None => [p.x, p.y, p.x, p.y],
                    Some([x0, y0, x1, y1]) => {
                        [x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)]
                    }
                });
            }
        }
        bounds
    }

    pub fn validate(&self) -> Result<(), ParsetsSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "path", len, self.path.array_len())?;
        check_len(&self.name, "fill", len, self.fill.array_len())?;
        check_len(&self.name, "stroke", len, self.stroke.array_len())
    }
}

impl PartialEq for ScenePathMark {
    fn eq(&self, other: &Self) -> bool {
        let paths_equal = match (&self.path, &other.path) {
            (ScalarOrArray::Scalar(a), ScalarOrArray::Scalar(b)) => lyon_paths_equal(a, b),
            (ScalarOrArray::Array(a), ScalarOrArray::Array(b)) => {
                a.len() == b.len() && izip!(a, b).all(|(a, b)| lyon_paths_equal(a, b))
            }
            _ => false,
        };
        paths_equal
            && self.name == other.name
            && self.clip == other.clip
            && self.len == other.len
            && self.stroke_cap == other.stroke_cap
            && self.stroke_join == other.stroke_join
            && self.stroke_width == other.stroke_width
            && self.fill == other.fill
            && self.stroke == other.stroke
            && self.indices == other.indices
            && self.zindex == other.zindex
    }
}

impl Default for ScenePathMark {
    fn default() -> Self {
        Self {
            name: "path_mark".to_string(),
            clip: true,
            len: 1,
            stroke_cap: StrokeCap::Butt,
            stroke_join: StrokeJoin::Miter,
            stroke_width: Some(0.0),
            path: ScalarOrArray::Scalar(Path::default()),
            fill: ScalarOrArray::Scalar(TRANSPARENT),
            stroke: ScalarOrArray::Scalar(TRANSPARENT),
            indices: None,
            zindex: None,
        }
    }
}

impl From<ScenePathMark> for SceneMark {
    fn from(mark: ScenePathMark) -> Self {
        SceneMark::Path(mark)
    }
}
