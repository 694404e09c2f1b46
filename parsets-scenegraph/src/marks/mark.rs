use std::sync::Arc;

use crate::error::ParsetsSceneGraphError;
use crate::marks::group::SceneGroup;
use crate::marks::line::SceneLineMark;
use crate::marks::path::ScenePathMark;
use crate::marks::rect::SceneRectMark;
use crate::marks::text::SceneTextMark;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneMark {
    Path(ScenePathMark),
    Line(SceneLineMark),
    Rect(SceneRectMark),
    Text(Arc<SceneTextMark>),
    Group(SceneGroup),
}

impl SceneMark {
    pub fn name(&self) -> &str {
        match self {
            Self::Path(mark) => &mark.name,
            Self::Line(mark) => &mark.name,
            Self::Rect(mark) => &mark.name,
            Self::Text(mark) => &mark.name,
            Self::Group(mark) => &mark.name,
        }
    }

    pub fn zindex(&self) -> Option<i32> {
        match self {
            Self::Path(mark) => mark.zindex,
            Self::Line(mark) => mark.zindex,
            Self::Rect(mark) => mark.zindex,
            Self::Text(mark) => mark.zindex,
            Self::Group(mark) => mark.zindex,
        }
    }

    pub fn children(&self) -> &[SceneMark] {
        match self {
            Self::Group(mark) => &mark.marks,
            _ => &[],
        }
    }

    /// Number of drawable instances in this mark, recursing into groups
    pub fn instance_count(&self) -> usize {
        match self {
            Self::Path(mark) => mark.len as usize,
            Self::Line(_) => 1,
            Self::Rect(mark) => mark.len as usize,
            Self::Text(mark) => mark.len as usize,
            Self::Group(group) => group.marks.iter().map(|m| m.instance_count()).sum(),
        }
    }

    /// Check that every array encoding agrees with the mark's declared length
    pub fn validate(&self) -> Result<(), ParsetsSceneGraphError> {
        match self {
            Self::Path(mark) => mark.validate(),
            Self::Line(mark) => mark.validate(),
            Self::Rect(mark) => mark.validate(),
            Self::Text(mark) => mark.validate(),
            Self::Group(group) => group.marks.iter().try_for_each(|m| m.validate()),
        }
    }
}

/// Error out when an array-valued channel disagrees with the mark length
pub(crate) fn check_len(
    name: &str,
    channel: &'static str,
    expected: usize,
    actual: Option<usize>,
) -> Result<(), ParsetsSceneGraphError> {
    match actual {
        Some(actual) if actual != expected => Err(ParsetsSceneGraphError::LengthMismatch {
            name: name.to_string(),
            channel,
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}
