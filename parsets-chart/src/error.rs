use parsets_common::error::ParsetsCommonError;
use parsets_layout::LayoutError;
use parsets_scenegraph::error::ParsetsSceneGraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid plot parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Layout error: `{0}`")]
    LayoutError(#[from] LayoutError),

    #[error("SceneGraph error: `{0}`")]
    SceneGraphError(#[from] ParsetsSceneGraphError),

    #[error("Color error: `{0}`")]
    ColorError(#[from] ParsetsCommonError),
}
