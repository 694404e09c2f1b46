//! Renders parallel sets layouts into a scene graph of ribbons, bars and labels.

pub mod config;
pub mod constants;
pub mod error;
pub mod guides;
pub mod plot;
pub mod scale;

pub use config::PlotConfig;
pub use error::ChartError;
pub use plot::{render_scene, ParallelScene, ParallelSets};
