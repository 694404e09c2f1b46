//! Ribbon geometry strategies.
//!
//! Every strategy turns one [`PairFrequencyTable`] into one [`RibbonGeometry`] per table row.
//! Coordinates are in data space: x in variable slots (1-based), y in cumulative weight.

pub mod angle;
pub mod hammock;
pub mod parset;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::frequency::{FrequencyRow, PairFrequencyTable};

pub use angle::{adjust_angles, AdjustedAngle, AngleAdjustment, AngleRow, CommonAngle};
pub use hammock::Hammock;
pub use parset::ParallelSets;

/// Ribbon drawing method
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
pub enum Method {
    #[serde(rename = "parset")]
    #[strum(serialize = "parset")]
    Parset,
    #[default]
    #[serde(rename = "angle")]
    #[strum(serialize = "angle")]
    Angle,
    #[serde(rename = "adj.angle")]
    #[strum(serialize = "adj.angle")]
    AdjAngle,
    #[serde(rename = "hammock")]
    #[strum(serialize = "hammock")]
    Hammock,
}

impl Method {
    /// Parse a method name, rejecting anything unknown
    pub fn parse(name: &str) -> Result<Self, LayoutError> {
        name.parse()
            .map_err(|_| LayoutError::UnsupportedMethod(name.to_string()))
    }

    pub fn requires_ratio(&self) -> bool {
        matches!(self, Method::AdjAngle | Method::Hammock)
    }

    /// Instantiate the strategy for this method
    pub fn strategy(&self, config: &LayoutConfig) -> Result<Box<dyn RibbonStrategy>, LayoutError> {
        let ratio = || {
            config
                .ratio
                .filter(|r| *r > 0.0)
                .ok_or_else(|| LayoutError::RatioRequired(self.to_string()))
        };
        Ok(match self {
            Method::Parset => Box::new(ParallelSets),
            Method::Angle => Box::new(CommonAngle),
            Method::AdjAngle => Box::new(AdjustedAngle { ratio: ratio()? }),
            Method::Hammock => Box::new(Hammock {
                ratio: ratio()?,
                aspect_ratio: config.aspect_ratio.unwrap_or(1.0),
            }),
        })
    }
}

/// Placement of one variable pair in the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContext {
    pub left_slot: f64,
    pub right_slot: f64,
    /// Width of the category bars, in slot units
    pub bar_width: f64,
    /// Number of variable slots in the whole chart
    pub num_variables: usize,
}

impl PairContext {
    /// x of the left bar's right edge
    pub fn left_edge(&self) -> f64 {
        self.left_slot + self.bar_width / 2.0
    }

    /// x of the right bar's left edge
    pub fn right_edge(&self) -> f64 {
        self.right_slot - self.bar_width / 2.0
    }

    /// Horizontal run between the two bars
    pub fn run(&self) -> f64 {
        self.right_edge() - self.left_edge()
    }
}

/// Where a ribbon meets a category bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RibbonEndpoint {
    pub x: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl RibbonEndpoint {
    pub fn center(&self) -> f64 {
        (self.y_min + self.y_max) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RibbonShape {
    /// Closed polygon, vertices in drawing order
    Polygon { vertices: Vec<[f64; 2]> },
    /// Center line stroked with `width` (y units)
    Line { points: Vec<[f64; 2]>, width: f64 },
}

impl RibbonShape {
    pub fn points(&self) -> &[[f64; 2]] {
        match self {
            RibbonShape::Polygon { vertices } => vertices,
            RibbonShape::Line { points, .. } => points,
        }
    }

    /// Vertical extent including line width, as `[y_min, y_max]`
    pub fn y_extent(&self) -> Option<[f64; 2]> {
        let half = match self {
            RibbonShape::Polygon { .. } => 0.0,
            RibbonShape::Line { width, .. } => width / 2.0,
        };
        let points = self.points();
        let lo = points.iter().map(|p| p[1]).reduce(f64::min)?;
        let hi = points.iter().map(|p| p[1]).reduce(f64::max)?;
        Some([lo - half, hi + half])
    }
}

/// Geometry of one ribbon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibbonGeometry {
    pub row_id: usize,
    /// Fill/stroke key, the left level's key
    pub key: String,
    pub weight: f64,
    pub left: RibbonEndpoint,
    pub right: RibbonEndpoint,
    pub shape: RibbonShape,
}

impl RibbonGeometry {
    pub(crate) fn new(
        row: &FrequencyRow,
        left: RibbonEndpoint,
        right: RibbonEndpoint,
        shape: RibbonShape,
    ) -> Self {
        Self {
            row_id: row.row_id,
            key: row.left_key.clone(),
            weight: row.weight,
            left,
            right,
            shape,
        }
    }
}

/// Computes ribbon geometry for one variable pair
pub trait RibbonStrategy: std::fmt::Debug {
    fn method(&self) -> Method;

    fn compute(&self, table: &PairFrequencyTable, ctx: &PairContext) -> Vec<RibbonGeometry>;
}

/// Endpoints spanning each row's cumulative stack position at the bar edges
pub(crate) fn stacked_endpoints(
    row: &FrequencyRow,
    ctx: &PairContext,
) -> (RibbonEndpoint, RibbonEndpoint) {
    let [left_min, left_max] = row.left_span();
    let [right_min, right_max] = row.right_span();
    (
        RibbonEndpoint {
            x: ctx.left_edge(),
            y_min: left_min,
            y_max: left_max,
        },
        RibbonEndpoint {
            x: ctx.right_edge(),
            y_min: right_min,
            y_max: right_max,
        },
    )
}
