//! Common-angle ribbons.
//!
//! Every ribbon runs horizontally out of its bar, crosses the gap with one shared slope and
//! runs horizontally into the opposite bar. [`adjust_angles`] computes the break points where
//! the slanted segment starts and ends; [`CommonAngle`] realigns and fills them while
//! [`AdjustedAngle`] strokes them as weighted center lines.

use serde::{Deserialize, Serialize};

use crate::frequency::PairFrequencyTable;
use crate::ribbons::{
    stacked_endpoints, Method, PairContext, RibbonGeometry, RibbonShape, RibbonStrategy,
};

/// Head room over the steepest ribbon's slope
pub const ANGLE_SLOPE_MARGIN: f64 = 1.15;

/// Break points of one ribbon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRow {
    pub row_id: usize,
    /// Horizontal run between the two bar edges
    pub dx: f64,
    /// Vertical travel between the two stack positions
    pub dy: f64,
    pub slope: f64,
    /// Run of the slanted segment at the shared slope
    pub new_dx: f64,
    /// Offset of the left break from the left slot, positive
    pub left_offset: f64,
    /// Offset of the right break from the right slot, negative
    pub right_offset: f64,
    pub left_break: f64,
    pub right_break: f64,
    /// Rigid horizontal shift applied by [`AngleAdjustment::realign`]
    pub shift: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleAdjustment {
    pub rows: Vec<AngleRow>,
    /// Shared slope, the steepest slope with margin; zero when every ribbon is flat
    pub max_slope: f64,
    /// Row id of the steepest ribbon, first on ties
    pub reference: Option<usize>,
}

/// Shrink every ribbon's slanted run to the shared slope, centered in the gap
pub fn adjust_angles(table: &PairFrequencyTable, ctx: &PairContext) -> AngleAdjustment {
    let half_width = ctx.bar_width / 2.0;
    let dx = ctx.run();

    let measured: Vec<(usize, f64, f64)> = table
        .rows
        .iter()
        .map(|row| {
            let dy = (row.right_cum - row.left_cum).abs();
            (row.row_id, dy, if dx > 0.0 { dy / dx } else { 0.0 })
        })
        .collect();

    let mut reference: Option<(usize, f64)> = None;
    for (row_id, _, slope) in &measured {
        if *slope > 0.0 && reference.map_or(true, |(_, best)| *slope > best) {
            reference = Some((*row_id, *slope));
        }
    }
    let max_slope = reference.map_or(0.0, |(_, slope)| slope * ANGLE_SLOPE_MARGIN);

    let rows = measured
        .into_iter()
        .map(|(row_id, dy, slope)| {
            let new_dx = if max_slope > 0.0 { dy / max_slope } else { dx };
            let inset = (dx - new_dx) / 2.0;
            let left_offset = half_width + inset;
            let right_offset = -(half_width + inset);
            AngleRow {
                row_id,
                dx,
                dy,
                slope,
                new_dx,
                left_offset,
                right_offset,
                left_break: ctx.left_slot + left_offset,
                right_break: ctx.right_slot + right_offset,
                shift: 0.0,
            }
        })
        .collect();

    AngleAdjustment {
        rows,
        max_slope,
        reference: reference.map(|(row_id, _)| row_id),
    }
}

impl AngleAdjustment {
    pub fn row(&self, row_id: usize) -> Option<&AngleRow> {
        self.rows.iter().find(|r| r.row_id == row_id)
    }

    /// Shift every ribbon so its left break lines up with the reference ribbon's.
    ///
    /// Ribbons then leave the left axis flush, and the reference keeps a zero shift.
    pub fn realign(&mut self) {
        let Some(anchor) = self
            .reference
            .and_then(|id| self.row(id))
            .map(|r| r.left_break)
        else {
            return;
        };
        for row in self.rows.iter_mut() {
            row.shift = anchor - row.left_break;
            row.left_break = anchor;
            row.right_break += row.shift;
        }
    }
}

/// Filled ribbons at one shared angle, realigned flush on the left axis
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonAngle;

impl RibbonStrategy for CommonAngle {
    fn method(&self) -> Method {
        Method::Angle
    }

    fn compute(&self, table: &PairFrequencyTable, ctx: &PairContext) -> Vec<RibbonGeometry> {
        let mut adjustment = adjust_angles(table, ctx);
        adjustment.realign();

        table
            .rows
            .iter()
            .zip(&adjustment.rows)
            .map(|(row, angle)| {
                let (left, right) = stacked_endpoints(row, ctx);
                let (bl, br) = (angle.left_break, angle.right_break);
                let vertices = vec![
                    [left.x, left.y_min],
                    [bl, left.y_min],
                    [br, right.y_min],
                    [right.x, right.y_min],
                    [right.x, right.y_max],
                    [br, right.y_max],
                    [bl, left.y_max],
                    [left.x, left.y_max],
                ];
                RibbonGeometry::new(row, left, right, RibbonShape::Polygon { vertices })
            })
            .collect()
    }
}

/// Center lines at one shared angle, stroked proportionally to weight
#[derive(Debug, Clone, Copy)]
pub struct AdjustedAngle {
    /// Widest line as a fraction of total weight
    pub ratio: f64,
}

impl RibbonStrategy for AdjustedAngle {
    fn method(&self) -> Method {
        Method::AdjAngle
    }

    fn compute(&self, table: &PairFrequencyTable, ctx: &PairContext) -> Vec<RibbonGeometry> {
        let adjustment = adjust_angles(table, ctx);
        let total = table.total_weight();
        let max_weight = table.max_weight();

        table
            .rows
            .iter()
            .zip(&adjustment.rows)
            .map(|(row, angle)| {
                let (left, right) = stacked_endpoints(row, ctx);
                let (cl, cr) = (left.center(), right.center());
                let points = vec![
                    [left.x, cl],
                    [angle.left_break, cl],
                    [angle.right_break, cr],
                    [right.x, cr],
                ];
                let width = if max_weight > 0.0 {
                    self.ratio * total * row.weight / max_weight
                } else {
                    0.0
                };
                RibbonGeometry::new(row, left, right, RibbonShape::Line { points, width })
            })
            .collect()
    }
}
