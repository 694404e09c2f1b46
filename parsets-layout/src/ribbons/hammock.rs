use crate::frequency::PairFrequencyTable;
use crate::ribbons::{
    Method, PairContext, RibbonEndpoint, RibbonGeometry, RibbonShape, RibbonStrategy,
};

/// Vertical padding of the plot relative to total weight when compensating for aspect
const HAMMOCK_HEIGHT_PADDING: f64 = 1.1;

/// Ribbons between category midpoints whose width is corrected for their slope
#[derive(Debug, Clone, Copy)]
pub struct Hammock {
    /// Widest ribbon as a fraction of total weight
    pub ratio: f64,
    pub aspect_ratio: f64,
}

impl Hammock {
    /// Converts vertical weight units to horizontal slot units
    fn aspect_factor(&self, ctx: &PairContext, total: f64) -> f64 {
        ctx.num_variables as f64 / (HAMMOCK_HEIGHT_PADDING * total) * self.aspect_ratio
    }
}

impl RibbonStrategy for Hammock {
    fn method(&self) -> Method {
        Method::Hammock
    }

    fn compute(&self, table: &PairFrequencyTable, ctx: &PairContext) -> Vec<RibbonGeometry> {
        let total = table.total_weight();
        if table.is_empty() || total <= 0.0 {
            return Vec::new();
        }
        let left_mid = table.left_midpoints();
        let right_mid = table.right_midpoints();
        let factor = self.aspect_factor(ctx, total);
        let run = ctx.run();

        let anchors: Vec<(f64, f64, f64)> = table
            .rows
            .iter()
            .map(|row| {
                let (ml, mr) = (left_mid[&row.left], right_mid[&row.right]);
                let tangent = if run > 0.0 { (mr - ml) * factor / run } else { 0.0 };
                (ml, mr, row.weight / tangent.atan().cos())
            })
            .collect();

        let widest = anchors.iter().map(|a| a.2).fold(0.0, f64::max);
        let scale = if widest > 0.0 {
            self.ratio / 2.0 * total / widest
        } else {
            0.0
        };

        table
            .rows
            .iter()
            .zip(anchors)
            .map(|(row, (ml, mr, width))| {
                let half = width * scale;
                let left = RibbonEndpoint {
                    x: ctx.left_edge(),
                    y_min: ml - half,
                    y_max: ml + half,
                };
                let right = RibbonEndpoint {
                    x: ctx.right_edge(),
                    y_min: mr - half,
                    y_max: mr + half,
                };
                let vertices = vec![
                    [left.x, left.y_min],
                    [right.x, right.y_min],
                    [right.x, right.y_max],
                    [left.x, left.y_max],
                ];
                RibbonGeometry::new(row, left, right, RibbonShape::Polygon { vertices })
            })
            .collect()
    }
}
