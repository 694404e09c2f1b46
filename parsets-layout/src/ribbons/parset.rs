use crate::frequency::PairFrequencyTable;
use crate::ribbons::{
    stacked_endpoints, Method, PairContext, RibbonGeometry, RibbonShape, RibbonStrategy,
};

/// Straight quadrilateral ribbons between the stacked endpoints
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelSets;

impl RibbonStrategy for ParallelSets {
    fn method(&self) -> Method {
        Method::Parset
    }

    fn compute(&self, table: &PairFrequencyTable, ctx: &PairContext) -> Vec<RibbonGeometry> {
        table
            .rows
            .iter()
            .map(|row| {
                let (left, right) = stacked_endpoints(row, ctx);
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
