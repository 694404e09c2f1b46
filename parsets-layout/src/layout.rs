use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::axis::{layout_axes, AxisSegment, LabelAnchor};
use crate::config::LayoutConfig;
use crate::data::{Dataset, Weight};
use crate::error::LayoutError;
use crate::frequency::PairFrequencyTable;
use crate::ordering::{code_variables, level_ordering, Variable};
use crate::ribbons::{Method, PairContext, RibbonGeometry};

/// Everything one layout depends on besides the data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LayoutRequest {
    /// Variables in slot order; a name may appear more than once
    pub variables: Vec<String>,
    #[serde(default)]
    pub weight: Weight,
    #[serde(default)]
    pub method: Method,
    #[serde(default)]
    pub config: LayoutConfig,
}

impl LayoutRequest {
    pub fn new<S: Into<String>>(variables: impl IntoIterator<Item = S>) -> Self {
        Self {
            variables: variables.into_iter().map(Into::into).collect(),
            weight: Weight::default(),
            method: Method::default(),
            config: LayoutConfig::default(),
        }
    }

    pub fn with_weight(mut self, weight: impl Into<Weight>) -> Self {
        self.weight = weight.into();
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }
}

/// Data-space bounds of a layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

/// Frequency table and ribbons of one adjacent variable pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairLayout {
    pub left_slot: usize,
    pub right_slot: usize,
    pub table: PairFrequencyTable,
    pub ribbons: Vec<RibbonGeometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub method: Method,
    /// Variables in slot order
    pub variables: Vec<Variable>,
    /// Level keys of every distinct variable, the canonical fill order
    pub level_ordering: Vec<String>,
    pub pairs: Vec<PairLayout>,
    pub segments: Vec<AxisSegment>,
    pub labels: Vec<LabelAnchor>,
    pub total_weight: f64,
    pub extent: Extent,
}

impl Layout {
    pub fn ribbons(&self) -> impl Iterator<Item = &RibbonGeometry> {
        self.pairs.iter().flat_map(|p| p.ribbons.iter())
    }

    pub fn segments_for(&self, slot: usize) -> impl Iterator<Item = &AxisSegment> {
        self.segments.iter().filter(move |s| s.slot == slot)
    }
}

/// Lay out bars, labels and ribbons of every adjacent variable pair
#[tracing::instrument(skip_all)]
pub fn compute_layout(dataset: &Dataset, request: &LayoutRequest) -> Result<Layout, LayoutError> {
    let config = &request.config;
    config.validate()?;
    let strategy = request.method.strategy(config)?;

    let names = &request.variables;
    if names.len() < 2 {
        warn!(
            "Parallel sets need at least 2 variables, got {}; no ribbons will be drawn",
            names.len()
        );
    }

    let weights = dataset.weights(&request.weight)?;
    let orders = config.order.resolve(names.len())?;
    let coded = code_variables(dataset, names, &weights, &orders)?;
    let total_weight: f64 = weights.iter().sum();

    let mut pairs = Vec::with_capacity(names.len().saturating_sub(1));
    for (i, (left, right)) in names.iter().zip(names.iter().skip(1)).enumerate() {
        let left_var = coded
            .get(left)
            .ok_or_else(|| LayoutError::ColumnLookupError(left.clone()))?;
        let right_var = coded
            .get(right)
            .ok_or_else(|| LayoutError::ColumnLookupError(right.clone()))?;
        let table = PairFrequencyTable::build(left_var, right_var, &weights)?;
        let ctx = PairContext {
            left_slot: (i + 1) as f64,
            right_slot: (i + 2) as f64,
            bar_width: config.width,
            num_variables: names.len(),
        };
        let ribbons = strategy.compute(&table, &ctx);
        debug!(
            "{} pair {left} -> {right}: {} ribbons over weight {}",
            strategy.method(),
            ribbons.len(),
            table.total_weight()
        );
        pairs.push(PairLayout {
            left_slot: i + 1,
            right_slot: i + 2,
            table,
            ribbons,
        });
    }

    let variables: Vec<Variable> = names
        .iter()
        .filter_map(|name| coded.get(name).map(|c| c.variable.clone()))
        .collect();
    let slot_refs: Vec<&Variable> = variables.iter().collect();
    let (segments, labels) = layout_axes(&slot_refs, config, total_weight);
    trace!("{} segments, {} labels", segments.len(), labels.len());

    let level_ordering = level_ordering(coded.values().map(|c| &c.variable));
    let extent = layout_extent(names.len(), config.width, total_weight, &pairs);

    Ok(Layout {
        method: request.method,
        variables,
        level_ordering,
        pairs,
        segments,
        labels,
        total_weight,
        extent,
    })
}

fn layout_extent(num_variables: usize, width: f64, total_weight: f64, pairs: &[PairLayout]) -> Extent {
    let half = width / 2.0;
    let x = [1.0 - half, num_variables.max(1) as f64 + half];

    let mut y = [0.0, total_weight];
    for [lo, hi] in pairs
        .iter()
        .flat_map(|p| p.ribbons.iter())
        .filter_map(|r| r.shape.y_extent())
    {
        y[0] = f64::min(y[0], lo);
        y[1] = f64::max(y[1], hi);
    }
    Extent { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;

    fn two_by_two() -> Dataset {
        Dataset::from_columns([
            ("L", Column::text(vec!["A", "A", "B", "B"])),
            ("R", Column::text(vec!["X", "Y", "X", "Y"])),
            ("n", Column::numeric(vec![3.0, 1.0, 2.0, 1.0])),
        ])
        .unwrap()
    }

    #[test]
    fn test_two_by_two_parset() {
        let request = LayoutRequest::new(["L", "R"])
            .with_weight("n")
            .with_method(Method::Parset);
        let layout = compute_layout(&two_by_two(), &request).unwrap();

        assert_eq!(layout.total_weight, 7.0);
        assert_eq!(layout.pairs.len(), 1);
        let table = &layout.pairs[0].table;
        let left: Vec<f64> = table.rows.iter().map(|r| r.left_cum).collect();
        assert_eq!(left, vec![3.0, 4.0, 6.0, 7.0]);
        let mut right: Vec<f64> = table.rows.iter().map(|r| r.right_cum).collect();
        right.sort_by(f64::total_cmp);
        assert_eq!(right, vec![3.0, 5.0, 6.0, 7.0]);

        assert_eq!(layout.level_ordering, vec!["L:A", "L:B", "R:X", "R:Y"]);
        assert_eq!(layout.segments.len(), 4);
        assert_eq!(layout.labels.len(), 4);
        assert_eq!(layout.extent.x, [0.875, 2.125]);
        assert_eq!(layout.extent.y, [0.0, 7.0]);
    }

    #[test]
    fn test_single_variable_has_no_pairs() {
        let layout = compute_layout(&two_by_two(), &LayoutRequest::new(["L"])).unwrap();
        assert!(layout.pairs.is_empty());
        assert_eq!(layout.segments.len(), 2);
        assert_eq!(layout.variables.len(), 1);
    }

    #[test]
    fn test_missing_ratio_fails_before_data_checks() {
        let request = LayoutRequest::new(["L"]).with_method(Method::Hammock);
        assert_eq!(
            compute_layout(&two_by_two(), &request),
            Err(LayoutError::RatioRequired("hammock".to_string()))
        );
    }

    #[test]
    fn test_unknown_column() {
        let request = LayoutRequest::new(["L", "Q"]);
        assert_eq!(
            compute_layout(&two_by_two(), &request),
            Err(LayoutError::ColumnLookupError("Q".to_string()))
        );
    }

    #[test]
    fn test_request_from_json() {
        let request: LayoutRequest = serde_json::from_str(
            r#"{"variables": ["L", "R"], "weight": {"column": "n"}, "method": "adj.angle",
                "config": {"ratio": 0.3}}"#,
        )
        .unwrap();
        assert_eq!(request.method, Method::AdjAngle);
        assert_eq!(request.weight, Weight::Column("n".to_string()));
        assert_eq!(request.config.ratio, Some(0.3));
    }
}
