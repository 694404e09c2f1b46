use std::collections::HashMap;

use lyon_path::Path;
use parsets_common::lyon::polygon_path;
use parsets_common::types::{with_alpha, RgbaColor, TRANSPARENT};
use parsets_common::value::ScalarOrArray;
use parsets_layout::layout::PairLayout;
use parsets_layout::ribbons::RibbonShape;
use parsets_layout::{
    compute_layout, Dataset, Layout, LayoutConfig, LayoutRequest, Method, Weight,
};
use parsets_scenegraph::marks::group::{Clip, SceneGroup};
use parsets_scenegraph::marks::line::SceneLineMark;
use parsets_scenegraph::marks::mark::SceneMark;
use parsets_scenegraph::marks::path::ScenePathMark;
use parsets_scenegraph::marks::rect::SceneRectMark;
use parsets_scenegraph::marks::text::{SceneTextMark, TextAlignSpec, TextBaselineSpec};
use parsets_scenegraph::scene_graph::SceneGraph;
use tracing::debug;

use crate::config::PlotConfig;
use crate::constants::*;
use crate::error::ChartError;
use crate::guides::{axis_ticks, legend_entries, AxisTick, LegendEntry};
use crate::scale::LinearScale;

/// Builder for a parallel sets, common angle or hammock chart
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelSets {
    request: LayoutRequest,
    plot: PlotConfig,
}

impl ParallelSets {
    pub fn new<S: Into<String>>(variables: impl IntoIterator<Item = S>) -> Self {
        Self {
            request: LayoutRequest::new(variables),
            plot: PlotConfig::default(),
        }
    }

    pub fn from_request(request: LayoutRequest) -> Self {
        Self {
            request,
            plot: PlotConfig::default(),
        }
    }

    pub fn weight(mut self, weight: impl Into<Weight>) -> Self {
        self.request.weight = weight.into();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.request.method = method;
        self
    }

    pub fn layout_config(mut self, config: LayoutConfig) -> Self {
        self.request.config = config;
        self
    }

    pub fn plot_config(mut self, config: PlotConfig) -> Self {
        self.plot = config;
        self
    }

    pub fn request(&self) -> &LayoutRequest {
        &self.request
    }

    #[tracing::instrument(skip_all)]
    pub fn build(&self, dataset: &Dataset) -> Result<ParallelScene, ChartError> {
        let layout = compute_layout(dataset, &self.request)?;
        render_scene(layout, &self.plot)
    }
}

/// A laid out chart: drawable marks plus default legend and axis configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelScene {
    pub layout: Layout,
    pub scene_graph: SceneGraph,
    pub legend: Vec<LegendEntry>,
    pub axis: Vec<AxisTick>,
}

impl ParallelScene {
    /// Redraw with different styling, reusing the layout
    pub fn restyle(&self, plot: &PlotConfig) -> Result<ParallelScene, ChartError> {
        render_scene(self.layout.clone(), plot)
    }
}

/// Turn a layout into marks. Ribbons are drawn first, then bars, shadow labels and labels.
pub fn render_scene(layout: Layout, plot: &PlotConfig) -> Result<ParallelScene, ChartError> {
    plot.validate()?;
    let palette = plot.palette_colors()?;
    let legend = legend_entries(&layout, &palette);
    let fills: HashMap<&str, RgbaColor> = legend
        .iter()
        .map(|e| (e.key.as_str(), with_alpha(e.color, plot.alpha)))
        .collect();

    let extent = layout.extent;
    let x_scale = LinearScale::new(
        (extent.x[0] as f32, extent.x[1] as f32),
        (plot.margin, plot.width - plot.margin),
    );
    let y_scale = LinearScale::new(
        (extent.y[0] as f32, extent.y[1] as f32),
        (plot.height - plot.margin, plot.margin),
    );
    let scales = Scales {
        x: x_scale,
        y: y_scale,
    };

    let mut marks: Vec<SceneMark> = layout
        .pairs
        .iter()
        .map(|pair| SceneMark::Group(ribbon_group(pair, &fills, &scales)))
        .collect();

    if !layout.segments.is_empty() {
        marks.push(bar_mark(&layout, plot, &scales)?.into());
    }
    let shadowed: Vec<_> = layout
        .labels
        .iter()
        .filter_map(|l| l.shadow.map(|anchor| (l, anchor)))
        .collect();
    if !shadowed.is_empty() {
        let mark = SceneTextMark {
            name: "label_shadows".to_string(),
            len: shadowed.len() as u32,
            text: ScalarOrArray::new_array(shadowed.iter().map(|(l, _)| l.text.clone()).collect()),
            x: ScalarOrArray::new_array(shadowed.iter().map(|(_, a)| scales.x.scale(a[0])).collect()),
            y: ScalarOrArray::new_array(shadowed.iter().map(|(_, a)| scales.y.scale(a[1])).collect()),
            angle: ScalarOrArray::new_array(shadowed.iter().map(|(l, _)| l.angle as f32).collect()),
            color: ScalarOrArray::new_scalar(plot.shadow_rgba()?),
            font_size: ScalarOrArray::new_scalar(plot.shadow_size.unwrap_or(plot.text_size)),
            zindex: Some(SHADOW_ZINDEX),
            ..label_template(plot)
        };
        marks.push(mark.into());
    }
    if !layout.labels.is_empty() {
        let labels = &layout.labels;
        let mark = SceneTextMark {
            name: "labels".to_string(),
            len: labels.len() as u32,
            text: ScalarOrArray::new_array(labels.iter().map(|l| l.text.clone()).collect()),
            x: ScalarOrArray::new_array(labels.iter().map(|l| scales.x.scale(l.x)).collect()),
            y: ScalarOrArray::new_array(labels.iter().map(|l| scales.y.scale(l.y)).collect()),
            angle: ScalarOrArray::new_array(labels.iter().map(|l| l.angle as f32).collect()),
            color: ScalarOrArray::new_scalar(plot.text_rgba()?),
            font_size: ScalarOrArray::new_scalar(plot.text_size),
            zindex: Some(LABEL_ZINDEX),
            ..label_template(plot)
        };
        marks.push(mark.into());
    }

    let scene_graph = SceneGraph {
        marks,
        width: plot.width,
        height: plot.height,
        origin: [0.0, 0.0],
    };
    scene_graph.validate()?;
    debug!(
        "{} scene with {} marks, {} legend entries",
        layout.method,
        scene_graph.instance_count(),
        legend.len()
    );

    let axis = axis_ticks(&layout, &scales.x);
    Ok(ParallelScene {
        layout,
        scene_graph,
        legend,
        axis,
    })
}

struct Scales {
    x: LinearScale,
    y: LinearScale,
}

impl Scales {
    fn point(&self, p: &[f64; 2]) -> [f32; 2] {
        [self.x.scale(p[0]), self.y.scale(p[1])]
    }
}

fn label_template(plot: &PlotConfig) -> SceneTextMark {
    SceneTextMark {
        align: ScalarOrArray::new_scalar(TextAlignSpec::Center),
        baseline: ScalarOrArray::new_scalar(TextBaselineSpec::Middle),
        font: ScalarOrArray::new_scalar(plot.font.clone()),
        clip: false,
        ..Default::default()
    }
}

fn ribbon_group(
    pair: &PairLayout,
    fills: &HashMap<&str, RgbaColor>,
    scales: &Scales,
) -> SceneGroup {
    let fill_of = |key: &str| fills.get(key).copied().unwrap_or(TRANSPARENT);
    let is_line = pair
        .ribbons
        .iter()
        .any(|r| matches!(r.shape, RibbonShape::Line { .. }));

    let marks = if is_line {
        pair.ribbons
            .iter()
            .filter_map(|ribbon| {
                let RibbonShape::Line { points, width } = &ribbon.shape else {
                    return None;
                };
                let mark = SceneLineMark {
                    name: format!("ribbon_{}", ribbon.row_id),
                    clip: false,
                    len: points.len() as u32,
                    x: ScalarOrArray::new_array(points.iter().map(|p| scales.x.scale(p[0])).collect()),
                    y: ScalarOrArray::new_array(points.iter().map(|p| scales.y.scale(p[1])).collect()),
                    stroke: fill_of(&ribbon.key),
                    stroke_width: scales.y.scale_length(*width),
                    ..Default::default()
                };
                Some(SceneMark::Line(mark))
            })
            .collect()
    } else {
        let paths: Vec<Path> = pair
            .ribbons
            .iter()
            .map(|ribbon| {
                let vertices: Vec<[f32; 2]> =
                    ribbon.shape.points().iter().map(|p| scales.point(p)).collect();
                polygon_path(&vertices)
            })
            .collect();
        let fill = pair.ribbons.iter().map(|r| fill_of(&r.key)).collect();
        vec![SceneMark::Path(ScenePathMark {
            name: "ribbons".to_string(),
            clip: false,
            len: paths.len() as u32,
            path: ScalarOrArray::new_array(paths),
            fill: ScalarOrArray::new_array(fill),
            stroke: ScalarOrArray::new_scalar(TRANSPARENT),
            ..Default::default()
        })]
    };

    SceneGroup {
        name: format!(
            "ribbons_{}_{}",
            pair.table.left_variable, pair.table.right_variable
        ),
        origin: [0.0, 0.0],
        clip: Clip::None,
        marks,
        zindex: Some(RIBBON_ZINDEX),
    }
}

fn bar_mark(
    layout: &Layout,
    plot: &PlotConfig,
    scales: &Scales,
) -> Result<SceneRectMark, ChartError> {
    let segments = &layout.segments;
    Ok(SceneRectMark {
        name: "bars".to_string(),
        clip: false,
        len: segments.len() as u32,
        x: ScalarOrArray::new_array(segments.iter().map(|s| scales.x.scale(s.x_min)).collect()),
        x2: ScalarOrArray::new_array(segments.iter().map(|s| scales.x.scale(s.x_max)).collect()),
        // data y grows upward, so the top edge comes from y_max
        y: ScalarOrArray::new_array(segments.iter().map(|s| scales.y.scale(s.y_max)).collect()),
        y2: ScalarOrArray::new_array(segments.iter().map(|s| scales.y.scale(s.y_min)).collect()),
        fill: ScalarOrArray::new_scalar(plot.bar_fill_color()?),
        zindex: Some(BAR_ZINDEX),
        ..Default::default()
    })
}
