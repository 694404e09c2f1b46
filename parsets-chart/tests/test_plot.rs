use float_cmp::assert_approx_eq;
use parsets_chart::{ChartError, ParallelSets, PlotConfig};
use parsets_common::color::category10;
use parsets_layout::{Column, Dataset, LayoutConfig, LayoutError, Method};
use parsets_scenegraph::marks::mark::SceneMark;
use rstest::rstest;

fn dataset() -> Dataset {
    Dataset::from_columns([
        ("L", Column::text(vec!["A", "A", "B", "B", "B"])),
        ("R", Column::text(vec!["X", "Y", "X", "Y", "Y"])),
        ("S", Column::text(vec!["p", "q", "q", "p", "q"])),
        ("w", Column::numeric(vec![3.0, 1.0, 2.0, 1.0, 0.0])),
    ])
    .unwrap()
}

fn chart(method: Method) -> ParallelSets {
    ParallelSets::new(["L", "R", "S"])
        .weight("w")
        .method(method)
        .layout_config(LayoutConfig::default().with_ratio(0.25))
}

#[rstest]
#[case(Method::Parset)]
#[case(Method::Angle)]
#[case(Method::AdjAngle)]
#[case(Method::Hammock)]
fn test_scene_structure(#[case] method: Method) {
    let scene = chart(method).build(&dataset()).unwrap();
    let marks = &scene.scene_graph.marks;
    let names: Vec<&str> = marks.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["ribbons_L_R", "ribbons_R_S", "bars", "labels"]);

    let zindex: Vec<Option<i32>> = marks.iter().map(|m| m.zindex()).collect();
    assert_eq!(zindex, vec![Some(0), Some(0), Some(1), Some(3)]);

    for (group, pair) in scene.scene_graph.groups().iter().zip(&scene.layout.pairs) {
        let drawn: usize = group.marks.iter().map(|m| m.instance_count()).sum();
        if method == Method::AdjAngle {
            assert!(group.marks.iter().all(|m| matches!(m, SceneMark::Line(_))));
            assert_eq!(group.marks.len(), pair.ribbons.len());
        } else {
            assert_eq!(drawn, pair.ribbons.len());
        }
    }

    let SceneMark::Rect(bars) = &marks[2] else {
        panic!("expected bars");
    };
    assert_eq!(bars.len as usize, scene.layout.segments.len());
    // pixel y grows downward, so every bar's top is above its bottom
    for (y, y2) in bars.y_vec().iter().zip(bars.y2_vec()) {
        assert!(*y < y2);
    }
    for (x, x2) in bars.x_vec().iter().zip(bars.x2_vec()) {
        assert!(*x < x2);
    }
    assert!(bars.fill_vec().iter().all(|f| *f == [0.3, 0.3, 0.3, 1.0]));
}

#[test]
fn test_ribbons_filled_by_left_level() {
    let scene = chart(Method::Parset).build(&dataset()).unwrap();
    let SceneMark::Group(group) = &scene.scene_graph.marks[0] else {
        panic!("expected ribbon group");
    };
    let SceneMark::Path(ribbons) = &group.marks[0] else {
        panic!("expected ribbon paths");
    };

    let palette = category10();
    // L:A and L:B are the first two levels of the canonical ordering
    assert_eq!(scene.legend[0].key, "L:A");
    assert_eq!(scene.legend[1].key, "L:B");
    let fills = ribbons.fill_vec();
    assert_eq!(fills.len(), 4);
    for (fill, ribbon) in fills.iter().zip(&scene.layout.pairs[0].ribbons) {
        let expected = if ribbon.key == "L:A" { palette[0] } else { palette[1] };
        assert_eq!(&fill[..3], &expected[..3]);
        assert_approx_eq!(f32, fill[3], 0.5);
    }
}

#[test]
fn test_adjusted_angle_stroke_widths() {
    let scene = chart(Method::AdjAngle).build(&dataset()).unwrap();
    let plot = PlotConfig::default();
    let [y0, y1] = scene.layout.extent.y;
    let px_per_unit = (plot.height - 2.0 * plot.margin) / (y1 - y0) as f32;
    let SceneMark::Group(group) = &scene.scene_graph.marks[0] else {
        panic!("expected ribbon group");
    };
    let pair = &scene.layout.pairs[0];
    let total = pair.table.total_weight() as f32;
    let max_weight = pair.table.max_weight() as f32;
    let mut widest: f32 = 0.0;
    for (mark, ribbon) in group.marks.iter().zip(&pair.ribbons) {
        let SceneMark::Line(line) = mark else {
            panic!("expected ribbon lines");
        };
        assert_eq!(line.name, format!("ribbon_{}", ribbon.row_id));
        // bar edge, break, break, bar edge
        assert_eq!(line.points().len(), 4);
        let expected = 0.25 * total * ribbon.weight as f32 / max_weight * px_per_unit;
        assert_approx_eq!(f32, line.stroke_width, expected, epsilon = 1e-3);
        widest = widest.max(line.stroke_width);
    }
    // the heaviest ribbon spans `ratio` of the total weight's pixel height
    assert_approx_eq!(f32, widest, 0.25 * total * px_per_unit, epsilon = 1e-3);
}

#[test]
fn test_legend_cycles_palette() {
    let plot = PlotConfig::default().with_palette(["#000000", "#ffffff"]);
    let scene = chart(Method::Angle)
        .plot_config(plot)
        .build(&dataset())
        .unwrap();
    // zero-weight records still contribute their levels to the ordering
    assert_eq!(scene.legend.len(), 6);
    let colors: Vec<f32> = scene.legend.iter().map(|e| e.color[0]).collect();
    assert_eq!(colors, vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn test_axis_ticks_follow_slots() {
    let scene = chart(Method::Parset).build(&dataset()).unwrap();
    let variables: Vec<&str> = scene.axis.iter().map(|t| t.variable.as_str()).collect();
    assert_eq!(variables, vec!["L", "R", "S"]);
    let xs: Vec<f32> = scene.axis.iter().map(|t| t.x).collect();
    assert!(xs[0] < xs[1] && xs[1] < xs[2]);
    // equally spaced slots
    assert_approx_eq!(f32, xs[1] - xs[0], xs[2] - xs[1], epsilon = 1e-3);
}

#[test]
fn test_shadow_labels_drawn_behind() {
    let config = LayoutConfig::default().with_shadow(true);
    let plot = PlotConfig::default().with_shadow_color("white").with_shadow_size(11.0);
    let scene = ParallelSets::new(["L", "R"])
        .weight("w")
        .method(Method::Parset)
        .layout_config(config)
        .plot_config(plot)
        .build(&dataset())
        .unwrap();
    let names: Vec<&str> = scene.scene_graph.marks.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["ribbons_L_R", "bars", "label_shadows", "labels"]);

    let (SceneMark::Text(shadows), SceneMark::Text(labels)) =
        (&scene.scene_graph.marks[2], &scene.scene_graph.marks[3])
    else {
        panic!("expected text marks");
    };
    assert_eq!(shadows.len, labels.len);
    assert_eq!(shadows.text_vec(), labels.text_vec());
    assert_eq!(shadows.color_iter().next(), Some(&[1.0, 1.0, 1.0, 1.0]));
    assert_eq!(shadows.font_size_iter().next(), Some(&11.0));
    // default text angle is vertical
    assert!(labels.angle_iter().chain(shadows.angle_iter()).all(|a| *a == 90.0));
    // shadows sit right of and below their labels
    for (sx, lx) in shadows.x_vec().iter().zip(labels.x_vec()) {
        assert!(*sx > lx);
    }
    for (sy, ly) in shadows.y_vec().iter().zip(labels.y_vec()) {
        assert!(*sy > ly);
    }
}

#[test]
fn test_labels_disabled() {
    let scene = chart(Method::Parset)
        .layout_config(LayoutConfig::default().with_label(false))
        .build(&dataset())
        .unwrap();
    assert!(scene.scene_graph.marks.iter().all(|m| m.name() != "labels"));
}

#[test]
fn test_restyle_reuses_layout() {
    let scene = chart(Method::Hammock).build(&dataset()).unwrap();
    let same = scene.restyle(&PlotConfig::default()).unwrap();
    assert_eq!(scene, same);

    let wide = scene
        .restyle(&PlotConfig::default().with_size(960.0, 360.0))
        .unwrap();
    assert_eq!(wide.layout, scene.layout);
    assert_ne!(wide.scene_graph, scene.scene_graph);
}

#[test]
fn test_errors() {
    let result = ParallelSets::new(["L", "R"])
        .method(Method::Hammock)
        .build(&dataset());
    assert!(matches!(
        result,
        Err(ChartError::LayoutError(LayoutError::RatioRequired(_)))
    ));

    let result = chart(Method::Parset)
        .plot_config(PlotConfig::default().with_alpha(-0.1))
        .build(&dataset());
    assert!(matches!(
        result,
        Err(ChartError::InvalidParameter { name: "alpha", .. })
    ));

    let result = chart(Method::Parset)
        .plot_config(PlotConfig::default().with_text_color("nope"))
        .build(&dataset());
    assert!(matches!(result, Err(ChartError::ColorError(_))));
}

#[test]
fn test_scene_serializes() {
    let scene = chart(Method::Angle).build(&dataset()).unwrap();
    let json = serde_json::to_value(&scene.scene_graph).unwrap();
    assert_eq!(json["marks"].as_array().map(|m| m.len()), Some(4));
    let legend = serde_json::to_value(&scene.legend).unwrap();
    assert_eq!(legend[0]["key"], "L:A");
}
