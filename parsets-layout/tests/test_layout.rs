use float_cmp::assert_approx_eq;
use parsets_layout::ribbons::RibbonShape;
use parsets_layout::{
    compute_layout, Column, Dataset, LayoutConfig, LayoutError, LayoutRequest, LevelOrder,
    Method,
};
use rstest::rstest;
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Passenger counts by class, sex and survival
fn titanic() -> Dataset {
    Dataset::from_json_records(&json!([
        {"class": "1st", "sex": "male", "survived": "no", "n": 118},
        {"class": "1st", "sex": "male", "survived": "yes", "n": 62},
        {"class": "1st", "sex": "female", "survived": "no", "n": 4},
        {"class": "1st", "sex": "female", "survived": "yes", "n": 141},
        {"class": "2nd", "sex": "male", "survived": "no", "n": 154},
        {"class": "2nd", "sex": "male", "survived": "yes", "n": 25},
        {"class": "2nd", "sex": "female", "survived": "no", "n": 13},
        {"class": "2nd", "sex": "female", "survived": "yes", "n": 93},
        {"class": "3rd", "sex": "male", "survived": "no", "n": 422},
        {"class": "3rd", "sex": "male", "survived": "yes", "n": 88},
        {"class": "3rd", "sex": "female", "survived": "no", "n": 106},
        {"class": "3rd", "sex": "female", "survived": "yes", "n": 90},
        {"class": "crew", "sex": "male", "survived": "no", "n": 670},
        {"class": "crew", "sex": "male", "survived": "yes", "n": 192},
        {"class": "crew", "sex": "female", "survived": "no", "n": 3},
        {"class": "crew", "sex": "female", "survived": "yes", "n": 20},
        {"class": "crew", "sex": "female", "survived": "maybe", "n": 0},
    ]))
    .unwrap()
}

fn request(method: Method) -> LayoutRequest {
    LayoutRequest::new(["class", "sex", "survived"])
        .with_weight("n")
        .with_method(method)
        .with_config(LayoutConfig::default().with_ratio(0.2))
}

#[rstest]
#[case(Method::Parset)]
#[case(Method::Angle)]
#[case(Method::AdjAngle)]
#[case(Method::Hammock)]
fn test_axis_heights_sum_to_total(#[case] method: Method) {
    init_tracing();
    let layout = compute_layout(&titanic(), &request(method)).unwrap();
    assert_eq!(layout.total_weight, 2201.0);
    for slot in 1..=3 {
        let height: f64 = layout.segments_for(slot).map(|s| s.height()).sum();
        assert_approx_eq!(f64, height, 2201.0);
    }
    // zero-weight level is dropped everywhere
    assert!(layout.segments.iter().all(|s| s.label != "maybe"));
    assert!(layout.ribbons().all(|r| r.weight > 0.0));
}

#[rstest]
#[case(Method::Parset)]
#[case(Method::Angle)]
#[case(Method::AdjAngle)]
#[case(Method::Hammock)]
fn test_layout_is_deterministic(#[case] method: Method) {
    let data = titanic();
    let first = compute_layout(&data, &request(method)).unwrap();
    let second = compute_layout(&data, &request(method)).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[rstest]
#[case(Method::Parset, 4)]
#[case(Method::Angle, 8)]
#[case(Method::AdjAngle, 4)]
#[case(Method::Hammock, 4)]
fn test_one_ribbon_per_nonzero_cell(#[case] method: Method, #[case] vertices: usize) {
    let layout = compute_layout(&titanic(), &request(method)).unwrap();
    assert_eq!(layout.pairs.len(), 2);
    // 4 classes x 2 sexes, then 2 sexes x 2 outcomes
    assert_eq!(layout.pairs[0].ribbons.len(), 8);
    assert_eq!(layout.pairs[1].ribbons.len(), 4);
    for ribbon in layout.ribbons() {
        assert_eq!(ribbon.shape.points().len(), vertices);
        assert_eq!(
            matches!(ribbon.shape, RibbonShape::Line { .. }),
            method == Method::AdjAngle
        );
    }
}

#[test]
fn test_parset_ribbons_reproduce_stack_positions() {
    let layout = compute_layout(&titanic(), &request(Method::Parset)).unwrap();
    for pair in &layout.pairs {
        for (ribbon, row) in pair.ribbons.iter().zip(&pair.table.rows) {
            assert_eq!(ribbon.row_id, row.row_id);
            assert_eq!(ribbon.left.y_max, row.left_cum);
            assert_eq!(ribbon.right.y_max, row.right_cum);
            assert_eq!(ribbon.key, row.left_key);
        }
        let table = &pair.table;
        let last_left = table.rows.iter().map(|r| r.left_cum).fold(0.0, f64::max);
        let last_right = table.rows.iter().map(|r| r.right_cum).fold(0.0, f64::max);
        assert_eq!(last_left, 2201.0);
        assert_eq!(last_right, 2201.0);
    }
}

#[test]
fn test_descending_order_by_weight() {
    let layout = compute_layout(&titanic(), &request(Method::Parset)).unwrap();
    let classes: Vec<&str> = layout.variables[0].level_labels();
    // crew 885, 3rd 706, 1st 325, 2nd 285
    assert_eq!(classes, vec!["crew", "3rd", "1st", "2nd"]);
    assert_eq!(layout.level_ordering[0], "class:crew");
}

#[test]
fn test_per_variable_order() {
    let config = LayoutConfig::default().with_order(vec![
        LevelOrder::Unchanged,
        LevelOrder::Ascending,
        LevelOrder::Descending,
    ]);
    let request = request(Method::Parset).with_config(config);
    let layout = compute_layout(&titanic(), &request).unwrap();
    assert_eq!(layout.variables[0].level_labels(), vec!["1st", "2nd", "3rd", "crew"]);
    assert_eq!(layout.variables[1].level_labels(), vec!["female", "male"]);
    assert_eq!(layout.variables[2].level_labels(), vec!["no", "yes", "maybe"]);
}

#[test]
fn test_repeated_variable_shares_levels() {
    let request = LayoutRequest::new(["sex", "class", "sex"]).with_weight("n");
    let layout = compute_layout(&titanic(), &request).unwrap();
    assert_eq!(layout.variables[0], layout.variables[2]);
    // level keys of a repeated variable appear once
    assert_eq!(layout.level_ordering.len(), 2 + 4);
    assert_eq!(layout.segments_for(3).count(), 2);
}

#[test]
fn test_fewer_than_two_variables_warns_and_lays_out_bars() {
    init_tracing();
    let request = LayoutRequest::new(["class"]).with_weight("n");
    let layout = compute_layout(&titanic(), &request).unwrap();
    assert!(layout.pairs.is_empty());
    assert_eq!(layout.segments.len(), 4);
}

#[rstest]
#[case("hammock")]
#[case("adj.angle")]
fn test_ratio_required(#[case] name: &str) {
    let method = Method::parse(name).unwrap();
    let request = LayoutRequest::new(["class", "sex"]).with_method(method);
    assert_eq!(
        compute_layout(&titanic(), &request),
        Err(LayoutError::RatioRequired(name.to_string()))
    );
}

#[test]
fn test_unknown_method_rejected() {
    assert_eq!(
        Method::parse("ribbon"),
        Err(LayoutError::UnsupportedMethod("ribbon".to_string()))
    );
}

#[test]
fn test_end_to_end_two_by_two() {
    let data = Dataset::from_columns([
        ("L", Column::categorical(vec!["A", "B"], vec![0, 0, 1, 1])),
        ("R", Column::categorical(vec!["X", "Y"], vec![0, 1, 0, 1])),
        ("w", Column::numeric(vec![3.0, 1.0, 2.0, 1.0])),
    ])
    .unwrap();
    let request = LayoutRequest::new(["L", "R"])
        .with_weight("w")
        .with_method(Method::Parset)
        .with_config(LayoutConfig::default().with_order(LevelOrder::Unchanged));
    let layout = compute_layout(&data, &request).unwrap();

    let rows = &layout.pairs[0].table.rows;
    let cells: Vec<(&str, &str, f64, f64, f64)> = rows
        .iter()
        .map(|r| {
            (
                r.left_key.as_str(),
                r.right_key.as_str(),
                r.weight,
                r.left_cum,
                r.right_cum,
            )
        })
        .collect();
    assert_eq!(
        cells,
        vec![
            ("L:A", "R:X", 3.0, 3.0, 3.0),
            ("L:A", "R:Y", 1.0, 4.0, 6.0),
            ("L:B", "R:X", 2.0, 6.0, 5.0),
            ("L:B", "R:Y", 1.0, 7.0, 7.0),
        ]
    );
}

#[test]
fn test_hammock_stays_near_axis_range() {
    let layout = compute_layout(&titanic(), &request(Method::Hammock)).unwrap();
    let widest = layout
        .pairs
        .iter()
        .flat_map(|p| p.ribbons.iter())
        .map(|r| r.left.y_max - r.left.y_min)
        .fold(0.0, f64::max);
    assert_approx_eq!(f64, widest, 0.2 * 2201.0, epsilon = 1e-9);
    assert!(layout.extent.y[0] <= 0.0);
    assert!(layout.extent.y[1] >= 2201.0);
}
