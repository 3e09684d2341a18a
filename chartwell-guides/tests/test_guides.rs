use chartwell_common::layout::{Bounds, RectangleEdge};
use chartwell_common::text::ApproximateTextMeasurer;
use chartwell_common::types::{colors, ColorOrGradient};
use chartwell_geometry::marks::MarkGeometryUtils;
use chartwell_guides::axis::{make_axis_marks, required_space, AxisMarksConfig};
use chartwell_guides::legend::{make_legend_marks, LegendArrangement, LegendItemSpec, LegendLayout};
use chartwell_scenegraph::marks::mark::SceneMark;
use float_cmp::assert_approx_eq;

#[test]
fn test_axis_marks_fit_required_space() {
    let area = Bounds::new(60.0, 20.0, 300.0, 200.0);
    let config = AxisMarksConfig {
        edge: RectangleEdge::Left,
        data_area: area,
        cursor: area.min_x(),
        tick_positions: vec![220.0, 120.0, 20.0],
        tick_labels: vec!["0".into(), "500".into(), "1000".into()],
        label: Some("Count".into()),
        ..Default::default()
    };
    let measurer = ApproximateTextMeasurer;
    let space = required_space(&config, &measurer);
    let axis = make_axis_marks(&config, &measurer).unwrap();
    assert_approx_eq!(f32, axis.extent, space);

    // the rotated label is measured unrotated by the geometry utilities, so
    // only check the tick labels stay clear of the data area
    let labels = &axis.group.marks[2];
    let bbox = labels.bounding_box().unwrap();
    assert!(bbox.upper()[0] <= area.min_x());
    assert!(bbox.lower()[0] >= area.min_x() - space);
}

#[test]
fn test_legend_bounds_cover_items() {
    let items: Vec<LegendItemSpec> = ["Apples", "Pears"]
        .iter()
        .map(|label| LegendItemSpec::new(label, ColorOrGradient::Color(colors::BLUE)))
        .collect();
    let layout = LegendLayout {
        arrangement: LegendArrangement::Vertical,
        ..Default::default()
    };
    let legend = make_legend_marks(&items, &layout, &ApproximateTextMeasurer).unwrap();
    let bbox = SceneMark::Group(legend.group).bounding_box().unwrap();
    assert_approx_eq!(f32, bbox.upper()[0], legend.width, epsilon = 0.5);
    assert_approx_eq!(f32, bbox.upper()[1], legend.height, epsilon = 0.5);
}
