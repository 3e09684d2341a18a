use chartwell_common::shapes::ArcType;
use chartwell_common::types::{ColorOrGradient, SymbolShape};
use chartwell_scenegraph::marks::arc::SceneArcMark;
use chartwell_scenegraph::marks::group::{Clip, SceneGroup};
use chartwell_scenegraph::marks::symbol::SceneSymbolMark;
use chartwell_scenegraph::marks::text::SceneTextMark;
use chartwell_scenegraph::scene_graph::SceneGraph;

#[test]
fn test_scene_graph_json_roundtrip() {
    let mut group = SceneGroup::new("pie").with_clip(Clip::Rect {
        x: 0.0,
        y: 0.0,
        width: 200.0,
        height: 200.0,
    });
    group.push(SceneArcMark {
        len: 2,
        arc_type: ArcType::Pie,
        x: 100.0.into(),
        y: 100.0.into(),
        start_angle: vec![90.0, -30.0].into(),
        extent: vec![-120.0, -240.0].into(),
        outer_radius: 80.0.into(),
        fill: vec![
            ColorOrGradient::Color([1.0, 0.0, 0.0, 1.0]),
            ColorOrGradient::Color([0.0, 0.0, 1.0, 1.0]),
        ]
        .into(),
        ..Default::default()
    });
    group.push(SceneSymbolMark {
        shape: SymbolShape::TriangleUp.into(),
        ..Default::default()
    });
    group.push(SceneTextMark {
        text: "Section A".to_string().into(),
        ..Default::default()
    });

    let mut scene = SceneGraph::new(200.0, 200.0);
    scene.marks.push(group.into());
    scene.validate().unwrap();

    let json = serde_json::to_string(&scene).unwrap();
    let back: SceneGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, scene);
}
