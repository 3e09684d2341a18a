use crate::lyon_to_geo::IntoGeoType;
use crate::GeometryInstance;
use chartwell_common::text::default_text_measurer;
use chartwell_scenegraph::marks::arc::SceneArcMark;
use chartwell_scenegraph::marks::area::SceneAreaMark;
use chartwell_scenegraph::marks::line::SceneLineMark;
use chartwell_scenegraph::marks::mark::SceneMark;
use chartwell_scenegraph::marks::path::ScenePathMark;
use chartwell_scenegraph::marks::rect::SceneRectMark;
use chartwell_scenegraph::marks::rule::SceneRuleMark;
use chartwell_scenegraph::marks::symbol::SceneSymbolMark;
use chartwell_scenegraph::marks::text::SceneTextMark;
use chartwell_scenegraph::scene_graph::SceneGraph;
use geo_types::{coord, Geometry, Rect};
use itertools::izip;
use rstar::{Envelope, RTreeObject, AABB};

const FLATTEN_TOLERANCE: f32 = 0.1;

pub trait MarkGeometryUtils {
    /// Geometry of every instance of the mark, ids numbered from zero
    fn geometry_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = GeometryInstance> + '_>;

    fn bounding_box(&self) -> Option<AABB<[f32; 2]>> {
        self.geometry_iter([0.0, 0.0])
            .map(|g| g.envelope())
            .reduce(|a, b| a.merged(&b))
    }
}

impl MarkGeometryUtils for SceneArcMark {
    fn geometry_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        let half_stroke_width = self.stroke_width / 2.0;
        Box::new(
            self.transformed_path_iter(origin)
                .enumerate()
                .filter_map(move |(id, path)| {
                    Some(GeometryInstance {
                        id,
                        geometry: path.into_geo_type(FLATTEN_TOLERANCE, true)?,
                        half_stroke_width,
                    })
                }),
        )
    }
}

impl MarkGeometryUtils for SceneAreaMark {
    fn geometry_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        let half_stroke_width = self.stroke_style.width / 2.0;
        let geometry = self
            .transformed_path(origin)
            .into_geo_type(FLATTEN_TOLERANCE, true);
        Box::new(geometry.into_iter().map(move |geometry| GeometryInstance {
            id: 0,
            geometry,
            half_stroke_width,
        }))
    }
}

impl MarkGeometryUtils for SceneLineMark {
    fn geometry_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        let half_stroke_width = self.stroke_style.width / 2.0;
        let geometry = self
            .transformed_path(origin)
            .into_geo_type(FLATTEN_TOLERANCE, false);
        Box::new(geometry.into_iter().map(move |geometry| GeometryInstance {
            id: 0,
            geometry,
            half_stroke_width,
        }))
    }
}

impl MarkGeometryUtils for ScenePathMark {
    fn geometry_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        let half_stroke_width = self.stroke_style.width / 2.0;
        Box::new(
            self.transformed_path_iter(origin)
                .enumerate()
                .filter_map(move |(id, path)| {
                    Some(GeometryInstance {
                        id,
                        geometry: path.into_geo_type(FLATTEN_TOLERANCE, true)?,
                        half_stroke_width,
                    })
                }),
        )
    }
}

impl MarkGeometryUtils for SceneRectMark {
    fn geometry_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        Box::new(
            izip!(self.bounds_iter(origin), self.stroke_width_iter())
                .enumerate()
                .map(|(id, (bounds, stroke_width))| GeometryInstance {
                    id,
                    geometry: Geometry::Rect(Rect::new(
                        coord!(x: bounds.min_x(), y: bounds.min_y()),
                        coord!(x: bounds.max_x(), y: bounds.max_y()),
                    )),
                    half_stroke_width: *stroke_width / 2.0,
                }),
        )
    }
}

impl MarkGeometryUtils for SceneRuleMark {
    fn geometry_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        Box::new(
            izip!(self.transformed_path_iter(origin), self.stroke_width_iter())
                .enumerate()
                .filter_map(|(id, (path, stroke_width))| {
                    Some(GeometryInstance {
                        id,
                        geometry: path.into_geo_type(FLATTEN_TOLERANCE, false)?,
                        half_stroke_width: *stroke_width / 2.0,
                    })
                }),
        )
    }
}

impl MarkGeometryUtils for SceneSymbolMark {
    fn geometry_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        let half_stroke_width = self.stroke_width.unwrap_or(0.0) / 2.0;
        Box::new(
            self.transformed_path_iter(origin)
                .enumerate()
                .filter_map(move |(id, path)| {
                    Some(GeometryInstance {
                        id,
                        geometry: path.into_geo_type(FLATTEN_TOLERANCE, true)?,
                        half_stroke_width,
                    })
                }),
        )
    }
}

impl MarkGeometryUtils for SceneTextMark {
    fn geometry_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        let measurer = default_text_measurer();
        Box::new(
            self.bounds(&measurer, origin)
                .into_iter()
                .enumerate()
                .map(|(id, bounds)| {
                    GeometryInstance::new(
                        id,
                        Geometry::Rect(Rect::new(
                            coord!(x: bounds.min_x(), y: bounds.min_y()),
                            coord!(x: bounds.max_x(), y: bounds.max_y()),
                        )),
                    )
                }),
        )
    }
}

impl MarkGeometryUtils for SceneMark {
    fn geometry_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        match self {
            SceneMark::Arc(mark) => mark.geometry_iter(origin),
            SceneMark::Area(mark) => mark.geometry_iter(origin),
            SceneMark::Path(mark) => mark.geometry_iter(origin),
            SceneMark::Symbol(mark) => mark.geometry_iter(origin),
            SceneMark::Line(mark) => mark.geometry_iter(origin),
            SceneMark::Rect(mark) => mark.geometry_iter(origin),
            SceneMark::Rule(mark) => mark.geometry_iter(origin),
            SceneMark::Text(mark) => mark.geometry_iter(origin),
            SceneMark::Group(group) => {
                let child_origin = [origin[0] + group.origin[0], origin[1] + group.origin[1]];
                Box::new(
                    group
                        .marks
                        .iter()
                        .flat_map(move |mark| mark.geometry_iter(child_origin)),
                )
            }
        }
    }
}

impl MarkGeometryUtils for SceneGraph {
    fn geometry_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        let origin = [origin[0] + self.origin[0], origin[1] + self.origin[1]];
        Box::new(
            self.marks
                .iter()
                .flat_map(move |mark| mark.geometry_iter(origin)),
        )
    }
}
