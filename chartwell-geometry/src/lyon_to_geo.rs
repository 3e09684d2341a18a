use geo_types::{Coord, Geometry, LineString, MultiLineString, MultiPolygon, Polygon};
use lyon_path::iterator::PathIterator;
use lyon_path::{Path, PathEvent};

pub trait IntoGeoType {
    /// Convert the path into a geo-types geometry
    ///
    /// # Arguments
    ///
    /// * `tolerance` - The tolerance to use when flattening curves
    /// * `filled` - If true, every sub-path with at least three points becomes a
    ///   polygon. If false, sub-paths become line strings
    fn into_geo_type(self, tolerance: f32, filled: bool) -> Option<Geometry<f32>>;
}

#[derive(Default)]
struct Collector {
    filled: bool,
    current: Vec<Coord<f32>>,
    lines: Vec<LineString<f32>>,
    polygons: Vec<Polygon<f32>>,
}

impl Collector {
    fn finish_sub_path(&mut self) {
        let mut coords = std::mem::take(&mut self.current);
        if coords.is_empty() {
            return;
        }
        if self.filled && coords.len() >= 3 {
            if coords.first() != coords.last() {
                coords.push(coords[0]);
            }
            self.polygons
                .push(Polygon::new(LineString::new(coords), vec![]));
        } else {
            self.lines.push(LineString::new(coords));
        }
    }

    fn into_geometry(self) -> Option<Geometry<f32>> {
        if self.filled && !self.polygons.is_empty() {
            let mut polygons = self.polygons;
            if polygons.len() == 1 {
                polygons.pop().map(Geometry::Polygon)
            } else {
                Some(Geometry::MultiPolygon(MultiPolygon(polygons)))
            }
        } else {
            let mut lines = self.lines;
            match lines.len() {
                0 => None,
                1 => lines.pop().map(Geometry::LineString),
                _ => Some(Geometry::MultiLineString(MultiLineString(lines))),
            }
        }
    }
}

impl IntoGeoType for &Path {
    fn into_geo_type(self, tolerance: f32, filled: bool) -> Option<Geometry<f32>> {
        let mut collector = Collector {
            filled,
            ..Default::default()
        };
        for evt in self.iter().flattened(tolerance) {
            match evt {
                PathEvent::Begin { at } => {
                    collector.finish_sub_path();
                    collector.current.push(Coord { x: at.x, y: at.y });
                }
                PathEvent::Line { to, .. } => {
                    collector.current.push(Coord { x: to.x, y: to.y });
                }
                PathEvent::End { .. } => collector.finish_sub_path(),
                // curves are removed by flattening
                _ => {}
            }
        }
        collector.finish_sub_path();
        collector.into_geometry()
    }
}

impl IntoGeoType for Path {
    fn into_geo_type(self, tolerance: f32, filled: bool) -> Option<Geometry<f32>> {
        (&self).into_geo_type(tolerance, filled)
    }
}
