use geo::{BoundingRect, Distance, Euclidean};
use geo_types::Geometry;
use rstar::{Envelope, PointDistance, RTree, RTreeObject, AABB};

/// A geometry with an associated instance ID for storage in the R-tree
#[derive(Debug, Clone)]
pub struct GeometryInstance {
    pub id: usize,
    pub geometry: Geometry<f32>,
    pub half_stroke_width: f32,
}

impl GeometryInstance {
    pub fn new(id: usize, geometry: Geometry<f32>) -> Self {
        Self {
            id,
            geometry,
            half_stroke_width: 0.0,
        }
    }
}

impl RTreeObject for GeometryInstance {
    type Envelope = AABB<[f32; 2]>;

    /// Returns the envelope of the geometry, including the stroke width
    fn envelope(&self) -> Self::Envelope {
        match self.geometry.bounding_rect() {
            Some(bbox) => AABB::from_corners(
                [
                    bbox.min().x - self.half_stroke_width,
                    bbox.min().y - self.half_stroke_width,
                ],
                [
                    bbox.max().x + self.half_stroke_width,
                    bbox.max().y + self.half_stroke_width,
                ],
            ),
            None => AABB::from_point([f32::NAN, f32::NAN]),
        }
    }
}

impl PointDistance for GeometryInstance {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let point = geo_types::Point::new(point[0], point[1]);
        let distance = (Euclidean::distance(&self.geometry, &point) - self.half_stroke_width).max(0.0);
        distance * distance
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        let point = geo_types::Point::new(point[0], point[1]);
        Euclidean::distance(&self.geometry, &point) <= self.half_stroke_width
    }
}

/// Spatial index over the hit regions of a rendered chart
#[derive(Debug, Clone, Default)]
pub struct MarkRTree {
    rtree: RTree<GeometryInstance>,
    envelope: Option<AABB<[f32; 2]>>,
}

impl MarkRTree {
    pub fn new(geometries: Vec<GeometryInstance>) -> Self {
        let envelope = geometries
            .iter()
            .map(|g| g.envelope())
            .reduce(|a, b| a.merged(&b));
        let rtree = RTree::bulk_load(geometries);
        Self { rtree, envelope }
    }

    /// Returns the envelope of the entire tree, `None` when empty
    pub fn envelope(&self) -> Option<&AABB<[f32; 2]>> {
        self.envelope.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    pub fn size(&self) -> usize {
        self.rtree.size()
    }

    /// Any one geometry covering `point`
    pub fn locate_at_point(&self, point: &[f32; 2]) -> Option<&GeometryInstance> {
        self.rtree.locate_at_point(point)
    }

    pub fn locate_in_envelope_intersecting(
        &self,
        envelope: &AABB<[f32; 2]>,
    ) -> Vec<&GeometryInstance> {
        self.rtree
            .locate_in_envelope_intersecting(envelope)
            .collect()
    }

    /// Ids of every geometry covering `point`, in ascending order
    pub fn locate_all_at_point(&self, point: &[f32; 2]) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .rtree
            .locate_all_at_point(point)
            .map(|g| g.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Geometry covering `point` that was added last, matching draw order
    pub fn topmost_at_point(&self, point: &[f32; 2]) -> Option<usize> {
        self.rtree
            .locate_all_at_point(point)
            .map(|g| g.id)
            .max()
    }

    /// Closest geometry to `point`, measured from the stroke edge
    pub fn nearest_neighbor(&self, point: &[f32; 2]) -> Option<&GeometryInstance> {
        self.rtree.nearest_neighbor(point)
    }

    /// Insert a new geometry instance into the tree
    pub fn insert(&mut self, geometry: GeometryInstance) {
        let geom_envelope = geometry.envelope();
        self.envelope = Some(match self.envelope {
            Some(envelope) => envelope.merged(&geom_envelope),
            None => geom_envelope,
        });
        self.rtree.insert(geometry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, LineString, Rect};

    fn rect(id: usize, x0: f32, y0: f32, x1: f32, y1: f32) -> GeometryInstance {
        GeometryInstance::new(
            id,
            Geometry::Rect(Rect::new(coord! {x: x0, y: y0}, coord! {x: x1, y: y1})),
        )
    }

    #[test]
    fn test_empty_tree() {
        let tree = MarkRTree::new(vec![]);
        assert!(tree.is_empty());
        assert!(tree.envelope().is_none());
        assert_eq!(tree.topmost_at_point(&[0.0, 0.0]), None);
    }

    #[test]
    fn test_topmost_prefers_last_added() {
        let tree = MarkRTree::new(vec![
            rect(0, 0.0, 0.0, 10.0, 10.0),
            rect(1, 5.0, 5.0, 15.0, 15.0),
            rect(2, 20.0, 20.0, 30.0, 30.0),
        ]);
        assert_eq!(tree.locate_all_at_point(&[7.0, 7.0]), vec![0, 1]);
        assert_eq!(tree.topmost_at_point(&[7.0, 7.0]), Some(1));
        assert_eq!(tree.topmost_at_point(&[2.0, 2.0]), Some(0));
        assert_eq!(tree.topmost_at_point(&[18.0, 18.0]), None);
        assert_eq!(tree.locate_at_point(&[25.0, 25.0]).map(|g| g.id), Some(2));
        let hits = tree.locate_in_envelope_intersecting(&AABB::from_corners([9.0, 9.0], [21.0, 21.0]));
        assert_eq!(hits.len(), 3);
        let envelope = tree.envelope().unwrap();
        assert_eq!(envelope.upper(), [30.0, 30.0]);
    }

    #[test]
    fn test_stroke_width_widens_lines() {
        let line = GeometryInstance {
            id: 7,
            geometry: Geometry::LineString(LineString::from(vec![(0.0f32, 0.0f32), (10.0, 0.0)])),
            half_stroke_width: 2.0,
        };
        let mut tree = MarkRTree::default();
        tree.insert(line);
        assert_eq!(tree.topmost_at_point(&[5.0, 1.5]), Some(7));
        assert_eq!(tree.topmost_at_point(&[5.0, 3.0]), None);
        assert_eq!(tree.envelope().unwrap().lower(), [-2.0, -2.0]);
        assert_eq!(tree.size(), 1);
        assert_eq!(tree.nearest_neighbor(&[50.0, 0.0]).map(|g| g.id), Some(7));
    }
}
