//! Hit regions recorded while drawing, used for tooltips, URLs and image maps.

use chartwell_common::layout::Bounds;
use chartwell_common::lyon::paths_equal;
use chartwell_common::shapes::{bounds_path, path_bounds};
use chartwell_geometry::lyon_to_geo::IntoGeoType;
use chartwell_geometry::{GeometryInstance, MarkRTree};
use lyon_path::Path;

const ENTITY_TOLERANCE: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Chart,
    Plot,
    Title,
    Axis,
    Legend {
        series_key: String,
    },
    XYItem {
        dataset: usize,
        series: usize,
        item: usize,
    },
    CategoryItem {
        dataset: usize,
        row_key: String,
        column_key: String,
    },
    PieSection {
        key: String,
        index: usize,
    },
    GanttTask {
        row_key: String,
        column_key: String,
    },
}

/// A region of the rendered chart with optional tooltip and URL
#[derive(Debug, Clone)]
pub struct ChartEntity {
    pub area: Path,
    pub kind: EntityKind,
    pub tooltip: Option<String>,
    pub url: Option<String>,
    rect: Option<Bounds>,
}

impl PartialEq for ChartEntity {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.tooltip == other.tooltip
            && self.url == other.url
            && self.rect == other.rect
            && paths_equal(&self.area, &other.area)
    }
}

impl ChartEntity {
    pub fn rect(bounds: Bounds, kind: EntityKind) -> Self {
        Self {
            area: bounds_path(&bounds),
            kind,
            tooltip: None,
            url: None,
            rect: Some(bounds),
        }
    }

    pub fn from_path(area: Path, kind: EntityKind) -> Self {
        Self {
            area,
            kind,
            tooltip: None,
            url: None,
            rect: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: Option<String>) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    /// Rectangle for entities created with [`ChartEntity::rect`]
    pub fn as_rect(&self) -> Option<&Bounds> {
        self.rect.as_ref()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.rect.or_else(|| path_bounds(&self.area))
    }
}

/// Entities in the order they were added, which is drawing order
#[derive(Debug, Clone, Default)]
pub struct EntityCollection {
    entities: Vec<ChartEntity>,
    rtree: MarkRTree,
}

impl EntityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: ChartEntity) {
        let id = self.entities.len();
        if let Some(geometry) = (&entity.area).into_geo_type(ENTITY_TOLERANCE, true) {
            self.rtree.insert(GeometryInstance::new(id, geometry));
        }
        self.entities.push(entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChartEntity> {
        self.entities.get(index)
    }

    /// The most recently added entity containing the point
    pub fn entity_at(&self, x: f32, y: f32) -> Option<&ChartEntity> {
        self.rtree
            .topmost_at_point(&[x, y])
            .and_then(|id| self.entities.get(id))
    }

    /// Adds the entities of `other` after the existing ones
    pub fn append(&mut self, other: EntityCollection) {
        for entity in other.entities {
            self.add(entity);
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.rtree = MarkRTree::default();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChartEntity> {
        self.entities.iter()
    }
}

impl<'a> IntoIterator for &'a EntityCollection {
    type Item = &'a ChartEntity;
    type IntoIter = std::slice::Iter<'a, ChartEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
