pub mod lyon_to_geo;
pub mod marks;
pub mod rtree;

pub use geo_types;
pub use rtree::{GeometryInstance, MarkRTree};
