//! Path builders for the primitive shapes that renderers emit.
//!
//! Angles for arcs follow the screen convention used throughout the crate:
//! degrees, zero at three o'clock, positive angles sweeping counter-clockwise
//! as seen on screen (where y grows downward).

use lyon_path::math::{point, vector, Angle, Box2D};
use lyon_path::{Path, PathEvent, Winding};
use serde::{Deserialize, Serialize};

use crate::layout::Bounds;

/// How the ends of an arc are joined when it is closed
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcType {
    /// Just the curve
    Open,
    /// Curve closed by a straight segment between its end points
    Chord,
    /// Curve closed through the center
    #[default]
    Pie,
}

/// Maximum angular step used when flattening arcs into line segments
const ARC_STEP_DEGREES: f32 = 4.0;

pub fn rect_path(x: f32, y: f32, width: f32, height: f32) -> Path {
    let x0 = f32::min(x, x + width);
    let x1 = f32::max(x, x + width);
    let y0 = f32::min(y, y + height);
    let y1 = f32::max(y, y + height);
    let mut builder = Path::builder();
    builder.add_rectangle(
        &Box2D::new(point(x0, y0), point(x1, y1)),
        Winding::Positive,
    );
    builder.build()
}

pub fn bounds_path(bounds: &Bounds) -> Path {
    rect_path(bounds.x, bounds.y, bounds.width, bounds.height)
}

/// Ellipse centered on (`cx`, `cy`) with the given full width and height
pub fn ellipse_path(cx: f32, cy: f32, width: f32, height: f32) -> Path {
    let mut builder = Path::builder();
    builder.add_ellipse(
        point(cx, cy),
        vector(width.abs() / 2.0, height.abs() / 2.0),
        Angle::radians(0.0),
        Winding::Positive,
    );
    builder.build()
}

pub fn polygon_path(points: &[[f32; 2]], close: bool) -> Path {
    let mut builder = Path::builder();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        builder.begin(point(first[0], first[1]));
        for p in iter {
            builder.line_to(point(p[0], p[1]));
        }
        builder.end(close);
    }
    builder.build()
}

/// Point on the ellipse inscribed in a `2*rx` x `2*ry` box at `angle` degrees
pub fn point_on_ellipse(cx: f32, cy: f32, rx: f32, ry: f32, angle: f32) -> [f32; 2] {
    let radians = angle.to_radians();
    [cx + rx * radians.cos(), cy - ry * radians.sin()]
}

/// Points along an elliptical arc, both end points included
pub fn arc_points(
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    start_angle: f32,
    extent: f32,
) -> Vec<[f32; 2]> {
    let steps = ((extent.abs() / ARC_STEP_DEGREES).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| {
            let angle = start_angle + extent * (i as f32 / steps as f32);
            point_on_ellipse(cx, cy, rx, ry, angle)
        })
        .collect()
}

/// Arc of the ellipse centered on (`cx`, `cy`) with radii `rx`, `ry`
pub fn arc_path(
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    start_angle: f32,
    extent: f32,
    arc_type: ArcType,
) -> Path {
    let mut points = arc_points(cx, cy, rx, ry, start_angle, extent);
    match arc_type {
        ArcType::Open => polygon_path(&points, false),
        ArcType::Chord => polygon_path(&points, true),
        ArcType::Pie => {
            points.push([cx, cy]);
            polygon_path(&points, true)
        }
    }
}

/// Ring segment between `inner` and `outer` radii
pub fn ring_segment_path(
    cx: f32,
    cy: f32,
    inner: f32,
    outer: f32,
    start_angle: f32,
    extent: f32,
) -> Path {
    let mut points = arc_points(cx, cy, outer, outer, start_angle, extent);
    let mut inner_points = arc_points(cx, cy, inner, inner, start_angle, extent);
    inner_points.reverse();
    points.extend(inner_points);
    polygon_path(&points, true)
}

/// Axis aligned bounds of the end points of a path made of line segments
pub fn path_bounds(path: &Path) -> Option<Bounds> {
    let mut min = [f32::INFINITY, f32::INFINITY];
    let mut max = [f32::NEG_INFINITY, f32::NEG_INFINITY];
    let mut visit = |p: lyon_path::math::Point| {
        min[0] = min[0].min(p.x);
        min[1] = min[1].min(p.y);
        max[0] = max[0].max(p.x);
        max[1] = max[1].max(p.y);
    };
    for evt in path.iter() {
        match evt {
            PathEvent::Begin { at } => visit(at),
            PathEvent::Line { to, .. } => visit(to),
            PathEvent::Quadratic { ctrl, to, .. } => {
                visit(ctrl);
                visit(to);
            }
            PathEvent::Cubic {
                ctrl1, ctrl2, to, ..
            } => {
                visit(ctrl1);
                visit(ctrl2);
                visit(to);
            }
            PathEvent::End { .. } => {}
        }
    }
    if min[0].is_finite() {
        Some(Bounds::new(min[0], min[1], max[0] - min[0], max[1] - min[1]))
    } else {
        None
    }
}
