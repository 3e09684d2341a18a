use serde::{Deserialize, Serialize};

/// Axis aligned rectangle in screen space, y grows downward
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(
            x0.min(x1),
            y0.min(y1),
            (x1 - x0).abs(),
            (y1 - y0).abs(),
        )
    }

    pub fn min_x(&self) -> f32 {
        self.x
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f32 {
        self.y
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x() && x <= self.max_x() && y >= self.min_y() && y <= self.max_y()
    }

    /// Shrinks the rectangle by the insets, never below zero size
    pub fn shrink(&self, insets: &RectangleInsets) -> Self {
        Self {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.left - insets.right).max(0.0),
            height: (self.height - insets.top - insets.bottom).max(0.0),
        }
    }

    /// Largest square centered in this rectangle
    pub fn centered_square(&self) -> Self {
        let side = self.width.min(self.height);
        Self {
            x: self.center_x() - side / 2.0,
            y: self.center_y() - side / 2.0,
            width: side,
            height: side,
        }
    }

    pub fn union(&self, other: &Bounds) -> Self {
        Self::from_corners(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl RectangleInsets {
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectangleEdge {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl RectangleEdge {
    pub fn is_top_or_bottom(&self) -> bool {
        matches!(self, RectangleEdge::Top | RectangleEdge::Bottom)
    }

    pub fn is_left_or_right(&self) -> bool {
        matches!(self, RectangleEdge::Left | RectangleEdge::Right)
    }

    pub fn opposite(&self) -> Self {
        match self {
            RectangleEdge::Top => RectangleEdge::Bottom,
            RectangleEdge::Bottom => RectangleEdge::Top,
            RectangleEdge::Left => RectangleEdge::Right,
            RectangleEdge::Right => RectangleEdge::Left,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotOrientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Where an axis sits relative to the data area
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisLocation {
    #[default]
    BottomOrLeft,
    TopOrRight,
    BottomOrRight,
    TopOrLeft,
}

/// Edge used by the domain axis at `location` for a plot with `orientation`
pub fn resolve_domain_axis_location(
    location: AxisLocation,
    orientation: PlotOrientation,
) -> RectangleEdge {
    match (location, orientation) {
        (AxisLocation::TopOrRight | AxisLocation::TopOrLeft, PlotOrientation::Vertical) => {
            RectangleEdge::Top
        }
        (AxisLocation::BottomOrLeft | AxisLocation::BottomOrRight, PlotOrientation::Vertical) => {
            RectangleEdge::Bottom
        }
        (AxisLocation::TopOrRight | AxisLocation::BottomOrRight, PlotOrientation::Horizontal) => {
            RectangleEdge::Right
        }
        (AxisLocation::BottomOrLeft | AxisLocation::TopOrLeft, PlotOrientation::Horizontal) => {
            RectangleEdge::Left
        }
    }
}

/// Edge used by the range axis at `location` for a plot with `orientation`
pub fn resolve_range_axis_location(
    location: AxisLocation,
    orientation: PlotOrientation,
) -> RectangleEdge {
    let flipped = match orientation {
        PlotOrientation::Vertical => PlotOrientation::Horizontal,
        PlotOrientation::Horizontal => PlotOrientation::Vertical,
    };
    resolve_domain_axis_location(location, flipped)
}

/// Position of a title or legend around the plot
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitlePosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrink_clamps() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0).shrink(&RectangleInsets::uniform(6.0));
        assert_eq!(b.width, 0.0);
        assert!(b.is_empty());
    }

    #[test]
    fn test_axis_location_resolution() {
        assert_eq!(
            resolve_domain_axis_location(AxisLocation::BottomOrLeft, PlotOrientation::Vertical),
            RectangleEdge::Bottom
        );
        assert_eq!(
            resolve_range_axis_location(AxisLocation::BottomOrLeft, PlotOrientation::Vertical),
            RectangleEdge::Left
        );
        assert_eq!(
            resolve_domain_axis_location(AxisLocation::BottomOrLeft, PlotOrientation::Horizontal),
            RectangleEdge::Left
        );
        assert_eq!(
            resolve_range_axis_location(AxisLocation::BottomOrLeft, PlotOrientation::Horizontal),
            RectangleEdge::Bottom
        );
    }

    #[test]
    fn test_centered_square() {
        let sq = Bounds::new(0.0, 0.0, 100.0, 50.0).centered_square();
        assert_eq!(sq, Bounds::new(25.0, 0.0, 50.0, 50.0));
    }
}
