use chartwell_common::layout::PlotOrientation;
use chartwell_common::types::{colors, ColorOrGradient, StrokeStyle};
use serde::{Deserialize, Serialize};

/// Nearest data item to an anchor point, found while renderers draw.
///
/// Distances are measured in screen space between the anchor and the
/// transformed item. For horizontal plots the anchor is swapped so that its
/// first coordinate is always compared with the domain position.
#[derive(Debug, Clone, PartialEq)]
pub struct CrosshairState {
    pub anchor: Option<[f32; 2]>,
    pub crosshair_x: f64,
    pub crosshair_y: f64,
    pub distance: f64,
    pub dataset_index: Option<usize>,
}

impl Default for CrosshairState {
    fn default() -> Self {
        Self {
            anchor: None,
            crosshair_x: f64::NAN,
            crosshair_y: f64::NAN,
            distance: f64::INFINITY,
            dataset_index: None,
        }
    }
}

impl CrosshairState {
    pub fn new(anchor: Option<[f32; 2]>) -> Self {
        Self {
            anchor,
            ..Default::default()
        }
    }

    /// Records (`x`, `y`) if its screen position (`trans_x` along the domain,
    /// `trans_y` along the range) is closer to the anchor than any point so far
    pub fn update_crosshair_point(
        &mut self,
        x: f64,
        y: f64,
        dataset_index: usize,
        trans_x: f32,
        trans_y: f32,
        orientation: PlotOrientation,
    ) {
        let Some([ax, ay]) = self.anchor else {
            return;
        };
        let (xx, yy) = match orientation {
            PlotOrientation::Vertical => (ax, ay),
            PlotOrientation::Horizontal => (ay, ax),
        };
        let d = ((trans_x - xx) as f64).powi(2) + ((trans_y - yy) as f64).powi(2);
        if d < self.distance {
            self.crosshair_x = x;
            self.crosshair_y = y;
            self.distance = d;
            self.dataset_index = Some(dataset_index);
        }
    }

    pub fn has_point(&self) -> bool {
        self.dataset_index.is_some()
    }
}

/// Settings of one crosshair line across the data area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Crosshair {
    pub visible: bool,
    /// Snap to the nearest data item instead of the clicked position
    pub locked_on_data: bool,
    pub value: f64,
    pub paint: ColorOrGradient,
    pub stroke: StrokeStyle,
}

impl Default for Crosshair {
    fn default() -> Self {
        Self {
            visible: false,
            locked_on_data: true,
            value: 0.0,
            paint: ColorOrGradient::Color(colors::BLUE),
            stroke: StrokeStyle::dashed(0.5, vec![2.0, 2.0]),
        }
    }
}
