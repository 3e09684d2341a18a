use chartwell_common::layout::Bounds;
use chartwell_common::types::{colors, ColorOrGradient, StrokeStyle};
use chartwell_common::value::ScalarOrArray;
use chartwell_scenegraph::marks::rule::SceneRuleMark;

use crate::error::ChartwellGuidesError;

#[derive(Debug, Clone, PartialEq)]
pub struct GridlineConfig {
    pub paint: ColorOrGradient,
    pub stroke: StrokeStyle,
}

impl Default for GridlineConfig {
    fn default() -> Self {
        Self {
            paint: ColorOrGradient::Color(colors::LIGHT_GRAY),
            stroke: StrokeStyle::dashed(0.5, vec![2.0, 2.0]),
        }
    }
}

/// Lines across `data_area` at each position.
///
/// With `vertical` set the positions are x coordinates and the lines run from
/// top to bottom, otherwise they are y coordinates of horizontal lines.
pub fn make_gridlines(
    name: &str,
    data_area: &Bounds,
    positions: &[f32],
    vertical: bool,
    config: &GridlineConfig,
) -> Result<SceneRuleMark, ChartwellGuidesError> {
    let positions = ScalarOrArray::new_array(positions.to_vec());
    let len = positions.len() as u32;
    let (x0, y0, x1, y1) = if vertical {
        (
            positions.clone(),
            data_area.min_y().into(),
            positions,
            data_area.max_y().into(),
        )
    } else {
        (
            data_area.min_x().into(),
            positions.clone(),
            data_area.max_x().into(),
            positions,
        )
    };
    let mark = SceneRuleMark {
        name: name.to_string(),
        clip: true,
        len,
        stroke_dash: config.stroke.dash.clone(),
        x0,
        y0,
        x1,
        y1,
        stroke: config.paint.clone().into(),
        stroke_width: config.stroke.width.into(),
        stroke_cap: config.stroke.cap,
        zindex: Some(-1),
    };
    mark.validate()?;
    Ok(mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_gridlines_span_area() {
        let area = Bounds::new(10.0, 20.0, 100.0, 50.0);
        let mark =
            make_gridlines("grid", &area, &[30.0, 60.0], true, &GridlineConfig::default()).unwrap();
        assert_eq!(mark.len, 2);
        assert_eq!(
            mark.segments([0.0, 0.0]),
            vec![[[30.0, 20.0], [30.0, 70.0]], [[60.0, 20.0], [60.0, 70.0]]]
        );
        assert_eq!(mark.zindex, Some(-1));
        assert_eq!(mark.stroke_dash, Some(vec![2.0, 2.0]));
    }

    #[test]
    fn test_horizontal_gridlines() {
        let area = Bounds::new(0.0, 0.0, 40.0, 40.0);
        let mark = make_gridlines("grid", &area, &[5.0], false, &GridlineConfig::default()).unwrap();
        assert_eq!(mark.segments([0.0, 0.0]), vec![[[0.0, 5.0], [40.0, 5.0]]]);
    }
}
