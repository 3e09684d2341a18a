use chartwell_common::layout::{Bounds, RectangleInsets, TitlePosition};
use chartwell_common::text::TextMeasurer;
use chartwell_common::types::{colors, ColorOrGradient, FontSpec};
use chartwell_scenegraph::marks::group::SceneGroup;
use chartwell_scenegraph::marks::text::{SceneTextMark, TextAlign, TextBaseline};
use serde::{Deserialize, Serialize};

use crate::entity::{ChartEntity, EntityCollection, EntityKind};

/// Origin for a `width` x `height` block on the `position` side of `area`,
/// centred along that side, and the part of `area` left over
pub(crate) fn place_block(
    area: &Bounds,
    position: TitlePosition,
    width: f32,
    height: f32,
) -> ([f32; 2], Bounds) {
    let width = width.min(area.width).max(0.0);
    let height = height.min(area.height).max(0.0);
    match position {
        TitlePosition::Top => (
            [area.center_x() - width / 2.0, area.min_y()],
            Bounds::new(area.x, area.y + height, area.width, area.height - height),
        ),
        TitlePosition::Bottom => (
            [area.center_x() - width / 2.0, area.max_y() - height],
            Bounds::new(area.x, area.y, area.width, area.height - height),
        ),
        TitlePosition::Left => (
            [area.min_x(), area.center_y() - height / 2.0],
            Bounds::new(area.x + width, area.y, area.width - width, area.height),
        ),
        TitlePosition::Right => (
            [area.max_x() - width, area.center_y() - height / 2.0],
            Bounds::new(area.x, area.y, area.width - width, area.height),
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextTitle {
    pub text: String,
    pub visible: bool,
    pub font: FontSpec,
    pub paint: ColorOrGradient,
    pub position: TitlePosition,
    pub padding: RectangleInsets,
    pub tooltip: Option<String>,
    pub url: Option<String>,
}

impl Default for TextTitle {
    fn default() -> Self {
        Self {
            text: String::new(),
            visible: true,
            font: FontSpec::new("SansSerif", 12.0, false),
            paint: ColorOrGradient::Color(colors::BLACK),
            position: TitlePosition::Top,
            padding: RectangleInsets::uniform(1.0),
            tooltip: None,
            url: None,
        }
    }
}

impl TextTitle {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// Main chart title in a large bold font
    pub fn main(text: &str) -> Self {
        Self {
            font: FontSpec::new("SansSerif", 18.0, true),
            ..Self::new(text)
        }
    }

    pub fn with_position(mut self, position: TitlePosition) -> Self {
        self.position = position;
        self
    }

    pub fn draw(
        &self,
        area: &Bounds,
        entities: Option<&mut EntityCollection>,
        measurer: &dyn TextMeasurer,
    ) -> (Option<SceneGroup>, Bounds) {
        if !self.visible || self.text.is_empty() {
            return (None, *area);
        }
        let size = measurer.measure_text_bounds(&self.text, &self.font);
        let padding = &self.padding;
        let (width, height, angle) = match self.position {
            TitlePosition::Top | TitlePosition::Bottom => (size.width, size.height, 0.0f32),
            TitlePosition::Left => (size.height, size.width, -90.0),
            TitlePosition::Right => (size.height, size.width, 90.0),
        };
        let (origin, remaining) = place_block(
            area,
            self.position,
            width + padding.left + padding.right,
            height + padding.top + padding.bottom,
        );
        let block = Bounds::new(
            origin[0],
            origin[1],
            width + padding.left + padding.right,
            height + padding.top + padding.bottom,
        );

        let mut group = SceneGroup::new("title");
        group.push(SceneTextMark {
            name: "title_text".to_string(),
            text: self.text.clone().into(),
            x: block.center_x().into(),
            y: block.center_y().into(),
            align: TextAlign::Center.into(),
            baseline: TextBaseline::Middle.into(),
            angle: angle.into(),
            color: self.paint.clone().into(),
            font: self.font.clone(),
            ..Default::default()
        });

        if let Some(entities) = entities {
            entities.add(
                ChartEntity::rect(block, EntityKind::Title)
                    .with_tooltip(self.tooltip.clone())
                    .with_url(self.url.clone()),
            );
        }
        (Some(group), remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartwell_common::text::default_text_measurer;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_place_block() {
        let area = Bounds::new(0.0, 0.0, 200.0, 100.0);
        let (origin, rest) = place_block(&area, TitlePosition::Top, 50.0, 20.0);
        assert_eq!(origin, [75.0, 0.0]);
        assert_eq!(rest, Bounds::new(0.0, 20.0, 200.0, 80.0));

        let (origin, rest) = place_block(&area, TitlePosition::Right, 30.0, 40.0);
        assert_eq!(origin, [170.0, 30.0]);
        assert_eq!(rest, Bounds::new(0.0, 0.0, 170.0, 100.0));
    }

    #[test]
    fn test_left_title_is_rotated() {
        let title = TextTitle::new("Sales").with_position(TitlePosition::Left);
        let area = Bounds::new(0.0, 0.0, 300.0, 200.0);
        let mut entities = EntityCollection::new();
        let (group, rest) = title.draw(&area, Some(&mut entities), &default_text_measurer());
        let group = group.unwrap();
        let chartwell_scenegraph::marks::mark::SceneMark::Text(text) = &group.marks[0] else {
            panic!("expected text mark");
        };
        assert_eq!(text.angle.as_vec(1), vec![-90.0]);
        // rotated, so the title takes its text height in width
        assert_approx_eq!(f32, rest.x, 12.0 * 1.2 + 2.0);
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn test_empty_title_takes_no_space() {
        let area = Bounds::new(0.0, 0.0, 300.0, 200.0);
        let (group, rest) = TextTitle::default().draw(&area, None, &default_text_measurer());
        assert!(group.is_none());
        assert_eq!(rest, area);
    }
}
