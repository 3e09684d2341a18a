use chartwell_common::layout::Bounds;
use chartwell_common::types::ColorOrGradient;
use chartwell_data::traits::XYDataset;
use chartwell_data::XYDatasetKind;
use serde::{Deserialize, Serialize};

use super::{
    add_item_entity, draw_item_label, series_legend_item, update_crosshair, XYItemContext,
    XYItemRenderer,
};
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;
use crate::renderer::styles::{SeriesStyles, StyleContext};
use crate::renderer::{EntityShape, RendererState, XYGenerators};

/// Half size of the hit area around points drawn without a shape
const ENTITY_RADIUS: f32 = 3.0;

/// Connects the items of each series with lines and marks them with shapes.
///
/// Lines are drawn in the first pass and shapes in the second so that no
/// line crosses over a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XYLineAndShapeRenderer {
    pub styles: SeriesStyles,
    pub generators: XYGenerators,
    pub lines_visible: bool,
    pub shapes_visible: bool,
    pub shapes_filled: bool,
    pub draw_outlines: bool,
    /// Outline shapes in the series outline paint instead of its paint
    pub use_outline_paint: bool,
    pub shape_size: f32,
}

impl Default for XYLineAndShapeRenderer {
    fn default() -> Self {
        Self {
            styles: SeriesStyles::default(),
            generators: XYGenerators::default(),
            lines_visible: true,
            shapes_visible: true,
            shapes_filled: true,
            draw_outlines: true,
            use_outline_paint: false,
            shape_size: 6.0,
        }
    }
}

impl XYLineAndShapeRenderer {
    pub fn new(lines: bool, shapes: bool) -> Self {
        Self {
            lines_visible: lines,
            shapes_visible: shapes,
            ..Default::default()
        }
    }

    pub fn with_generators(mut self, generators: XYGenerators) -> Self {
        self.generators = generators;
        self
    }

    fn draw_line_point(
        &self,
        state: &mut RendererState,
        ctx: &XYItemContext,
        series: usize,
        item: usize,
    ) {
        state.line.push(ctx.item_point(series, item).map(|(_, _, p)| p));
        if item + 1 == ctx.dataset.item_count(series) {
            let name = format!("xy_{}_series_{series}_line", ctx.dataset_index);
            let paint = self.styles.paint(series, &ctx.styles);
            let stroke = self.styles.stroke(series, &ctx.styles);
            if let Some(mark) = state.line.take_mark(&name, paint, stroke) {
                state.marks.mark(mark);
            }
        }
    }

    /// Shape, entity, crosshair and item label of one item
    pub(crate) fn draw_point(
        &self,
        state: &mut RendererState,
        ctx: &XYItemContext,
        series: usize,
        item: usize,
    ) {
        let Some((x, y, point)) = ctx.item_point(series, item) else {
            return;
        };
        let half = if self.styles.shapes_visible(series, self.shapes_visible) {
            let paint = self.styles.paint(series, &ctx.styles);
            let fill = if self.shapes_filled {
                paint.clone()
            } else {
                ColorOrGradient::transparent()
            };
            let outline = if self.draw_outlines || !self.shapes_filled {
                let outline_paint = if self.use_outline_paint {
                    self.styles.outline_paint(series, &ctx.styles)
                } else {
                    paint
                };
                let width = self.styles.outline_stroke(series, &ctx.styles).width;
                Some((outline_paint, width))
            } else {
                None
            };
            state.marks.symbol(
                &format!("xy_{}_shapes", ctx.dataset_index),
                self.styles.shape(series, &ctx.styles),
                point,
                self.shape_size,
                fill,
                outline,
            );
            self.shape_size / 2.0
        } else {
            ENTITY_RADIUS
        };

        let hit = Bounds::new(point[0] - half, point[1] - half, half * 2.0, half * 2.0);
        add_item_entity(state, ctx, &self.generators, EntityShape::Rect(hit), series, item);
        update_crosshair(state, ctx, x, y);
        draw_item_label(state, ctx, &self.generators, &self.styles, series, item, point);
    }
}

impl XYItemRenderer for XYLineAndShapeRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.styles
    }

    fn pass_count(&self) -> usize {
        2
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &XYItemContext,
        series: usize,
        item: usize,
        pass: usize,
    ) -> Result<(), ChartwellChartError> {
        match pass {
            0 if self.styles.lines_visible(series, self.lines_visible) => {
                self.draw_line_point(state, ctx, series, item)
            }
            1 => self.draw_point(state, ctx, series, item),
            _ => {}
        }
        Ok(())
    }

    fn legend_item(
        &self,
        dataset: &XYDatasetKind,
        dataset_index: usize,
        series: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem> {
        let item = series_legend_item(&self.styles, dataset, dataset_index, series, ctx)?;
        let shape = self
            .styles
            .shapes_visible(series, self.shapes_visible)
            .then(|| self.styles.shape(series, ctx));
        let mut item = item.with_shape(shape, self.shapes_filled);
        if self.styles.lines_visible(series, self.lines_visible) {
            let paint = self.styles.paint(series, ctx);
            item = item.with_line(paint, self.styles.stroke(series, ctx));
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::labels::XYLabelGenerator;
    use crate::renderer::xy::test_support::*;
    use crate::renderer::xy::{draw_dataset, SeriesRenderingOrder};
    use crate::supplier::DrawingSupplier;
    use chartwell_common::layout::PlotOrientation;
    use chartwell_scenegraph::marks::mark::SceneMark;

    fn render(
        renderer: &XYLineAndShapeRenderer,
        data: &XYDatasetKind,
        anchor: Option<[f32; 2]>,
    ) -> RendererState {
        let (domain, range) = axes();
        let supplier = DrawingSupplier::default();
        let (de, re) = edges(PlotOrientation::Vertical);
        let ctx = XYItemContext::new(
            area(),
            PlotOrientation::Vertical,
            (&domain, de),
            (&range, re),
            data,
            StyleContext::new(&supplier),
        )
        .unwrap();
        let mut state = RendererState::new(true, anchor);
        draw_dataset(renderer, &mut state, &ctx, SeriesRenderingOrder::Forward).unwrap();
        state
    }

    #[test]
    fn test_lines_break_at_missing_values() {
        let data = dataset(vec![series(
            "S1",
            &[(1.0, Some(1.0)), (2.0, None), (3.0, Some(3.0)), (4.0, Some(2.0))],
        )]);
        let state = render(&XYLineAndShapeRenderer::default(), &data, None);
        let entities = state.entities.clone().unwrap();
        let marks = state.marks.into_marks();

        let SceneMark::Line(line) = &marks[0] else {
            panic!("expected the line first");
        };
        assert_eq!(line.defined.as_vec(4), vec![true, false, true, true]);
        let SceneMark::Symbol(shapes) = &marks[1] else {
            panic!("expected shapes after the line");
        };
        assert_eq!(shapes.len, 3);
        assert_eq!(entities.len(), 3);
    }

    #[test]
    fn test_entities_carry_tooltips() {
        let data = dataset(vec![series("S1", &[(1.0, Some(2.0))])]);
        let renderer = XYLineAndShapeRenderer::new(false, true).with_generators(XYGenerators {
            tooltip: Some(XYLabelGenerator::standard_tooltip()),
            ..Default::default()
        });
        let state = render(&renderer, &data, None);
        let entities = state.entities.unwrap();
        let entity = entities.entity_at(10.0, 80.0).unwrap();
        assert_eq!(entity.tooltip.as_deref(), Some("S1: (1, 2)"));
        assert_eq!(
            entity.kind,
            EntityKind::XYItem {
                dataset: 0,
                series: 0,
                item: 0
            }
        );
    }

    #[test]
    fn test_crosshair_locks_on_nearest_item() {
        let data = dataset(vec![series("S1", &[(1.0, Some(1.0)), (5.0, Some(5.0))])]);
        let state = render(&XYLineAndShapeRenderer::default(), &data, Some([48.0, 52.0]));
        assert_eq!(state.crosshair.crosshair_x, 5.0);
        assert_eq!(state.crosshair.crosshair_y, 5.0);
    }

    #[test]
    fn test_legend_item_has_line_and_shape() {
        let data = dataset(vec![series("S1", &[(1.0, Some(1.0))])]);
        let supplier = DrawingSupplier::default();
        let ctx = StyleContext::new(&supplier);
        let item = XYLineAndShapeRenderer::default()
            .legend_item(&data, 0, 0, &ctx)
            .unwrap();
        assert_eq!(item.label, "S1");
        assert!(item.line_visible);
        assert_eq!(item.shape, Some(supplier.shape(0)));
        assert_eq!(item.fill, supplier.paint(0));
    }
}
