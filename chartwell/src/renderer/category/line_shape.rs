use chartwell_common::layout::Bounds;
use chartwell_common::types::ColorOrGradient;
use chartwell_data::traits::CategoryDataset;
use chartwell_data::CategoryDatasetKind;
use serde::{Deserialize, Serialize};

use super::{
    add_item_entity, draw_item_label, series_legend_item, update_crosshair, CategoryItemContext,
    CategoryItemRenderer,
};
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;
use crate::renderer::styles::{SeriesStyles, StyleContext};
use crate::renderer::{CategoryGenerators, EntityShape, RendererState};

const ENTITY_RADIUS: f32 = 3.0;

/// Joins the values of each row across the categories with a line and marks
/// every value with a shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineAndShapeRenderer {
    pub styles: SeriesStyles,
    pub generators: CategoryGenerators,
    pub lines_visible: bool,
    pub shapes_visible: bool,
    pub shapes_filled: bool,
    pub draw_outlines: bool,
    pub use_outline_paint: bool,
    pub shape_size: f32,
    /// Spread the rows across each category instead of stacking them on the
    /// middle
    pub use_series_offset: bool,
    pub item_margin: f64,
}

impl Default for LineAndShapeRenderer {
    fn default() -> Self {
        Self {
            styles: SeriesStyles::default(),
            generators: CategoryGenerators::default(),
            lines_visible: true,
            shapes_visible: true,
            shapes_filled: true,
            draw_outlines: true,
            use_outline_paint: false,
            shape_size: 6.0,
            use_series_offset: false,
            item_margin: 0.0,
        }
    }
}

impl LineAndShapeRenderer {
    pub fn new(lines: bool, shapes: bool) -> Self {
        Self {
            lines_visible: lines,
            shapes_visible: shapes,
            ..Default::default()
        }
    }

    pub fn with_generators(mut self, generators: CategoryGenerators) -> Self {
        self.generators = generators;
        self
    }

    /// Category axis coordinate of the items of `row`
    fn category_position(&self, ctx: &CategoryItemContext, row: usize, column: usize) -> f32 {
        let rows = ctx.dataset.row_count();
        if !self.use_series_offset || rows <= 1 {
            return ctx.category_middle(column);
        }
        let start = ctx.category_start(column) as f64;
        let width = (ctx.category_end(column) as f64 - start).abs();
        let gap = width * self.item_margin / (rows as f64 - 1.0);
        let series_width = width * (1.0 - self.item_margin) / rows as f64;
        (start + row as f64 * (series_width + gap) + series_width / 2.0) as f32
    }

    fn item_point(
        &self,
        ctx: &CategoryItemContext,
        row: usize,
        column: usize,
    ) -> Option<(f64, f32, [f32; 2])> {
        let value = ctx.dataset.value(row, column)?;
        let tv = ctx.trans_value(value);
        if !tv.is_finite() {
            return None;
        }
        let category = self.category_position(ctx, row, column);
        Some((value, category, ctx.point(category, tv)))
    }

    fn draw_line_point(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        row: usize,
        column: usize,
    ) {
        state
            .line
            .push(self.item_point(ctx, row, column).map(|(_, _, p)| p));
        if column + 1 == ctx.dataset.column_count() {
            let name = format!("cat_{}_series_{row}_line", ctx.dataset_index);
            let paint = self.styles.paint(row, &ctx.styles);
            let stroke = self.styles.stroke(row, &ctx.styles);
            if let Some(mark) = state.line.take_mark(&name, paint, stroke) {
                state.marks.mark(mark);
            }
        }
    }

    fn draw_point(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        row: usize,
        column: usize,
    ) {
        let Some((value, category, point)) = self.item_point(ctx, row, column) else {
            return;
        };
        let half = if self.styles.shapes_visible(row, self.shapes_visible) {
            let paint = self.styles.paint(row, &ctx.styles);
            let fill = if self.shapes_filled {
                paint.clone()
            } else {
                ColorOrGradient::transparent()
            };
            let outline = (self.draw_outlines || !self.shapes_filled).then(|| {
                let outline_paint = if self.use_outline_paint {
                    self.styles.outline_paint(row, &ctx.styles)
                } else {
                    paint
                };
                (outline_paint, self.styles.outline_stroke(row, &ctx.styles).width)
            });
            state.marks.symbol(
                &format!("cat_{}_shapes", ctx.dataset_index),
                self.styles.shape(row, &ctx.styles),
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
        add_item_entity(
            state,
            ctx,
            &self.generators,
            EntityShape::Rect(hit),
            ctx.entity_kind(row, column),
            (row, column),
        );
        update_crosshair(state, ctx, column, value, category);
        draw_item_label(
            state,
            ctx,
            &self.generators,
            &self.styles,
            row,
            column,
            point,
            value >= 0.0,
        );
    }
}

impl CategoryItemRenderer for LineAndShapeRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.styles
    }

    fn pass_count(&self) -> usize {
        2
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        row: usize,
        column: usize,
        pass: usize,
    ) -> Result<(), ChartwellChartError> {
        match pass {
            0 if self.styles.lines_visible(row, self.lines_visible) => {
                self.draw_line_point(state, ctx, row, column)
            }
            1 => self.draw_point(state, ctx, row, column),
            _ => {}
        }
        Ok(())
    }

    fn legend_item(
        &self,
        dataset: &CategoryDatasetKind,
        dataset_index: usize,
        row: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem> {
        let item = series_legend_item(&self.styles, dataset, dataset_index, row, ctx)?;
        let shape = self
            .styles
            .shapes_visible(row, self.shapes_visible)
            .then(|| self.styles.shape(row, ctx));
        let mut item = item.with_shape(shape, self.shapes_filled);
        if self.styles.lines_visible(row, self.lines_visible) {
            item = item.with_line(self.styles.paint(row, ctx), self.styles.stroke(row, ctx));
        }
        Some(item)
    }
}
