use chartwell_common::shapes::polygon_path;
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

/// How the area is closed at the first and last categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaEndType {
    /// Slopes down to zero at the outer edge of the end categories
    #[default]
    Taper,
    /// Stays level across the end categories
    Level,
    /// Stops at the middle of the end categories
    Truncate,
}

/// Fills the region between each row and zero.
///
/// Each item covers its category: the outline runs from the average with the
/// previous value at the category start, through the value at the middle, to
/// the average with the next value at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaRenderer {
    pub styles: SeriesStyles,
    pub generators: CategoryGenerators,
    pub end_type: AreaEndType,
    pub outline: bool,
}

impl Default for AreaRenderer {
    fn default() -> Self {
        Self {
            styles: SeriesStyles::default(),
            generators: CategoryGenerators::default(),
            end_type: AreaEndType::Taper,
            outline: false,
        }
    }
}

impl AreaRenderer {
    pub fn new(end_type: AreaEndType) -> Self {
        Self {
            end_type,
            ..Default::default()
        }
    }

    /// Values at the start and end of the category: averages with the
    /// neighbours, or the end type's value at the ends of the row
    fn edge_values(
        &self,
        ctx: &CategoryItemContext,
        row: usize,
        column: usize,
        value: f64,
    ) -> (f64, f64) {
        let end = match self.end_type {
            AreaEndType::Level => value,
            AreaEndType::Taper | AreaEndType::Truncate => 0.0,
        };
        let neighbour = |c: Option<usize>| {
            c.filter(|c| *c < ctx.dataset.column_count())
                .and_then(|c| ctx.dataset.value(row, c))
                .map(|v| (v + value) / 2.0)
                .unwrap_or(end)
        };
        (neighbour(column.checked_sub(1)), neighbour(Some(column + 1)))
    }

    fn baseline(ctx: &CategoryItemContext) -> f32 {
        let zero = ctx.trans_value(0.0);
        if zero.is_finite() {
            zero
        } else {
            ctx.trans_value(ctx.range_axis.range.lower())
        }
    }
}

impl CategoryItemRenderer for AreaRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.styles
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        row: usize,
        column: usize,
        _pass: usize,
    ) -> Result<(), ChartwellChartError> {
        let Some(value) = ctx.dataset.value(row, column) else {
            return Ok(());
        };
        let (mut x0, x1, mut x2) = (
            ctx.category_start(column),
            ctx.category_middle(column),
            ctx.category_end(column),
        );
        if self.end_type == AreaEndType::Truncate {
            if column == 0 {
                x0 = x1;
            }
            if column + 1 == ctx.dataset.column_count() {
                x2 = x1;
            }
        }
        let (v0, v2) = self.edge_values(ctx, row, column, value);
        let (y0, y1, y2) = (ctx.trans_value(v0), ctx.trans_value(value), ctx.trans_value(v2));
        if ![y0, y1, y2].iter().all(|v| v.is_finite()) {
            return Ok(());
        }
        let base = Self::baseline(ctx);
        let polygon = [
            ctx.point(x0, base),
            ctx.point(x0, y0),
            ctx.point(x1, y1),
            ctx.point(x2, y2),
            ctx.point(x2, base),
        ];
        let path = polygon_path(&polygon, true);
        let stroke = self.outline.then(|| {
            (
                self.styles.outline_paint(row, &ctx.styles),
                self.styles.outline_stroke(row, &ctx.styles),
            )
        });
        state.marks.path(
            &format!("cat_{}_areas", ctx.dataset_index),
            path.clone(),
            self.styles.paint(row, &ctx.styles),
            stroke,
        );
        add_item_entity(
            state,
            ctx,
            &self.generators,
            EntityShape::Path(path),
            ctx.entity_kind(row, column),
            (row, column),
        );
        update_crosshair(state, ctx, column, value, x1);
        let anchor = ctx.point(x1, y1);
        draw_item_label(state, ctx, &self.generators, &self.styles, row, column, anchor, value >= 0.0);
        Ok(())
    }

    fn legend_item(
        &self,
        dataset: &CategoryDatasetKind,
        dataset_index: usize,
        row: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem> {
        let outline = self.outline.then(|| {
            (
                self.styles.outline_paint(row, ctx),
                self.styles.outline_stroke(row, ctx).width,
            )
        });
        let item = series_legend_item(&self.styles, dataset, dataset_index, row, ctx)?;
        Some(item.with_outline(outline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::category::draw_dataset;
    use crate::renderer::category::test_support::*;
    use crate::supplier::DrawingSupplier;
    use chartwell_common::layout::{PlotOrientation, RectangleEdge};
    use rstest::rstest;

    #[rstest]
    #[case(AreaEndType::Taper, false, true)]
    #[case(AreaEndType::Level, true, true)]
    #[case(AreaEndType::Truncate, false, false)]
    fn test_end_types(
        #[case] end_type: AreaEndType,
        #[case] level_at_start: bool,
        #[case] covers_start: bool,
    ) {
        let (domain, range) = axes();
        let data = dataset(&[("R", "A", Some(4.0)), ("R", "B", Some(8.0))]);
        let supplier = DrawingSupplier::default();
        let ctx = CategoryItemContext::new(
            area(),
            PlotOrientation::Vertical,
            (&domain, RectangleEdge::Bottom),
            (&range, RectangleEdge::Left),
            &data,
            StyleContext::new(&supplier),
        )
        .unwrap();
        let mut state = RendererState::new(true, None);
        draw_dataset(&AreaRenderer::new(end_type), &mut state, &ctx).unwrap();
        let entities = state.entities.unwrap();
        assert_eq!(entities.len(), 2);

        // category A spans x 0 to 50 with its value at x = 25, y = 60
        assert!(entities.entity_at(25.0, 80.0).is_some());
        assert_eq!(entities.entity_at(2.0, 70.0).is_some(), level_at_start);
        assert_eq!(entities.entity_at(2.0, 99.0).is_some(), covers_start);
        // the join with B at x = 50 sits at the average value of 6
        assert!(entities.entity_at(48.0, 45.0).is_some());
    }
}
