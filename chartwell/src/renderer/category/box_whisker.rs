use chartwell_common::layout::PlotOrientation;
use chartwell_common::range::Range;
use chartwell_common::types::{colors, ColorOrGradient, StrokeStyle, SymbolShape};
use chartwell_data::dataset_utils::find_category_range_bounds;
use chartwell_data::statistics::BoxAndWhiskerItem;
use chartwell_data::traits::{BoxAndWhiskerCategoryDataset, CategoryDataset};
use chartwell_data::CategoryDatasetKind;
use serde::{Deserialize, Serialize};

use super::bar::calculate_bar_width;
use super::{
    add_item_entity, series_legend_item, update_crosshair, CategoryItemContext,
    CategoryItemRenderer,
};
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;
use crate::renderer::styles::{SeriesStyles, StyleContext};
use crate::renderer::{oriented_bar, CategoryGenerators, EntityShape, RendererState};

/// Box and whisker plots of summarized samples.
///
/// The box spans the first to third quartile with a line at the median and a
/// circle at the mean. Whiskers reach the most extreme regular values. Values
/// beyond them are drawn as circles, and values beyond the far-out limits are
/// flagged by a triangle at the edge of the data area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxAndWhiskerRenderer {
    pub styles: SeriesStyles,
    pub generators: CategoryGenerators,
    pub item_margin: f64,
    pub max_bar_width: f64,
    /// Paint of the whiskers, median line and markers
    pub artifact_paint: ColorOrGradient,
    pub artifact_stroke: StrokeStyle,
    pub fill_box: bool,
    pub mean_visible: bool,
    pub median_visible: bool,
    /// Width of the whisker caps as a fraction of the box width
    pub whisker_width: f32,
}

impl Default for BoxAndWhiskerRenderer {
    fn default() -> Self {
        Self {
            styles: SeriesStyles::default(),
            generators: CategoryGenerators::default(),
            item_margin: 0.2,
            max_bar_width: 1.0,
            artifact_paint: ColorOrGradient::Color(colors::BLACK),
            artifact_stroke: StrokeStyle::new(1.0),
            fill_box: true,
            mean_visible: true,
            median_visible: true,
            whisker_width: 1.0,
        }
    }
}

impl BoxAndWhiskerRenderer {
    fn box_data<'a>(
        &self,
        dataset: &'a CategoryDatasetKind,
    ) -> Result<&'a dyn BoxAndWhiskerCategoryDataset, ChartwellChartError> {
        dataset
            .as_box_and_whisker()
            .ok_or(ChartwellChartError::IncompatibleDataset {
                renderer: "box_and_whisker",
                dataset: dataset.type_name(),
            })
    }

    /// Category axis coordinate where the box of the `slot`th visible row
    /// starts, with the boxes of a category centred as a group
    fn box_start(
        &self,
        ctx: &CategoryItemContext,
        slot: usize,
        rows: usize,
        column: usize,
        box_width: f32,
    ) -> f32 {
        let start = ctx.category_start(column);
        let category_width = (ctx.category_end(column) - start).abs();
        if rows > 1 {
            let columns = ctx.dataset.column_count().max(1) as f32;
            let gap = ctx.category_space() * self.item_margin as f32
                / (columns * (rows as f32 - 1.0));
            let used = box_width * rows as f32 + gap * (rows as f32 - 1.0);
            start + (category_width - used) / 2.0 + slot as f32 * (box_width + gap)
        } else {
            start + (category_width - box_width) / 2.0
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_box(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        item: &BoxAndWhiskerItem,
        row: usize,
        column: usize,
        start: f32,
        width: f32,
    ) {
        let d = ctx.dataset_index;
        let t = |v: f64| ctx.trans_value(v);
        let middle = start + width / 2.0;
        let paint = &self.artifact_paint;
        let stroke = &self.artifact_stroke;

        let bounds = oriented_bar(ctx.orientation, start, width, t(item.q1), t(item.q3));
        let fill = if self.fill_box {
            self.styles.paint(row, &ctx.styles)
        } else {
            ColorOrGradient::transparent()
        };
        let outline = (
            self.styles.outline_paint(row, &ctx.styles),
            self.styles.outline_stroke(row, &ctx.styles).width,
        );
        state.marks.rect(&format!("cat_{d}_boxes"), bounds, fill, Some(outline));

        let whiskers = format!("cat_{d}_whiskers");
        let cap_half = width * self.whisker_width / 2.0;
        for (end, quartile) in [(item.max_regular, item.q3), (item.min_regular, item.q1)] {
            let (te, tq) = (t(end), t(quartile));
            state
                .marks
                .rule(&whiskers, ctx.point(middle, te), ctx.point(middle, tq), paint.clone(), stroke);
            state.marks.rule(
                &whiskers,
                ctx.point(middle - cap_half, te),
                ctx.point(middle + cap_half, te),
                paint.clone(),
                stroke,
            );
        }

        if self.median_visible {
            let tm = t(item.median);
            state.marks.rule(
                &format!("cat_{d}_medians"),
                ctx.point(start, tm),
                ctx.point(start + width, tm),
                paint.clone(),
                stroke,
            );
        }
        if self.mean_visible && ctx.range_axis.range.contains(item.mean) {
            state.marks.symbol(
                &format!("cat_{d}_means"),
                SymbolShape::Circle,
                ctx.point(middle, t(item.mean)),
                width / 2.0,
                ColorOrGradient::transparent(),
                Some((paint.clone(), stroke.width)),
            );
        }
        self.draw_outliers(state, ctx, item, middle, width);

        add_item_entity(
            state,
            ctx,
            &self.generators,
            EntityShape::Rect(bounds),
            ctx.entity_kind(row, column),
            (row, column),
        );
        update_crosshair(state, ctx, column, item.median, middle);
    }

    fn draw_outliers(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        item: &BoxAndWhiskerItem,
        middle: f32,
        width: f32,
    ) {
        let d = ctx.dataset_index;
        let paint = &self.artifact_paint;
        let (mut far_high, mut far_low) = (false, false);
        for &outlier in &item.outliers {
            if outlier > item.max_outlier {
                far_high = true;
            } else if outlier < item.min_outlier {
                far_low = true;
            } else if outlier > item.max_regular || outlier < item.min_regular {
                state.marks.symbol(
                    &format!("cat_{d}_outliers"),
                    SymbolShape::Circle,
                    ctx.point(middle, ctx.trans_value(outlier)),
                    width * 2.0 / 3.0,
                    ColorOrGradient::transparent(),
                    Some((paint.clone(), self.artifact_stroke.width)),
                );
            }
        }

        let axis = ctx.range_axis.range;
        let (upper, lower) = (ctx.trans_value(axis.upper()), ctx.trans_value(axis.lower()));
        let inward = (lower - upper).signum();
        let size = width / 2.0;
        let (high_shape, low_shape) = match ctx.orientation {
            PlotOrientation::Vertical => (SymbolShape::TriangleUp, SymbolShape::TriangleDown),
            PlotOrientation::Horizontal => (SymbolShape::TriangleRight, SymbolShape::TriangleLeft),
        };
        let markers = [
            (far_high, high_shape, upper + inward * size / 2.0),
            (far_low, low_shape, lower - inward * size / 2.0),
        ];
        for (_, shape, position) in markers.into_iter().filter(|(flag, _, _)| *flag) {
            state.marks.symbol(
                &format!("cat_{d}_far_outs"),
                shape,
                ctx.point(middle, position),
                size,
                ColorOrGradient::transparent(),
                Some((paint.clone(), self.artifact_stroke.width)),
            );
        }
    }
}

impl CategoryItemRenderer for BoxAndWhiskerRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.styles
    }

    fn initialise(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
    ) -> Result<(), ChartwellChartError> {
        self.box_data(ctx.dataset)?;
        let rows = ctx.visible_rows(&self.styles).len();
        state.bar_width = calculate_bar_width(
            ctx,
            self.item_margin,
            self.max_bar_width,
            rows,
            ctx.dataset.column_count(),
        );
        Ok(())
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        row: usize,
        column: usize,
        _pass: usize,
    ) -> Result<(), ChartwellChartError> {
        let data = self.box_data(ctx.dataset)?;
        let Some(item) = data.item(row, column) else {
            return Ok(());
        };
        let rows = ctx.visible_rows(&self.styles);
        let Some(slot) = rows.iter().position(|r| *r == row) else {
            return Ok(());
        };
        let width = state.bar_width;
        let start = self.box_start(ctx, slot, rows.len(), column, width);
        self.draw_box(state, ctx, item, row, column, start, width);
        Ok(())
    }

    fn find_range_bounds(&self, dataset: &CategoryDatasetKind) -> Option<Range> {
        find_category_range_bounds(dataset, true)
    }

    fn legend_item(
        &self,
        dataset: &CategoryDatasetKind,
        dataset_index: usize,
        row: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem> {
        let outline = (
            self.styles.outline_paint(row, ctx),
            self.styles.outline_stroke(row, ctx).width,
        );
        Some(
            series_legend_item(&self.styles, dataset, dataset_index, row, ctx)?
                .with_outline(Some(outline)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::category::draw_dataset;
    use crate::renderer::category::test_support::*;
    use crate::supplier::DrawingSupplier;
    use chartwell_common::layout::RectangleEdge;
    use chartwell_data::box_whisker::DefaultBoxAndWhiskerCategoryDataset;
    use chartwell_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;

    fn item() -> BoxAndWhiskerItem {
        BoxAndWhiskerItem {
            mean: 5.0,
            median: 4.0,
            q1: 3.0,
            q3: 6.0,
            min_regular: 1.0,
            max_regular: 8.0,
            min_outlier: 0.5,
            max_outlier: 9.0,
            outliers: vec![8.5, 9.5],
        }
    }

    fn data() -> CategoryDatasetKind {
        let mut data = DefaultBoxAndWhiskerCategoryDataset::new();
        data.add_item(item(), "R", "A");
        data.into()
    }

    fn mark<'a>(marks: &'a [SceneMark], name: &str) -> &'a SceneMark {
        marks.iter().find(|m| m.name() == name).unwrap()
    }

    #[test]
    fn test_box_parts() {
        let (domain, range) = axes();
        let data = data();
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
        draw_dataset(&BoxAndWhiskerRenderer::default(), &mut state, &ctx).unwrap();
        assert!(state.entities.as_ref().unwrap().entity_at(50.0, 50.0).is_some());
        let marks = state.marks.into_marks();

        let SceneMark::Rect(boxes) = mark(&marks, "cat_0_boxes") else {
            panic!("expected a box");
        };
        assert_approx_eq!(f32, boxes.y.as_vec(1)[0], 40.0);
        assert_approx_eq!(f32, boxes.height.as_vec(1)[0], 30.0);

        let SceneMark::Rule(whiskers) = mark(&marks, "cat_0_whiskers") else {
            panic!("expected whiskers");
        };
        assert_eq!(whiskers.len, 4);
        assert_approx_eq!(f32, whiskers.y0.as_vec(4)[0], 20.0);
        assert_approx_eq!(f32, whiskers.y1.as_vec(4)[0], 40.0);

        let SceneMark::Rule(median) = mark(&marks, "cat_0_medians") else {
            panic!("expected a median line");
        };
        assert_approx_eq!(f32, median.y0.as_vec(1)[0], 60.0);

        let SceneMark::Symbol(outliers) = mark(&marks, "cat_0_outliers") else {
            panic!("expected outliers");
        };
        assert_eq!(outliers.len, 1);
        assert_approx_eq!(f32, outliers.y.as_vec(1)[0], 15.0);

        let SceneMark::Symbol(far_outs) = mark(&marks, "cat_0_far_outs") else {
            panic!("expected a far-out marker");
        };
        assert_eq!(far_outs.shape.as_vec(1), vec![SymbolShape::TriangleUp]);
        // half the 100 px box width, touching the top edge
        assert_approx_eq!(f32, far_outs.y.as_vec(1)[0], 25.0);
    }

    #[test]
    fn test_range_covers_outliers() {
        let range = BoxAndWhiskerRenderer::default()
            .find_range_bounds(&data())
            .unwrap();
        assert_eq!((range.lower(), range.upper()), (0.5, 9.5));
    }
}
