use chartwell_common::range::Range;
use chartwell_common::types::{colors, ColorOrGradient};
use chartwell_data::dataset_utils::find_category_range_bounds;
use chartwell_data::traits::{CategoryDataset, GanttCategoryDataset};
use chartwell_data::CategoryDatasetKind;
use serde::{Deserialize, Serialize};

use super::{draw_item_label, update_crosshair, BarRenderer, CategoryItemContext, CategoryItemRenderer};
use crate::entity::EntityKind;
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;
use crate::renderer::styles::{SeriesStyles, StyleContext};
use crate::renderer::{oriented_bar, RendererState};

/// Draws each task as a bar from its start to its end.
///
/// Tasks with subtasks are drawn as one bar per subtask. When a task carries
/// a completion fraction, a thinner bar inside it shows the completed part
/// from the start and the remainder up to the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttRenderer {
    pub bar: BarRenderer,
    /// Where the completion bar starts across the task bar
    pub start_percent: f64,
    pub end_percent: f64,
    pub complete_paint: ColorOrGradient,
    pub incomplete_paint: ColorOrGradient,
}

impl Default for GanttRenderer {
    fn default() -> Self {
        Self {
            bar: BarRenderer {
                include_base_in_range: false,
                ..Default::default()
            },
            start_percent: 0.35,
            end_percent: 0.65,
            complete_paint: ColorOrGradient::Color(colors::GREEN),
            incomplete_paint: ColorOrGradient::Color(colors::RED),
        }
    }
}

impl GanttRenderer {
    fn gantt<'a>(
        &self,
        dataset: &'a CategoryDatasetKind,
    ) -> Result<&'a dyn GanttCategoryDataset, ChartwellChartError> {
        dataset.as_gantt().ok_or(ChartwellChartError::IncompatibleDataset {
            renderer: "gantt",
            dataset: dataset.type_name(),
        })
    }

    fn entity_kind(ctx: &CategoryItemContext, row: usize, column: usize) -> EntityKind {
        EntityKind::GanttTask {
            row_key: ctx.dataset.row_key(row).unwrap_or_default().to_string(),
            column_key: ctx.dataset.column_key(column).unwrap_or_default().to_string(),
        }
    }

    /// Draws one interval with its completion bar, returning the screen
    /// coordinate of its end
    #[allow(clippy::too_many_arguments)]
    fn draw_interval(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        (row, column): (usize, usize),
        start: f32,
        width: f32,
        (from, to): (f64, f64),
        percent: Option<f64>,
    ) -> Option<f32> {
        let (t0, t1) = self.bar.value_span(ctx, from, to)?;
        let bar = oriented_bar(ctx.orientation, start, width, t0, t1);
        self.bar
            .fill_bar(state, ctx, bar, Self::entity_kind(ctx, row, column), (row, column));

        if let Some(p) = percent {
            let p = p.clamp(0.0, 1.0) as f32;
            let split = t0 + (t1 - t0) * p;
            let inner_start = start + width * self.start_percent as f32;
            let inner_width = width * (self.end_percent - self.start_percent) as f32;
            let name = ctx.dataset_index;
            state.marks.rect(
                &format!("cat_{name}_complete"),
                oriented_bar(ctx.orientation, inner_start, inner_width, t0, split),
                self.complete_paint.clone(),
                None,
            );
            state.marks.rect(
                &format!("cat_{name}_incomplete"),
                oriented_bar(ctx.orientation, inner_start, inner_width, split, t1),
                self.incomplete_paint.clone(),
                None,
            );
        }
        Some(t1)
    }
}

impl CategoryItemRenderer for GanttRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.bar.styles
    }

    fn initialise(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
    ) -> Result<(), ChartwellChartError> {
        self.gantt(ctx.dataset)?;
        self.bar.initialise(state, ctx)
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        row: usize,
        column: usize,
        _pass: usize,
    ) -> Result<(), ChartwellChartError> {
        let data = self.gantt(ctx.dataset)?;
        let rows = ctx.visible_rows(&self.bar.styles);
        let Some(slot) = rows.iter().position(|r| *r == row) else {
            return Ok(());
        };
        let width = state.bar_width;
        let start = self.bar.bar_start(ctx, slot, rows.len(), column, width);

        let subtasks = data.sub_interval_count(row, column);
        let intervals: Vec<_> = if subtasks > 0 {
            (0..subtasks)
                .filter_map(|s| {
                    let from = data.sub_interval_start(row, column, s)?;
                    let to = data.sub_interval_end(row, column, s)?;
                    Some((from, to, data.sub_interval_percent_complete(row, column, s)))
                })
                .collect()
        } else {
            match (data.start_value(row, column), data.end_value(row, column)) {
                (Some(from), Some(to)) => vec![(from, to, data.percent_complete(row, column))],
                _ => Vec::new(),
            }
        };

        let mut last_end = None;
        for (from, to, percent) in &intervals {
            if let Some(end) = self.draw_interval(
                state,
                ctx,
                (row, column),
                start,
                width,
                (*from, *to),
                *percent,
            ) {
                last_end = Some((*to, end));
            }
        }

        let Some((end_value, end)) = last_end else {
            return Ok(());
        };
        let middle = start + width / 2.0;
        update_crosshair(state, ctx, column, end_value, middle);
        draw_item_label(
            state,
            ctx,
            &self.bar.generators,
            &self.bar.styles,
            row,
            column,
            ctx.point(middle, end),
            true,
        );
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
        self.bar.bar_legend_item(dataset, dataset_index, row, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::category::draw_dataset;
    use crate::renderer::category::test_support::*;
    use crate::supplier::DrawingSupplier;
    use chartwell_common::layout::{PlotOrientation, RectangleEdge};
    use chartwell_data::gantt::{Task, TaskSeries, TaskSeriesCollection};
    use chartwell_data::time::SimpleTimePeriod;
    use chartwell_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;

    fn period(start: i64, end: i64) -> Option<SimpleTimePeriod> {
        Some(SimpleTimePeriod::try_new(start, end).unwrap())
    }

    fn schedule() -> CategoryDatasetKind {
        let mut series = TaskSeries::new("Plan");
        series.add(Task::new("Design", period(0, 4)).with_percent_complete(0.5));
        series.add(
            Task::new("Build", period(4, 10))
                .with_subtask(Task::new("Frame", period(4, 6)))
                .with_subtask(Task::new("Roof", period(7, 10))),
        );
        let mut collection = TaskSeriesCollection::new();
        collection.add(series).unwrap();
        collection.into()
    }

    fn render(data: &CategoryDatasetKind) -> RendererState {
        let (domain, range) = axes();
        let supplier = DrawingSupplier::default();
        let ctx = CategoryItemContext::new(
            area(),
            PlotOrientation::Horizontal,
            (&domain, RectangleEdge::Left),
            (&range, RectangleEdge::Bottom),
            data,
            StyleContext::new(&supplier),
        )
        .unwrap();
        let mut state = RendererState::new(true, None);
        draw_dataset(&GanttRenderer::default(), &mut state, &ctx).unwrap();
        state
    }

    #[test]
    fn test_tasks_and_subtasks() {
        let state = render(&schedule());
        let entities = state.entities.as_ref().unwrap();
        assert_eq!(entities.len(), 3);
        let hit = entities.entity_at(80.0, 75.0).unwrap();
        assert_eq!(
            hit.kind,
            EntityKind::GanttTask {
                row_key: "Plan".to_string(),
                column_key: "Build".to_string(),
            }
        );
        // the gap between the subtasks is empty
        assert!(entities.entity_at(65.0, 75.0).is_none());

        let marks = state.marks.into_marks();
        let SceneMark::Rect(bars) = &marks[0] else {
            panic!("expected task bars first");
        };
        assert_eq!(bars.len, 3);
        let (x, width) = (bars.x.as_vec(3), bars.width.as_vec(3));
        assert_approx_eq!(f32, x[0], 0.0);
        assert_approx_eq!(f32, width[0], 40.0);
        assert_approx_eq!(f32, x[2], 70.0);
        assert_approx_eq!(f32, width[2], 30.0);
        assert_approx_eq!(f32, bars.height.as_vec(3)[0], 50.0);
    }

    #[test]
    fn test_completion_bar() {
        let marks = render(&schedule()).marks.into_marks();
        let SceneMark::Rect(complete) = &marks[1] else {
            panic!("expected the completed part");
        };
        assert_eq!(complete.name, "cat_0_complete");
        assert_approx_eq!(f32, complete.x.as_vec(1)[0], 0.0);
        assert_approx_eq!(f32, complete.width.as_vec(1)[0], 20.0);
        assert_approx_eq!(f32, complete.y.as_vec(1)[0], 17.5);
        assert_approx_eq!(f32, complete.height.as_vec(1)[0], 15.0);
        let SceneMark::Rect(incomplete) = &marks[2] else {
            panic!("expected the remainder");
        };
        assert_approx_eq!(f32, incomplete.x.as_vec(1)[0], 20.0);
        assert_approx_eq!(f32, incomplete.width.as_vec(1)[0], 20.0);
    }

    #[test]
    fn test_range_spans_task_intervals() {
        let range = GanttRenderer::default()
            .find_range_bounds(&schedule())
            .unwrap();
        assert_eq!((range.lower(), range.upper()), (0.0, 10.0));
    }

    #[test]
    fn test_rejects_plain_category_data() {
        let data = dataset(&[("R", "A", Some(1.0))]);
        let (domain, range) = axes();
        let supplier = DrawingSupplier::default();
        let ctx = CategoryItemContext::new(
            area(),
            PlotOrientation::Horizontal,
            (&domain, RectangleEdge::Left),
            (&range, RectangleEdge::Bottom),
            &data,
            StyleContext::new(&supplier),
        )
        .unwrap();
        let mut state = RendererState::new(false, None);
        assert!(draw_dataset(&GanttRenderer::default(), &mut state, &ctx).is_err());
    }
}
