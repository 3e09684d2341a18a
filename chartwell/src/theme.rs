//! Named bundles of fonts and paints that can be applied to a chart after
//! it is built.

use chartwell_common::types::{colors, ColorOrGradient, FontSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::AxisStyle;
use crate::chart::{Chart, Plot};
use crate::error::ChartwellChartError;
use crate::plot::{Crosshair, Gridlines, PlotStyle};
use crate::renderer::styles::SeriesStyles;
use crate::supplier::DrawingSupplier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub name: String,
    /// Main title font
    pub extra_large_font: FontSpec,
    /// Axis labels and the meter value
    pub large_font: FontSpec,
    /// Subtitles, legend items and pie labels
    pub regular_font: FontSpec,
    /// Tick and item labels
    pub small_font: FontSpec,
    pub title_paint: ColorOrGradient,
    pub subtitle_paint: ColorOrGradient,
    pub chart_background_paint: ColorOrGradient,
    pub legend_background_paint: ColorOrGradient,
    pub legend_item_paint: ColorOrGradient,
    pub plot_background_paint: ColorOrGradient,
    pub plot_outline_paint: ColorOrGradient,
    pub label_link_paint: ColorOrGradient,
    pub domain_gridline_paint: ColorOrGradient,
    pub range_gridline_paint: ColorOrGradient,
    pub crosshair_paint: ColorOrGradient,
    pub axis_label_paint: ColorOrGradient,
    pub tick_label_paint: ColorOrGradient,
    pub item_label_paint: ColorOrGradient,
    pub needle_paint: ColorOrGradient,
    pub shadow_visible: bool,
    pub shadow_paint: ColorOrGradient,
    pub drawing_supplier: DrawingSupplier,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::standard()
    }
}

impl ChartTheme {
    /// Gray plot background with white gridlines
    pub fn standard() -> Self {
        let dark_gray = ColorOrGradient::Color(colors::DARK_GRAY);
        Self {
            name: "standard".to_string(),
            extra_large_font: FontSpec::new("Tahoma", 20.0, true),
            large_font: FontSpec::new("Tahoma", 14.0, true),
            regular_font: FontSpec::new("Tahoma", 12.0, false),
            small_font: FontSpec::new("Tahoma", 10.0, false),
            title_paint: ColorOrGradient::Color(colors::BLACK),
            subtitle_paint: ColorOrGradient::Color(colors::BLACK),
            chart_background_paint: ColorOrGradient::Color(colors::WHITE),
            legend_background_paint: ColorOrGradient::Color(colors::WHITE),
            legend_item_paint: dark_gray.clone(),
            plot_background_paint: ColorOrGradient::Color(colors::LIGHT_GRAY),
            plot_outline_paint: ColorOrGradient::Color(colors::GRAY),
            label_link_paint: ColorOrGradient::Color(colors::BLACK),
            domain_gridline_paint: ColorOrGradient::Color(colors::WHITE),
            range_gridline_paint: ColorOrGradient::Color(colors::WHITE),
            crosshair_paint: ColorOrGradient::Color(colors::BLUE),
            axis_label_paint: dark_gray.clone(),
            tick_label_paint: dark_gray.clone(),
            item_label_paint: ColorOrGradient::Color(colors::BLACK),
            needle_paint: dark_gray,
            shadow_visible: true,
            shadow_paint: ColorOrGradient::Color(colors::GRAY),
            drawing_supplier: DrawingSupplier::default(),
        }
    }

    /// Black backgrounds, white text and bright series colors
    pub fn darkness() -> Self {
        let white = ColorOrGradient::Color(colors::WHITE);
        let black = ColorOrGradient::Color(colors::BLACK);
        Self {
            name: "darkness".to_string(),
            title_paint: white.clone(),
            subtitle_paint: white.clone(),
            chart_background_paint: black.clone(),
            legend_background_paint: black.clone(),
            legend_item_paint: white.clone(),
            plot_background_paint: black,
            plot_outline_paint: ColorOrGradient::Color(colors::YELLOW),
            label_link_paint: ColorOrGradient::Color(colors::LIGHT_GRAY),
            domain_gridline_paint: ColorOrGradient::Color(colors::LIGHT_GRAY),
            range_gridline_paint: ColorOrGradient::Color(colors::LIGHT_GRAY),
            crosshair_paint: ColorOrGradient::Color(colors::YELLOW),
            axis_label_paint: white.clone(),
            tick_label_paint: white.clone(),
            item_label_paint: white.clone(),
            needle_paint: white,
            shadow_visible: false,
            drawing_supplier: DrawingSupplier::bright(),
            ..Self::standard()
        }
    }

    /// The look of charts before themes existed
    pub fn legacy() -> Self {
        Self {
            name: "legacy".to_string(),
            extra_large_font: FontSpec::new("SansSerif", 18.0, true),
            large_font: FontSpec::new("SansSerif", 14.0, true),
            regular_font: FontSpec::new("SansSerif", 12.0, false),
            small_font: FontSpec::new("SansSerif", 10.0, false),
            plot_background_paint: ColorOrGradient::Color(colors::WHITE),
            domain_gridline_paint: ColorOrGradient::Color(colors::LIGHT_GRAY),
            range_gridline_paint: ColorOrGradient::Color(colors::LIGHT_GRAY),
            shadow_visible: false,
            ..Self::standard()
        }
    }

    pub fn by_name(name: &str) -> Result<Self, ChartwellChartError> {
        match name.to_ascii_lowercase().as_str() {
            "standard" | "jfree" => Ok(Self::standard()),
            "darkness" | "dark" => Ok(Self::darkness()),
            "legacy" => Ok(Self::legacy()),
            _ => Err(ChartwellChartError::UnknownTheme(name.to_string())),
        }
    }

    /// Overwrites the fonts and paints of `chart` and everything it contains
    pub fn apply(&self, chart: &mut Chart) {
        debug!("applying {} theme to {} chart", self.name, chart.plot.type_name());
        if let Some(title) = &mut chart.title {
            title.font = self.extra_large_font.clone();
            title.paint = self.title_paint.clone();
        }
        for subtitle in &mut chart.subtitles {
            subtitle.font = self.regular_font.clone();
            subtitle.paint = self.subtitle_paint.clone();
        }
        if let Some(legend) = &mut chart.legend {
            legend.item_font = self.regular_font.clone();
            legend.item_paint = self.legend_item_paint.clone();
            if legend.background.is_some() {
                legend.background = Some(self.legend_background_paint.clone());
            }
        }
        if chart.background.is_some() {
            chart.background = Some(self.chart_background_paint.clone());
        }
        self.apply_to_plot_style(chart.plot.style_mut());

        match &mut chart.plot {
            Plot::Xy(plot) => {
                self.apply_to_axis(&mut plot.domain_axis.style);
                self.apply_to_axis(&mut plot.range_axis.style);
                self.apply_to_gridlines(&mut plot.domain_gridlines, &self.domain_gridline_paint);
                self.apply_to_gridlines(&mut plot.range_gridlines, &self.range_gridline_paint);
                self.apply_to_crosshair(&mut plot.domain_crosshair);
                self.apply_to_crosshair(&mut plot.range_crosshair);
                for renderer in plot.renderers.values_mut() {
                    self.apply_to_series(renderer.styles_mut());
                }
            }
            Plot::Category(plot) => {
                self.apply_to_axis(&mut plot.domain_axis.style);
                self.apply_to_axis(&mut plot.range_axis.style);
                self.apply_to_gridlines(&mut plot.domain_gridlines, &self.domain_gridline_paint);
                self.apply_to_gridlines(&mut plot.range_gridlines, &self.range_gridline_paint);
                self.apply_to_crosshair(&mut plot.domain_crosshair);
                self.apply_to_crosshair(&mut plot.range_crosshair);
                for renderer in plot.renderers.values_mut() {
                    self.apply_to_series(renderer.styles_mut());
                }
            }
            Plot::Pie(plot) => {
                plot.label_font = self.regular_font.clone();
                plot.label_paint = self.item_label_paint.clone();
                plot.label_link_paint = self.label_link_paint.clone();
                plot.shadow_paint = self.shadow_visible.then(|| self.shadow_paint.clone());
                // sections take the theme colors from the supplier
                plot.section_paints.clear();
            }
            Plot::Meter(plot) => {
                plot.needle_paint = self.needle_paint.clone();
                plot.value_paint = self.axis_label_paint.clone();
                plot.value_font = self.large_font.clone();
                plot.tick_label_paint = self.tick_label_paint.clone();
                plot.tick_label_font = self.small_font.clone();
            }
        }
    }

    fn apply_to_plot_style(&self, style: &mut PlotStyle) {
        if style.background.is_some() {
            style.background = Some(self.plot_background_paint.clone());
        }
        if let Some((paint, _)) = &mut style.outline {
            *paint = self.plot_outline_paint.clone();
        }
        style.no_data_font = self.regular_font.clone();
        style.no_data_paint = self.axis_label_paint.clone();
        style.drawing_supplier = self.drawing_supplier.clone();
    }

    fn apply_to_axis(&self, style: &mut AxisStyle) {
        style.label_font = self.large_font.clone();
        style.label_paint = self.axis_label_paint.clone();
        style.tick_label_font = self.small_font.clone();
        style.tick_label_paint = self.tick_label_paint.clone();
    }

    fn apply_to_gridlines(&self, gridlines: &mut Gridlines, paint: &ColorOrGradient) {
        gridlines.paint = paint.clone();
    }

    fn apply_to_crosshair(&self, crosshair: &mut Crosshair) {
        crosshair.paint = self.crosshair_paint.clone();
    }

    fn apply_to_series(&self, styles: &mut SeriesStyles) {
        styles.item_label_font = self.small_font.clone();
        styles.item_label_paint = self.item_label_paint.clone();
    }
}
