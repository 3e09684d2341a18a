use std::collections::BTreeMap;

use chartwell_common::types::{colors, ColorOrGradient, FontSpec, StrokeStyle, SymbolShape};
use serde::{Deserialize, Serialize};

use crate::supplier::DrawingSupplier;

/// Style values that may be set for one series or for all series
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesStyle {
    pub paint: Option<ColorOrGradient>,
    pub outline_paint: Option<ColorOrGradient>,
    pub stroke: Option<StrokeStyle>,
    pub outline_stroke: Option<StrokeStyle>,
    pub shape: Option<SymbolShape>,
    pub visible: Option<bool>,
    pub visible_in_legend: Option<bool>,
    pub item_labels_visible: Option<bool>,
    pub lines_visible: Option<bool>,
    pub shapes_visible: Option<bool>,
}

/// Where a renderer's series sit in the plot's drawing supplier sequences
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    pub supplier: &'a DrawingSupplier,
    /// Series drawn by earlier datasets of the same plot
    pub series_offset: usize,
}

impl<'a> StyleContext<'a> {
    pub fn new(supplier: &'a DrawingSupplier) -> Self {
        Self {
            supplier,
            series_offset: 0,
        }
    }

    fn index(&self, series: usize) -> usize {
        self.series_offset + series
    }
}

/// Per series style overrides with fallback to a base style and then to the
/// plot's drawing supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesStyles {
    #[serde(with = "crate::usize_keys")]
    pub series: BTreeMap<usize, SeriesStyle>,
    pub base: SeriesStyle,
    /// Look up missing paints, strokes and shapes in the drawing supplier
    pub auto_populate: bool,
    pub item_label_font: FontSpec,
    pub item_label_paint: ColorOrGradient,
}

impl Default for SeriesStyles {
    fn default() -> Self {
        Self {
            series: BTreeMap::new(),
            base: SeriesStyle::default(),
            auto_populate: true,
            item_label_font: FontSpec::new("SansSerif", 10.0, false),
            item_label_paint: ColorOrGradient::Color(colors::BLACK),
        }
    }
}

impl SeriesStyles {
    pub fn series_mut(&mut self, series: usize) -> &mut SeriesStyle {
        self.series.entry(series).or_default()
    }

    pub fn set_series_paint(&mut self, series: usize, paint: ColorOrGradient) {
        self.series_mut(series).paint = Some(paint);
    }

    pub fn set_series_stroke(&mut self, series: usize, stroke: StrokeStyle) {
        self.series_mut(series).stroke = Some(stroke);
    }

    pub fn set_series_shape(&mut self, series: usize, shape: SymbolShape) {
        self.series_mut(series).shape = Some(shape);
    }

    pub fn set_series_visible(&mut self, series: usize, visible: bool) {
        self.series_mut(series).visible = Some(visible);
    }

    fn lookup<T: Clone>(&self, series: usize, get: impl Fn(&SeriesStyle) -> Option<T>) -> Option<T> {
        self.series
            .get(&series)
            .and_then(&get)
            .or_else(|| get(&self.base))
    }

    pub fn paint(&self, series: usize, ctx: &StyleContext) -> ColorOrGradient {
        self.lookup(series, |s| s.paint.clone())
            .or_else(|| self.auto_populate.then(|| ctx.supplier.paint(ctx.index(series))))
            .unwrap_or(ColorOrGradient::Color(colors::BLUE))
    }

    pub fn outline_paint(&self, series: usize, ctx: &StyleContext) -> ColorOrGradient {
        self.lookup(series, |s| s.outline_paint.clone())
            .or_else(|| {
                self.auto_populate
                    .then(|| ctx.supplier.outline_paint(ctx.index(series)))
            })
            .unwrap_or(ColorOrGradient::Color(colors::GRAY))
    }

    pub fn stroke(&self, series: usize, ctx: &StyleContext) -> StrokeStyle {
        self.lookup(series, |s| s.stroke.clone())
            .or_else(|| self.auto_populate.then(|| ctx.supplier.stroke(ctx.index(series))))
            .unwrap_or_default()
    }

    pub fn outline_stroke(&self, series: usize, ctx: &StyleContext) -> StrokeStyle {
        self.lookup(series, |s| s.outline_stroke.clone())
            .or_else(|| {
                self.auto_populate
                    .then(|| ctx.supplier.outline_stroke(ctx.index(series)))
            })
            .unwrap_or_default()
    }

    pub fn shape(&self, series: usize, ctx: &StyleContext) -> SymbolShape {
        self.lookup(series, |s| s.shape)
            .or_else(|| self.auto_populate.then(|| ctx.supplier.shape(ctx.index(series))))
            .unwrap_or_default()
    }

    pub fn is_visible(&self, series: usize) -> bool {
        self.lookup(series, |s| s.visible).unwrap_or(true)
    }

    pub fn is_visible_in_legend(&self, series: usize) -> bool {
        self.is_visible(series) && self.lookup(series, |s| s.visible_in_legend).unwrap_or(true)
    }

    pub fn item_labels_visible(&self, series: usize) -> bool {
        self.lookup(series, |s| s.item_labels_visible).unwrap_or(false)
    }

    /// Series line flag, falling back to the renderer default
    pub fn lines_visible(&self, series: usize, default: bool) -> bool {
        self.lookup(series, |s| s.lines_visible).unwrap_or(default)
    }

    pub fn shapes_visible(&self, series: usize, default: bool) -> bool {
        self.lookup(series, |s| s.shapes_visible).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_order() {
        let supplier = DrawingSupplier::default();
        let ctx = StyleContext::new(&supplier);
        let mut styles = SeriesStyles::default();
        assert_eq!(styles.paint(1, &ctx), supplier.paint(1));

        styles.base.paint = Some(ColorOrGradient::Color(colors::GREEN));
        styles.set_series_paint(1, ColorOrGradient::Color(colors::RED));
        assert_eq!(styles.paint(0, &ctx), ColorOrGradient::Color(colors::GREEN));
        assert_eq!(styles.paint(1, &ctx), ColorOrGradient::Color(colors::RED));
    }

    #[test]
    fn test_series_offset_and_auto_populate() {
        let supplier = DrawingSupplier::default();
        let ctx = StyleContext {
            supplier: &supplier,
            series_offset: 2,
        };
        let mut styles = SeriesStyles::default();
        assert_eq!(styles.shape(0, &ctx), supplier.shape(2));

        styles.auto_populate = false;
        assert_eq!(styles.paint(0, &ctx), ColorOrGradient::Color(colors::BLUE));
        assert_eq!(styles.shape(0, &ctx), SymbolShape::Square);
    }

    #[test]
    fn test_visibility() {
        let mut styles = SeriesStyles::default();
        assert!(styles.is_visible(3));
        styles.set_series_visible(3, false);
        assert!(!styles.is_visible(3));
        assert!(!styles.is_visible_in_legend(3));
        assert!(!styles.item_labels_visible(0));
        assert!(styles.lines_visible(0, true));
    }

    #[test]
    fn test_serde_integer_keys() {
        let mut styles = SeriesStyles::default();
        styles.set_series_shape(2, SymbolShape::Diamond);
        let json = serde_json::to_string(&styles).unwrap();
        let back: SeriesStyles = serde_json::from_str(&json).unwrap();
        assert_eq!(back, styles);
    }
}
