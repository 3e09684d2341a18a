//! Collects item shapes into column-oriented marks, one mark per name.

use chartwell_common::layout::Bounds;
use chartwell_common::types::{ColorOrGradient, FontSpec, StrokeCap, StrokeStyle, SymbolShape};
use chartwell_common::value::ScalarOrArray;
use chartwell_scenegraph::marks::mark::SceneMark;
use chartwell_scenegraph::marks::path::ScenePathMark;
use chartwell_scenegraph::marks::rect::SceneRectMark;
use chartwell_scenegraph::marks::rule::SceneRuleMark;
use chartwell_scenegraph::marks::symbol::SceneSymbolMark;
use chartwell_scenegraph::marks::text::{SceneTextMark, TextAlign, TextBaseline};
use indexmap::IndexMap;
use lyon_path::Path;

#[derive(Debug, Clone, Default)]
struct RectBatch {
    bounds: Vec<Bounds>,
    fill: Vec<ColorOrGradient>,
    stroke: Vec<ColorOrGradient>,
    stroke_width: Vec<f32>,
}

#[derive(Debug, Clone, Default)]
struct SymbolBatch {
    shape: Vec<SymbolShape>,
    x: Vec<f32>,
    y: Vec<f32>,
    size: Vec<f32>,
    fill: Vec<ColorOrGradient>,
    stroke: Vec<ColorOrGradient>,
    stroke_width: Option<f32>,
}

#[derive(Debug, Clone, Default)]
struct RuleBatch {
    x0: Vec<f32>,
    y0: Vec<f32>,
    x1: Vec<f32>,
    y1: Vec<f32>,
    stroke: Vec<ColorOrGradient>,
    stroke_width: Vec<f32>,
    dash: Option<Vec<f32>>,
    cap: StrokeCap,
}

#[derive(Debug, Clone, Default)]
struct PathBatch {
    paths: Vec<Path>,
    fill: Vec<ColorOrGradient>,
    stroke: Vec<ColorOrGradient>,
    style: StrokeStyle,
}

#[derive(Debug, Clone, Default)]
struct TextBatch {
    text: Vec<String>,
    x: Vec<f32>,
    y: Vec<f32>,
    align: Vec<TextAlign>,
    baseline: Vec<TextBaseline>,
    color: Vec<ColorOrGradient>,
    font: FontSpec,
}

#[derive(Debug, Clone)]
enum Batch {
    Rect(RectBatch),
    Symbol(SymbolBatch),
    Rule(RuleBatch),
    Path(PathBatch),
    Text(TextBatch),
    Marks(Vec<SceneMark>),
}

/// Text placed by a renderer for an item label
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub position: [f32; 2],
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub color: ColorOrGradient,
}

/// Marks accumulated while renderers draw items.
///
/// Shapes added under the same name become one mark with a value per item.
/// Marks come out in the order their names were first used.
#[derive(Debug, Clone, Default)]
pub struct MarkBuffer {
    batches: IndexMap<String, Batch>,
}

impl MarkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn rect(
        &mut self,
        name: &str,
        bounds: Bounds,
        fill: ColorOrGradient,
        stroke: Option<(ColorOrGradient, f32)>,
    ) {
        let entry = self
            .batches
            .entry(name.to_string())
            .or_insert_with(|| Batch::Rect(RectBatch::default()));
        if let Batch::Rect(batch) = entry {
            let (stroke, width) = stroke.unwrap_or((ColorOrGradient::transparent(), 0.0));
            batch.bounds.push(bounds);
            batch.fill.push(fill);
            batch.stroke.push(stroke);
            batch.stroke_width.push(width);
        }
    }

    pub fn symbol(
        &mut self,
        name: &str,
        shape: SymbolShape,
        position: [f32; 2],
        size: f32,
        fill: ColorOrGradient,
        stroke: Option<(ColorOrGradient, f32)>,
    ) {
        let entry = self
            .batches
            .entry(name.to_string())
            .or_insert_with(|| Batch::Symbol(SymbolBatch::default()));
        if let Batch::Symbol(batch) = entry {
            batch.shape.push(shape);
            batch.x.push(position[0]);
            batch.y.push(position[1]);
            batch.size.push(size);
            batch.fill.push(fill);
            match stroke {
                Some((paint, width)) => {
                    batch.stroke.push(paint);
                    batch.stroke_width = Some(width);
                }
                None => batch.stroke.push(ColorOrGradient::transparent()),
            }
        }
    }

    pub fn rule(
        &mut self,
        name: &str,
        from: [f32; 2],
        to: [f32; 2],
        paint: ColorOrGradient,
        style: &StrokeStyle,
    ) {
        let entry = self.batches.entry(name.to_string()).or_insert_with(|| {
            Batch::Rule(RuleBatch {
                dash: style.dash.clone(),
                cap: style.cap,
                ..Default::default()
            })
        });
        if let Batch::Rule(batch) = entry {
            batch.x0.push(from[0]);
            batch.y0.push(from[1]);
            batch.x1.push(to[0]);
            batch.y1.push(to[1]);
            batch.stroke.push(paint);
            batch.stroke_width.push(style.width);
        }
    }

    pub fn path(
        &mut self,
        name: &str,
        path: Path,
        fill: ColorOrGradient,
        stroke: Option<(ColorOrGradient, StrokeStyle)>,
    ) {
        let (stroke, style) = stroke.unwrap_or((ColorOrGradient::transparent(), StrokeStyle::new(0.0)));
        let entry = self.batches.entry(name.to_string()).or_insert_with(|| {
            Batch::Path(PathBatch {
                style: style.clone(),
                ..Default::default()
            })
        });
        if let Batch::Path(batch) = entry {
            batch.paths.push(path);
            batch.fill.push(fill);
            batch.stroke.push(stroke);
        }
    }

    pub fn text(&mut self, name: &str, item: TextItem, font: &FontSpec) {
        let entry = self.batches.entry(name.to_string()).or_insert_with(|| {
            Batch::Text(TextBatch {
                font: font.clone(),
                ..Default::default()
            })
        });
        if let Batch::Text(batch) = entry {
            batch.text.push(item.text);
            batch.x.push(item.position[0]);
            batch.y.push(item.position[1]);
            batch.align.push(item.align);
            batch.baseline.push(item.baseline);
            batch.color.push(item.color);
        }
    }

    /// Adds a complete mark, kept after earlier marks with the same name
    pub fn mark(&mut self, mark: impl Into<SceneMark>) {
        let mark = mark.into();
        let entry = self
            .batches
            .entry(mark.name().to_string())
            .or_insert_with(|| Batch::Marks(Vec::new()));
        if let Batch::Marks(marks) = entry {
            marks.push(mark);
        }
    }

    pub fn into_marks(self) -> Vec<SceneMark> {
        let mut marks = Vec::with_capacity(self.batches.len());
        for (name, batch) in self.batches {
            match batch {
                Batch::Rect(b) => marks.push(
                    SceneRectMark {
                        name,
                        len: b.bounds.len() as u32,
                        x: b.bounds.iter().map(|r| r.x).collect::<Vec<_>>().into(),
                        y: b.bounds.iter().map(|r| r.y).collect::<Vec<_>>().into(),
                        width: b.bounds.iter().map(|r| r.width).collect::<Vec<_>>().into(),
                        height: b.bounds.iter().map(|r| r.height).collect::<Vec<_>>().into(),
                        fill: b.fill.into(),
                        stroke: b.stroke.into(),
                        stroke_width: b.stroke_width.into(),
                        ..Default::default()
                    }
                    .into(),
                ),
                Batch::Symbol(b) => marks.push(
                    SceneSymbolMark {
                        name,
                        len: b.x.len() as u32,
                        shape: b.shape.into(),
                        x: b.x.into(),
                        y: b.y.into(),
                        size: b.size.into(),
                        fill: b.fill.into(),
                        stroke: b.stroke.into(),
                        stroke_width: b.stroke_width,
                        ..Default::default()
                    }
                    .into(),
                ),
                Batch::Rule(b) => marks.push(
                    SceneRuleMark {
                        name,
                        len: b.x0.len() as u32,
                        stroke_dash: b.dash,
                        x0: b.x0.into(),
                        y0: b.y0.into(),
                        x1: b.x1.into(),
                        y1: b.y1.into(),
                        stroke: b.stroke.into(),
                        stroke_width: b.stroke_width.into(),
                        stroke_cap: b.cap,
                        ..Default::default()
                    }
                    .into(),
                ),
                Batch::Path(b) => marks.push(
                    ScenePathMark::from_paths(
                        &name,
                        b.paths,
                        ScalarOrArray::new_array(b.fill),
                        ScalarOrArray::new_array(b.stroke),
                        b.style,
                    )
                    .into(),
                ),
                Batch::Text(b) => marks.push(
                    SceneTextMark {
                        name,
                        len: b.text.len() as u32,
                        text: b.text.into(),
                        x: b.x.into(),
                        y: b.y.into(),
                        align: b.align.into(),
                        baseline: b.baseline.into(),
                        color: b.color.into(),
                        font: b.font,
                        ..Default::default()
                    }
                    .into(),
                ),
                Batch::Marks(m) => marks.extend(m),
            }
        }
        marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartwell_common::types::colors;
    use chartwell_scenegraph::marks::line::SceneLineMark;

    #[test]
    fn test_batches_keep_first_use_order() {
        let mut buffer = MarkBuffer::new();
        let red = ColorOrGradient::Color(colors::RED);
        buffer.rect("bars", Bounds::new(0.0, 0.0, 1.0, 1.0), red.clone(), None);
        buffer.mark(SceneLineMark {
            name: "line".to_string(),
            ..Default::default()
        });
        buffer.rect("bars", Bounds::new(2.0, 0.0, 1.0, 1.0), red, None);

        let marks = buffer.into_marks();
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].name(), "bars");
        assert_eq!(marks[0].instance_count(), 2);
        assert_eq!(marks[1].name(), "line");
        for mark in &marks {
            mark.validate().unwrap();
        }
    }
}
