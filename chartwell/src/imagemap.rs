//! HTML image maps for rendered charts.
//!
//! ```
//! use chartwell::entity::{ChartEntity, EntityKind};
//! use chartwell::imagemap::{image_map, ToolTipFragment, UrlFragment};
//! use chartwell::info::ChartRenderingInfo;
//! use chartwell_common::layout::Bounds;
//!
//! let mut info = ChartRenderingInfo::default();
//! info.entities.add(
//!     ChartEntity::rect(Bounds::new(10.0, 20.0, 30.0, 40.0), EntityKind::Plot)
//!         .with_tooltip(Some("a < b".to_string())),
//! );
//! let map = image_map("chart", &info, &ToolTipFragment::Standard, &UrlFragment::Standard);
//! assert_eq!(
//!     map,
//!     "<map id=\"chart\" name=\"chart\">\n\
//!      <area shape=\"rect\" coords=\"10,20,40,60\" title=\"a &lt; b\" alt=\"\" nohref=\"nohref\"/>\n\
//!      </map>"
//! );
//! ```

use itertools::Itertools;
use lyon_path::iterator::PathIterator;
use lyon_path::PathEvent;
use serde::{Deserialize, Serialize};

use crate::entity::ChartEntity;
use crate::info::ChartRenderingInfo;

const FLATTEN_TOLERANCE: f32 = 1.0;

pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '/' => out.push_str("&#x2F;"),
            c => out.push(c),
        }
    }
    out
}

pub fn javascript_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '\'' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// How tooltip text is attached to an `<area>` element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolTipFragment {
    /// `title` attribute
    #[default]
    Standard,
    /// Popups drawn by the OverLIB script
    OverLib,
    /// Popups drawn by the Dynamic Drive script, with a title and style index
    DynamicDrive { title: String, style: usize },
}

impl ToolTipFragment {
    pub fn generate(&self, text: &str) -> String {
        match self {
            ToolTipFragment::Standard => {
                format!(" title=\"{}\" alt=\"\"", html_escape(text))
            }
            ToolTipFragment::OverLib => format!(
                " onMouseOver=\"return overlib('{}');\" onMouseOut=\"return nd();\"",
                javascript_escape(text)
            ),
            ToolTipFragment::DynamicDrive { title, style } => format!(
                " onMouseOver=\"return stm(['{}','{}'],Style[{style}]);\" onMouseOut=\"return htm();\"",
                javascript_escape(title),
                javascript_escape(text)
            ),
        }
    }
}

/// How a URL is attached to an `<area>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlFragment {
    #[default]
    Standard,
}

impl UrlFragment {
    /// URLs from the generators are already escaped
    pub fn generate(&self, url: &str) -> String {
        match self {
            UrlFragment::Standard => format!(" href=\"{url}\""),
        }
    }
}

/// Shape type and `coords` attribute value for an entity
pub fn shape_coords(entity: &ChartEntity) -> (&'static str, String) {
    if let Some(rect) = entity.as_rect() {
        // Origin and size truncate separately, empty rectangles grow to one pixel
        let x0 = rect.min_x() as i64;
        let y0 = rect.min_y() as i64;
        let x1 = (x0 + rect.width.abs() as i64).max(x0 + 1);
        let y1 = (y0 + rect.height.abs() as i64).max(y0 + 1);
        return ("rect", format!("{x0},{y0},{x1},{y1}"));
    }

    let coords = entity
        .area
        .iter()
        .flattened(FLATTEN_TOLERANCE)
        .filter_map(|event| match event {
            PathEvent::Begin { at } => Some(at),
            PathEvent::Line { to, .. } => Some(to),
            _ => None,
        })
        .map(|p| format!("{},{}", p.x as i64, p.y as i64))
        .join(",");
    ("poly", coords)
}

/// `<area>` tag for an entity, or `None` when it has neither tooltip nor URL
pub fn area_tag(
    entity: &ChartEntity,
    tooltips: &ToolTipFragment,
    urls: &UrlFragment,
) -> Option<String> {
    let tooltip = entity.tooltip.as_deref().filter(|t| !t.is_empty());
    let url = entity.url.as_deref().filter(|u| !u.is_empty());
    if tooltip.is_none() && url.is_none() {
        return None;
    }

    let (shape, coords) = shape_coords(entity);
    let mut tag = format!("<area shape=\"{shape}\" coords=\"{coords}\"");
    if let Some(text) = tooltip {
        tag.push_str(&tooltips.generate(text));
    }
    match url {
        Some(url) => tag.push_str(&urls.generate(url)),
        None => tag.push_str(" nohref=\"nohref\""),
    }
    if tooltip.is_none() {
        tag.push_str(" alt=\"\"");
    }
    tag.push_str("/>");
    Some(tag)
}

/// `<map>` element for the entities of a render, topmost entity first
pub fn image_map(
    name: &str,
    info: &ChartRenderingInfo,
    tooltips: &ToolTipFragment,
    urls: &UrlFragment,
) -> String {
    let name = html_escape(name);
    let mut map = format!("<map id=\"{name}\" name=\"{name}\">\n");
    let tags = info
        .entities
        .iter()
        .rev()
        .filter_map(|entity| area_tag(entity, tooltips, urls));
    for tag in tags {
        map.push_str(&tag);
        map.push('\n');
    }
    map.push_str("</map>");
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use chartwell_common::layout::Bounds;
    use chartwell_common::shapes::polygon_path;

    #[test]
    fn test_escapes() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom's & Jerry's/</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom&#39;s &amp; Jerry&#39;s&#x2F;&lt;&#x2F;a&gt;"
        );
        assert_eq!(javascript_escape(r#"it's "\""#), r#"it\'s \"\\\""#);
    }

    #[test]
    fn test_tooltip_fragments() {
        assert_eq!(
            ToolTipFragment::OverLib.generate("it's"),
            " onMouseOver=\"return overlib('it\\'s');\" onMouseOut=\"return nd();\""
        );
        let dd = ToolTipFragment::DynamicDrive {
            title: "Title".to_string(),
            style: 1,
        };
        assert_eq!(
            dd.generate("Text"),
            " onMouseOver=\"return stm(['Title','Text'],Style[1]);\" onMouseOut=\"return htm();\""
        );
    }

    #[test]
    fn test_area_tags() {
        let rect = ChartEntity::rect(Bounds::new(1.4, 2.6, 10.0, 10.0), EntityKind::Plot)
            .with_url(Some("a.html?x=1&amp;y=2".to_string()));
        assert_eq!(
            area_tag(&rect, &ToolTipFragment::Standard, &UrlFragment::Standard).unwrap(),
            "<area shape=\"rect\" coords=\"1,2,11,12\" href=\"a.html?x=1&amp;y=2\" alt=\"\"/>"
        );

        let poly = ChartEntity::from_path(
            polygon_path(&[[0.0, 0.0], [10.5, 0.0], [10.5, 20.9]], true),
            EntityKind::Chart,
        )
        .with_tooltip(Some("tri".to_string()));
        assert_eq!(
            area_tag(&poly, &ToolTipFragment::Standard, &UrlFragment::Standard).unwrap(),
            "<area shape=\"poly\" coords=\"0,0,10,0,10,20\" title=\"tri\" alt=\"\" nohref=\"nohref\"/>"
        );

        let thin = ChartEntity::rect(Bounds::new(10.7, 5.2, 0.6, 9.9), EntityKind::Axis);
        assert_eq!(shape_coords(&thin), ("rect", "10,5,11,14".to_string()));

        let bare = ChartEntity::rect(Bounds::new(0.0, 0.0, 5.0, 5.0), EntityKind::Plot);
        assert!(area_tag(&bare, &ToolTipFragment::Standard, &UrlFragment::Standard).is_none());
    }

    #[test]
    fn test_image_map_reverse_order() {
        let mut info = ChartRenderingInfo::default();
        for (i, label) in ["first", "second"].iter().enumerate() {
            info.entities.add(
                ChartEntity::rect(
                    Bounds::new(i as f32 * 10.0, 0.0, 10.0, 10.0),
                    EntityKind::Plot,
                )
                .with_tooltip(Some(label.to_string())),
            );
        }
        info.entities
            .add(ChartEntity::rect(Bounds::new(0.0, 0.0, 1.0, 1.0), EntityKind::Chart));

        let map = image_map("m\"1", &info, &ToolTipFragment::Standard, &UrlFragment::Standard);
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "<map id=\"m&quot;1\" name=\"m&quot;1\">");
        assert!(lines[1].contains("title=\"second\""));
        assert!(lines[2].contains("title=\"first\""));
        assert_eq!(lines[3], "</map>");
    }
}
