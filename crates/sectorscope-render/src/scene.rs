//! Drawing description produced by the renderers.
//!
//! A [`Scene`] is plain data: it can be serialized as JSON for another
//! front end or written out as a standalone SVG document.

use std::fmt::Write as _;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    const fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// Children drawn relative to `(x, y)`.
    Group {
        x: f64,
        y: f64,
        children: Vec<Element>,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// Open polyline through `points`.
    Path {
        points: Vec<(f64, f64)>,
        stroke: String,
        stroke_width: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        font_size: f64,
        fill: String,
        anchor: Anchor,
    },
}

impl Element {
    pub fn group(x: f64, y: f64, children: Vec<Element>) -> Self {
        Self::Group { x, y, children }
    }

    pub fn text(x: f64, y: f64, content: impl Into<String>, font_size: f64, anchor: Anchor) -> Self {
        Self::Text {
            x,
            y,
            content: content.into(),
            font_size,
            fill: String::from("#000"),
            anchor,
        }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: String::from("currentColor"),
        }
    }

    fn write_svg(&self, out: &mut String) -> std::fmt::Result {
        match self {
            Self::Group { x, y, children } => {
                writeln!(out, r#"<g transform="translate({x},{y})">"#)?;
                for child in children {
                    child.write_svg(out)?;
                }
                writeln!(out, "</g>")
            }
            Self::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
                title,
            } => {
                write!(
                    out,
                    r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}""#,
                    escape(fill)
                )?;
                if let Some(stroke) = stroke {
                    write!(out, r#" stroke="{}""#, escape(stroke))?;
                }
                close_with_title(out, "rect", title.as_deref())
            }
            Self::Path {
                points,
                stroke,
                stroke_width,
            } => {
                let mut d = String::new();
                for (i, (x, y)) in points.iter().enumerate() {
                    let command = if i == 0 { 'M' } else { 'L' };
                    write!(d, "{command}{x},{y}")?;
                }
                writeln!(
                    out,
                    r#"<path d="{d}" fill="none" stroke="{}" stroke-width="{stroke_width}"/>"#,
                    escape(stroke)
                )
            }
            Self::Circle {
                cx,
                cy,
                r,
                fill,
                title,
            } => {
                write!(
                    out,
                    r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}""#,
                    escape(fill)
                )?;
                close_with_title(out, "circle", title.as_deref())
            }
            Self::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
            } => writeln!(
                out,
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}"/>"#,
                escape(stroke)
            ),
            Self::Text {
                x,
                y,
                content,
                font_size,
                fill,
                anchor,
            } => writeln!(
                out,
                r#"<text x="{x}" y="{y}" font-size="{font_size}px" fill="{}" text-anchor="{}" dominant-baseline="middle">{}</text>"#,
                escape(fill),
                anchor.as_svg(),
                escape(content)
            ),
        }
    }
}

/// Complete drawing of one chart view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Depth-first iterator over every element, groups included.
    pub fn walk(&self) -> Vec<&Element> {
        fn visit<'a>(elements: &'a [Element], out: &mut Vec<&'a Element>) {
            for element in elements {
                out.push(element);
                if let Element::Group { children, .. } = element {
                    visit(children, out);
                }
            }
        }

        let mut out = Vec::new();
        visit(&self.elements, &mut out);
        out
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) -> std::fmt::Result {
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = self.width,
            h = self.height
        )?;
        for element in &self.elements {
            element.write_svg(out)?;
        }
        writeln!(out, "</svg>")
    }
}

fn close_with_title(out: &mut String, tag: &str, title: Option<&str>) -> std::fmt::Result {
    match title {
        Some(title) => writeln!(out, "><title>{}</title></{tag}>", escape(title)),
        None => writeln!(out, "/>"),
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scene_is_bare_svg() {
        let svg = Scene::empty(100.0, 50.0).to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="100""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn escapes_text_and_titles() {
        let scene = Scene {
            width: 10.0,
            height: 10.0,
            elements: vec![
                Element::text(0.0, 0.0, "AT&T <Inc>", 12.0, Anchor::Start),
                Element::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: 1.0,
                    height: 1.0,
                    fill: String::from("#fff"),
                    stroke: None,
                    title: Some(String::from("a \"quoted\" tip")),
                },
            ],
        };

        let svg = scene.to_svg();
        assert!(svg.contains("AT&amp;T &lt;Inc&gt;"));
        assert!(svg.contains("<title>a &quot;quoted&quot; tip</title></rect>"));
    }

    #[test]
    fn paths_use_move_then_line_commands() {
        let scene = Scene {
            width: 10.0,
            height: 10.0,
            elements: vec![Element::Path {
                points: vec![(0.0, 1.0), (2.5, 3.0)],
                stroke: String::from("#4e79a7"),
                stroke_width: 2.0,
            }],
        };

        assert!(scene.to_svg().contains(r#"d="M0,1L2.5,3""#));
    }

    #[test]
    fn walk_descends_into_groups() {
        let scene = Scene {
            width: 1.0,
            height: 1.0,
            elements: vec![Element::group(
                0.0,
                0.0,
                vec![Element::line(0.0, 0.0, 1.0, 1.0)],
            )],
        };
        assert_eq!(scene.walk().len(), 2);
    }

    #[test]
    fn serializes_as_tagged_elements() {
        let value = serde_json::to_value(Element::line(0.0, 0.0, 1.0, 0.0)).expect("serializable");
        assert_eq!(value["kind"], "line");
    }
}
