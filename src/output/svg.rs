//! SVG output encoder.
//!
//! Vector output with identifying attributes (`id`, `class`, `data-*`) on
//! every mark, so the chart can be styled, scripted and inspected after
//! rendering.

use crate::color::Rgba;
use crate::error::Result;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG encoder for vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// Scale to the container instead of a fixed pixel size
    responsive: bool,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// Extra attributes carried by an element, rendered in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// No attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.set("id", id)
    }

    /// Set the `class` attribute.
    #[must_use]
    pub fn class(self, class: &str) -> Self {
        self.set("class", class)
    }

    /// Set a `transform="translate(x,y)"` attribute.
    #[must_use]
    pub fn translate(self, x: f64, y: f64) -> Self {
        self.set("transform", format!("translate({x},{y})"))
    }

    /// Set a `data-<name>` attribute.
    #[must_use]
    pub fn data(self, name: &str, value: impl ToString) -> Self {
        self.set(&format!("data-{name}"), value)
    }

    /// Set an arbitrary attribute.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl ToString) -> Self {
        self.0.push((name.to_string(), value.to_string()));
        self
    }

    /// Value of the first attribute named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    fn render(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!(r#" {k}="{}""#, escape_xml(v)))
            .collect()
    }
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Rgba,
        attrs: Attributes,
    },
    /// Line
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Rgba,
        stroke_width: f64,
    },
    /// Path (SVG path data)
    Path {
        d: String,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f64,
        attrs: Attributes,
    },
    /// Text
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        fill: Rgba,
        anchor: TextAnchor,
        attrs: Attributes,
    },
    /// Group of child elements
    Group {
        attrs: Attributes,
        children: Vec<SvgElement>,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 400)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            responsive: false,
            elements: Vec::new(),
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Drop the fixed width/height and let the view box scale the drawing
    /// into its container (`preserveAspectRatio="xMinYMin meet"`).
    #[must_use]
    pub fn responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    /// Add a rectangle carrying extra attributes.
    #[must_use]
    pub fn rect_with(
        mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Rgba,
        attrs: Attributes,
    ) -> Self {
        self.elements.push(SvgElement::Rect { x, y, width, height, fill, attrs });
        self
    }

    /// Add a group of elements.
    #[must_use]
    pub fn group(mut self, attrs: Attributes, children: Vec<SvgElement>) -> Self {
        self.elements.push(SvgElement::Group { attrs, children });
        self
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096 + self.elements.len() * 128);

        // SVG header
        if self.responsive {
            let _ = writeln!(
                svg,
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" preserveAspectRatio="xMinYMin meet">"#,
                self.width, self.height
            );
        } else {
            let _ = writeln!(
                svg,
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
                self.width, self.height, self.width, self.height
            );
        }

        // Background
        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                bg.to_css()
            );
        }

        // Elements
        for element in &self.elements {
            write_element(&mut svg, element, 1);
        }

        // Close SVG
        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Escape XML special characters in text content and attribute values.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn stroke_attr(stroke: Option<Rgba>, stroke_width: f64) -> String {
    stroke
        .map(|s| format!(r#" stroke="{}" stroke-width="{stroke_width}""#, s.to_css()))
        .unwrap_or_default()
}

/// Append an element (and its children) at the given nesting depth.
fn write_element(out: &mut String, element: &SvgElement, depth: usize) {
    let indent = "  ".repeat(depth);
    match element {
        SvgElement::Rect { x, y, width, height, fill, attrs } => {
            let _ = writeln!(
                out,
                r#"{indent}<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{}/>"#,
                fill.to_css(),
                attrs.render()
            );
        }
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => {
            let _ = writeln!(
                out,
                r#"{indent}<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                stroke.to_css()
            );
        }
        SvgElement::Path { d, fill, stroke, stroke_width, attrs } => {
            let fill_attr = fill.map(Rgba::to_css).unwrap_or_else(|| "none".to_string());
            let _ = writeln!(
                out,
                r#"{indent}<path d="{d}" fill="{fill_attr}"{}{}/>"#,
                stroke_attr(*stroke, *stroke_width),
                attrs.render()
            );
        }
        SvgElement::Text { x, y, text, font_size, fill, anchor, attrs } => {
            let _ = writeln!(
                out,
                r#"{indent}<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{}" font-family="sans-serif"{}>{}</text>"#,
                fill.to_css(),
                anchor.as_str(),
                attrs.render(),
                escape_xml(text)
            );
        }
        SvgElement::Group { attrs, children } => {
            let _ = writeln!(out, "{indent}<g{}>", attrs.render());
            for child in children {
                write_element(out, child, depth + 1);
            }
            let _ = writeln!(out, "{indent}</g>");
        }
    }
}
