//! Standalone HTML page around a rendered SVG chart.
//!
//! The page hosts the chart in `#container` and carries a small inline
//! script driving the `#tooltip` element: shown with the cell's year on
//! pointer enter, moved with the pointer, hidden on pointer leave.

use std::fs;
use std::path::Path;

use tracing::info;

use super::svg::{escape_xml, SvgEncoder};
use crate::error::Result;

const STYLE: &str = r"
body { font-family: sans-serif; margin: 0; padding: 1em; }
#container { max-width: 1200px; margin: 0 auto; }
#tooltip { position: absolute; z-index: 10; visibility: hidden; pointer-events: none;
  background: rgba(0, 0, 0, 0.8); color: #fff; padding: 4px 8px; border-radius: 3px; font-size: 12px; }
#error { max-width: 40em; margin: 4em auto; padding: 1em; border: 1px solid #d53e4f;
  background: #fdecea; color: #7a1f2b; }
";

const TOOLTIP_SCRIPT: &str = r"
(function () {
  var tooltip = document.getElementById('tooltip');
  document.querySelectorAll('#container .cell').forEach(function (cell) {
    cell.addEventListener('mouseover', function () {
      var year = cell.getAttribute('data-year');
      tooltip.textContent = year;
      tooltip.setAttribute('data-year', year);
      tooltip.style.visibility = 'visible';
    });
    cell.addEventListener('mousemove', function (event) {
      tooltip.style.top = (event.pageY - 10) + 'px';
      tooltip.style.left = (event.pageX + 10) + 'px';
    });
    cell.addEventListener('mouseout', function () {
      tooltip.style.visibility = 'hidden';
    });
  });
})();
";

/// HTML page exporter.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    title: String,
    body: String,
}

impl HtmlExporter {
    /// Page embedding `svg` with the hover tooltip.
    #[must_use]
    pub fn new(title: &str, svg: &SvgEncoder) -> Self {
        let body = format!(
            "<div id=\"container\">\n{}</div>\n<div id=\"tooltip\"></div>\n<script>{TOOLTIP_SCRIPT}</script>\n",
            svg.render()
        );
        Self { title: title.to_string(), body }
    }

    /// Page showing a visible diagnostic instead of a chart.
    #[must_use]
    pub fn error_page(title: &str, message: &str) -> Self {
        let body = format!(
            "<div id=\"error\" role=\"alert\">\n<h1>Could not render chart</h1>\n<p>{}</p>\n</div>\n",
            escape_xml(message)
        );
        Self { title: title.to_string(), body }
    }

    /// Render the full document.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            escape_xml(&self.title),
            self.body
        )
    }

    /// Write the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render())?;
        info!(path = %path.display(), "wrote html page");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::output::Attributes;

    #[test]
    fn test_page_embeds_svg_and_tooltip() {
        let svg = SvgEncoder::new(10, 10).rect_with(
            0.0,
            0.0,
            3.0,
            23.0,
            Rgba::BLACK,
            Attributes::new().class("cell").data("year", 1900),
        );
        let html = HtmlExporter::new("Chart", &svg).render();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Chart</title>"));
        assert!(html.contains(r#"<div id="container">"#));
        assert!(html.contains(r#"<div id="tooltip"></div>"#));
        assert!(html.contains("<svg"));
        assert!(html.contains("data-year=\"1900\""));
        assert!(html.contains("mouseover"));
        assert!(html.contains("mouseout"));
    }

    #[test]
    fn test_error_page_is_visible_and_escaped() {
        let html = HtmlExporter::error_page("Chart", "HTTP 404 <gone>").render();
        assert!(html.contains(r#"<div id="error" role="alert">"#));
        assert!(html.contains("HTTP 404 &lt;gone&gt;"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.html");
        HtmlExporter::error_page("t", "m").write_to_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("</html>"));
    }
}
