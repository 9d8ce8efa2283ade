//! Output encoders (SVG, HTML).

mod html;
mod svg;

pub use html::HtmlExporter;
pub use svg::{escape_xml, Attributes, SvgElement, SvgEncoder, TextAnchor};

use serde::{Deserialize, Serialize};

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bare SVG document.
    Svg,
    /// HTML page with the SVG and a hover tooltip.
    #[default]
    Html,
}

impl OutputFormat {
    /// Conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "html" | "htm" => Ok(Self::Html),
            other => Err(format!("unknown output format '{other}' (expected svg or html)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("svg".parse::<OutputFormat>(), Ok(OutputFormat::Svg));
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert!("png".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Svg.extension(), "svg");
        assert_eq!(OutputFormat::default().extension(), "html");
    }
}
