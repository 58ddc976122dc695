#![forbid(unsafe_code)]

//! Turns a [`PreparedGraph`] into a document: standalone interactive HTML, static SVG, or the
//! prepared tables as JSON.

pub mod html;
pub mod json;
pub mod layout;
pub mod model;
pub mod svg;

use netplot_core::{PlotConfig, PreparedGraph};
use std::fmt;
use std::str::FromStr;

pub use html::{HtmlRenderOptions, render_html};
pub use json::render_json;
pub use layout::layout_graph;
pub use model::GraphLayout;
pub use svg::{SvgRenderOptions, render_svg};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid canvas: {message}")]
    InvalidCanvas { message: String },
    #[error("invalid prepared graph: {message}")]
    InvalidModel { message: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A document writer over prepared data.
pub trait Renderer {
    fn render(&self, graph: &PreparedGraph, config: &PlotConfig) -> Result<String>;

    /// File extension of the produced document, without the dot.
    fn extension(&self) -> &'static str;
}

#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    pub options: HtmlRenderOptions,
}

impl Renderer for HtmlRenderer {
    fn render(&self, graph: &PreparedGraph, config: &PlotConfig) -> Result<String> {
        let layout = layout_graph(graph, config)?;
        render_html(&layout, &self.options)
    }

    fn extension(&self) -> &'static str {
        "html"
    }
}

#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    pub options: SvgRenderOptions,
}

impl Renderer for SvgRenderer {
    fn render(&self, graph: &PreparedGraph, config: &PlotConfig) -> Result<String> {
        let layout = layout_graph(graph, config)?;
        Ok(render_svg(&layout, &self.options))
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Renderer for JsonRenderer {
    fn render(&self, graph: &PreparedGraph, _config: &PlotConfig) -> Result<String> {
        let value = render_json(graph)?;
        let mut out = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        out.push('\n');
        Ok(out)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderFormat {
    #[default]
    Html,
    Svg,
    Json,
}

impl RenderFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }

    /// A renderer with default options for this format.
    pub fn renderer(self) -> Box<dyn Renderer + Send + Sync> {
        match self {
            Self::Html => Box::new(HtmlRenderer::default()),
            Self::Svg => Box::new(SvgRenderer::default()),
            Self::Json => Box::new(JsonRenderer::default()),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format `{0}` (expected html, svg or json)")]
pub struct UnknownFormat(pub String);

impl FromStr for RenderFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "svg" => Ok(Self::Svg),
            "json" => Ok(Self::Json),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}
