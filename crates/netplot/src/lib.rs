#![forbid(unsafe_code)]

//! `netplot` draws donation networks from two CSV tables (nodes and edges) without a browser.
//!
//! The tables are loaded and derived once ([`load_and_prepare`]); the prepared graph can then
//! be written as a standalone interactive HTML page, a static SVG, or column-oriented JSON.
//!
//! # Features
//!
//! - `render` (default): document writers (`netplot::render`)

pub use netplot_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use netplot_render::model::GraphLayout;
    pub use netplot_render::Error as RenderError;
    pub use netplot_render::{
        HtmlRenderOptions, HtmlRenderer, JsonRenderer, RenderFormat, Renderer, SvgRenderOptions,
        SvgRenderer, UnknownFormat, layout_graph, render_html, render_json, render_svg,
    };

    use netplot_core::{PlotConfig, PreparedGraph};
    use std::path::{Path, PathBuf};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Prepare(#[from] netplot_core::Error),
        #[error(transparent)]
        Render(#[from] netplot_render::Error),
        #[error("failed to write {}: {source}", path.display())]
        Write {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several plots can
    /// share one page without their marker ids colliding.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "n-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "n-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "n" {
            return "n-untitled".to_string();
        }
        out.to_string()
    }

    /// Bundles a config and an output format for one-call rendering.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        pub config: PlotConfig,
        pub format: RenderFormat,
        pub html: HtmlRenderOptions,
        pub svg: SvgRenderOptions,
        pub pretty_json: bool,
    }

    impl HeadlessRenderer {
        pub fn new(config: PlotConfig, format: RenderFormat) -> Self {
            Self {
                config,
                format,
                ..Self::default()
            }
        }

        pub fn with_diagram_id(mut self, diagram_id: &str) -> Self {
            let id = sanitize_svg_id(diagram_id);
            self.html.svg.diagram_id = id.clone();
            self.svg.diagram_id = id;
            self
        }

        /// Loads both tables (fetching remote ones) and derives the prepared graph.
        pub fn prepare(&self) -> Result<PreparedGraph> {
            Ok(netplot_core::load_and_prepare(&self.config)?)
        }

        fn renderer(&self) -> Box<dyn Renderer + '_> {
            match self.format {
                RenderFormat::Html => Box::new(HtmlRenderer {
                    options: self.html.clone(),
                }),
                RenderFormat::Svg => Box::new(SvgRenderer {
                    options: self.svg.clone(),
                }),
                RenderFormat::Json => Box::new(JsonRenderer {
                    pretty: self.pretty_json,
                }),
            }
        }

        /// Renders an already prepared graph in the configured format.
        pub fn render_graph(&self, graph: &PreparedGraph) -> Result<String> {
            Ok(self.renderer().render(graph, &self.config)?)
        }

        pub fn render(&self) -> Result<String> {
            let graph = self.prepare()?;
            self.render_graph(&graph)
        }

        /// Prepares, renders and writes the document to `path`.
        pub fn render_to_path(&self, path: &Path) -> Result<()> {
            let doc = self.render()?;
            std::fs::write(path, doc).map_err(|source| HeadlessError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
