//! Standalone interactive document: the SVG plus an inline script for zoom, pan, hover and
//! click selection.

use crate::Result;
use crate::model::{GraphLayout, HighlightStyle, TooltipRow};
use crate::svg::{SvgRenderOptions, escape_attr, escape_text, fmt, render_svg};
use serde::Serialize;
use std::fmt::Write as _;

const PANEL_CSS: &str = include_str!("../assets/panel.css");
const PANEL_JS: &str = include_str!("../assets/panel.js");

#[derive(Debug, Clone)]
pub struct HtmlRenderOptions {
    pub svg: SvgRenderOptions,
    /// Reset / save buttons in the top-right corner.
    pub include_toolbar: bool,
    /// Base name of the file offered by the save button.
    pub file_stem: String,
}

impl Default for HtmlRenderOptions {
    fn default() -> Self {
        Self {
            // The panel draws its own tooltip box; native `<title>` popups would double up.
            svg: SvgRenderOptions {
                include_tooltips: false,
                ..SvgRenderOptions::default()
            },
            include_toolbar: true,
            file_stem: "netplot".to_string(),
        }
    }
}

#[derive(Serialize)]
struct PanelNode<'a> {
    fill: &'a str,
    linked_edges: &'a [usize],
    tooltip: &'a [TooltipRow],
}

#[derive(Serialize)]
struct PanelEdge<'a> {
    stroke: &'a str,
    tooltip: &'a [TooltipRow],
}

/// What the inline script reads from the `-data` block.
#[derive(Serialize)]
struct PanelData<'a> {
    #[serde(rename = "viewBox")]
    view_box: [f64; 4],
    nodes: Vec<PanelNode<'a>>,
    edges: Vec<PanelEdge<'a>>,
    highlight: &'a HighlightStyle,
    edge_width: f64,
    edge_alpha: f64,
    file_stem: &'a str,
}

fn panel_data<'a>(layout: &'a GraphLayout, file_stem: &'a str) -> PanelData<'a> {
    PanelData {
        view_box: [
            0.0,
            0.0,
            layout.bounds.width().max(1.0),
            layout.bounds.height().max(1.0),
        ],
        nodes: layout
            .nodes
            .iter()
            .map(|n| PanelNode {
                fill: &n.fill,
                linked_edges: &n.linked_edges,
                tooltip: &n.tooltip,
            })
            .collect(),
        edges: layout
            .edges
            .iter()
            .map(|e| PanelEdge {
                stroke: &e.stroke,
                tooltip: &e.tooltip,
            })
            .collect(),
        highlight: &layout.highlight,
        edge_width: layout.edge_width,
        edge_alpha: layout.edge_alpha,
        file_stem,
    }
}

pub fn render_html(layout: &GraphLayout, options: &HtmlRenderOptions) -> Result<String> {
    let id = escape_attr(&options.svg.diagram_id);
    let data = serde_json::to_string(&panel_data(layout, &options.file_stem))?;
    // A literal `</script>` inside a tooltip value must not end the data block.
    let data = data.replace("</", "<\\/");

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(&mut out, "<title>{}</title>", escape_text(&layout.title));
    let _ = writeln!(&mut out, "<style>\n{PANEL_CSS}</style>");
    out.push_str("</head>\n<body>\n");

    let root_class = if layout.stretch {
        "netplot-root stretch"
    } else {
        "netplot-root"
    };
    if layout.stretch {
        let _ = writeln!(&mut out, r#"<div id="{id}-root" class="{root_class}">"#);
    } else {
        let _ = writeln!(
            &mut out,
            r#"<div id="{id}-root" class="{root_class}" style="width:{}px;height:{}px">"#,
            fmt(layout.width),
            fmt(layout.height)
        );
    }
    if options.include_toolbar {
        out.push_str(concat!(
            r#"<div class="netplot-toolbar">"#,
            r#"<button type="button" data-action="reset" title="Reset view">Reset</button>"#,
            r#"<button type="button" data-action="save" title="Download SVG">Save</button>"#,
            "</div>\n"
        ));
    }
    out.push_str(&render_svg(layout, &options.svg));
    out.push('\n');
    out.push_str("<div class=\"netplot-tooltip\" hidden></div>\n</div>\n");

    let _ = writeln!(
        &mut out,
        r#"<script type="application/json" id="{id}-data">{data}</script>"#
    );
    let _ = writeln!(&mut out, "<script data-plot=\"{id}\">\n{PANEL_JS}</script>");
    out.push_str("</body>\n</html>\n");

    tracing::debug!(bytes = out.len(), "rendered html document");
    Ok(out)
}
