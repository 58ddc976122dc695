use crate::model::{GraphLayout, TooltipRow};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `id`, also the prefix for marker ids.
    pub diagram_id: String,
    /// When true, draw the plot title in the top-left corner.
    pub include_title: bool,
    /// When true, attach `<title>` hover text to every glyph.
    pub include_tooltips: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: "netplot".to_string(),
            include_title: true,
            include_tooltips: true,
        }
    }
}

pub fn render_svg(layout: &GraphLayout, options: &SvgRenderOptions) -> String {
    let id = escape_attr(&options.diagram_id);
    let vb_w = fmt(layout.bounds.width().max(1.0));
    let vb_h = fmt(layout.bounds.height().max(1.0));
    let (width_attr, height_attr) = if layout.stretch {
        ("100%".to_string(), "100%".to_string())
    } else {
        (fmt(layout.width), fmt(layout.height))
    };

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" width="{width_attr}" height="{height_attr}" viewBox="0 0 {vb_w} {vb_h}" preserveAspectRatio="xMidYMid meet" role="graphics-document document" aria-roledescription="network" aria-labelledby="{id}-title">"#
    );
    let _ = write!(
        &mut out,
        r#"<title id="{id}-title">{}</title>"#,
        escape_text(&layout.title)
    );
    let _ = write!(&mut out, "<style>{}</style>", css(&options.diagram_id));

    if layout.directed {
        let _ = write!(
            &mut out,
            r#"<defs><marker id="{id}-arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="6" markerHeight="6" orient="auto-start-reverse"><path d="M0,0L10,5L0,10Z" fill="context-stroke"/></marker></defs>"#
        );
    }

    // Viewport group; the interactive document pans and zooms by rewriting the viewBox.
    out.push_str(r#"<g class="plot">"#);

    out.push_str(r#"<g class="edges">"#);
    for e in &layout.edges {
        let _ = write!(
            &mut out,
            r#"<line class="edge" data-index="{}" data-start="{}" data-end="{}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
            e.index,
            e.start,
            e.end,
            fmt(e.x1),
            fmt(e.y1),
            fmt(e.x2),
            fmt(e.y2),
            escape_attr(&e.stroke),
            fmt(layout.edge_alpha),
            fmt(layout.edge_width),
        );
        if layout.directed {
            let _ = write!(&mut out, r#" marker-end="url(#{id}-arrow)""#);
        }
        push_tooltip(&mut out, "line", &e.tooltip, options.include_tooltips);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for n in &layout.nodes {
        let _ = write!(
            &mut out,
            r#"<circle class="node" data-index="{}" data-id="{}" cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="1""#,
            n.index,
            escape_attr(&n.id),
            fmt(n.x),
            fmt(n.y),
            fmt(n.radius),
            escape_attr(&n.fill),
            escape_attr(&n.stroke),
        );
        push_tooltip(&mut out, "circle", &n.tooltip, options.include_tooltips);
    }
    out.push_str("</g>");
    out.push_str("</g>");

    if options.include_title {
        let _ = write!(
            &mut out,
            r#"<text class="plot-title" x="8" y="18">{}</text>"#,
            escape_text(&layout.title)
        );
    }

    out.push_str("</svg>");
    out
}

fn push_tooltip(out: &mut String, tag: &str, rows: &[TooltipRow], enabled: bool) {
    if !enabled || rows.is_empty() {
        out.push_str("/>");
        return;
    }
    let _ = write!(out, "><title>{}</title></{tag}>", escape_text(&tooltip_text(rows)));
}

/// Rows joined as `Label: value` lines.
pub fn tooltip_text(rows: &[TooltipRow]) -> String {
    rows.iter()
        .map(|r| format!("{}: {}", r.label, r.value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn css(diagram_id: &str) -> String {
    let id = escape_text(diagram_id);
    format!(
        "#{id}{{font-family:\"trebuchet ms\",verdana,arial,sans-serif;background-color:white;}}\
#{id} .edge{{fill:none;}}\
#{id} .plot-title{{font-size:13px;font-weight:bold;fill:#444;}}"
    )
}

pub(crate) fn fmt(v: f64) -> String {
    // Three fractional digits are plenty for screen coordinates; avoid `-0` and float noise.
    if !v.is_finite() {
        return "0".to_string();
    }
    let r = (v * 1000.0).round() / 1000.0;
    let s = r.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_text(text: &str) -> String {
    htmlize::escape_text(text).into_owned()
}

pub(crate) fn escape_attr(text: &str) -> String {
    htmlize::escape_attribute(text).into_owned()
}
