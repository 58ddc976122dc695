//! Projects prepared data coordinates onto the drawing canvas and resolves every visual encoding.

use crate::model::{Bounds, GraphLayout, HighlightStyle, LayoutEdge, LayoutNode, TooltipRow};
use crate::{Error, Result};
use indexmap::IndexMap;
use netplot_core::{NodeSizing, PlotConfig, PreparedGraph};
use std::collections::BTreeSet;

/// Nominal canvas used when the document stretches to its container.
pub const STRETCH_WIDTH: f64 = 1000.0;
pub const STRETCH_HEIGHT: f64 = 700.0;

/// What hover shows for a column the row does not have.
pub const MISSING_FIELD: &str = "???";

/// Highlighted glyphs are drawn with this line width.
const HIGHLIGHT_LINE_WIDTH: f64 = 2.0;

pub fn layout_graph(graph: &PreparedGraph, config: &PlotConfig) -> Result<GraphLayout> {
    let canvas = &config.canvas;
    let style = &config.style;

    let (width, height) = match (canvas.width, canvas.height) {
        (Some(w), Some(h)) => (w, h),
        _ => (STRETCH_WIDTH, STRETCH_HEIGHT),
    };
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(Error::InvalidCanvas {
            message: format!("canvas must have a positive size, got {width}x{height}"),
        });
    }
    let pad = canvas.padding;
    if !(pad.is_finite() && pad >= 0.0 && pad * 2.0 < width.min(height)) {
        return Err(Error::InvalidCanvas {
            message: format!("padding {pad} does not fit a {width}x{height} canvas"),
        });
    }

    let data = Bounds::from_points(
        graph
            .nodes
            .iter()
            .map(|n| (n.x, n.y))
            .filter(|(x, y)| x.is_finite() && y.is_finite()),
    )
    .unwrap_or(Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    });
    let projection = Projection::fit(&data, width, height, pad);

    let radius_of = |node_size: f64| match style.sizing {
        NodeSizing::Degree => node_size / 2.0,
        NodeSizing::Fixed => style.fixed_node_size / 2.0,
    };
    let fallback = style.fallback_color.as_str();

    let mut nodes: Vec<LayoutNode> = graph
        .nodes
        .iter()
        .map(|n| {
            let (x, y) = projection.apply(n.x, n.y);
            let (fill, stroke) = if style.color_nodes {
                let category = n.field(&style.node_color_attr).unwrap_or_default();
                let c = style.palette.color_for(&category, fallback).to_string();
                (c.clone(), c)
            } else {
                (style.node_fill.clone(), style.node_line.clone())
            };
            LayoutNode {
                index: n.index,
                id: n.id.clone(),
                x,
                y,
                radius: radius_of(n.node_size),
                fill,
                stroke,
                tooltip: tooltip_rows(&style.tooltips, |col| n.field(col)),
                linked_edges: Vec::new(),
            }
        })
        .collect();

    let mut edges = Vec::with_capacity(graph.edges.len());
    for (i, e) in graph.edges.iter().enumerate() {
        if e.start >= nodes.len() || e.end >= nodes.len() {
            return Err(Error::InvalidModel {
                message: format!(
                    "edge {i} ({} -> {}) points past {} nodes",
                    e.start,
                    e.end,
                    nodes.len()
                ),
            });
        }
        let (x1, y1) = (nodes[e.start].x, nodes[e.start].y);
        let (mut x2, mut y2) = (nodes[e.end].x, nodes[e.end].y);
        if style.directed {
            // Stop at the target's outline so the arrowhead stays visible.
            let r = nodes[e.end].radius;
            let (dx, dy) = (x2 - x1, y2 - y1);
            let len = (dx * dx + dy * dy).sqrt();
            if len > r && len > 0.0 {
                x2 -= dx / len * r;
                y2 -= dy / len * r;
            }
        }
        let category = e.field(&style.edge_color_attr).unwrap_or_default();
        edges.push(LayoutEdge {
            index: i,
            start: e.start,
            end: e.end,
            x1,
            y1,
            x2,
            y2,
            stroke: style.palette.color_for(&category, fallback).to_string(),
            tooltip: tooltip_rows(&style.edge_tooltips, |col| e.field(col)),
        });
        nodes[e.start].linked_edges.push(i);
        if e.end != e.start {
            nodes[e.end].linked_edges.push(i);
        }
    }

    let edge_categories = graph
        .edges
        .iter()
        .map(|e| e.field(&style.edge_color_attr).unwrap_or_default());
    let node_categories = graph
        .nodes
        .iter()
        .filter(|_| style.color_nodes)
        .map(|n| n.field(&style.node_color_attr).unwrap_or_default());
    let missing: BTreeSet<String> = edge_categories
        .chain(node_categories)
        .filter(|c| style.palette.get(c).is_none())
        .collect();
    if !missing.is_empty() {
        tracing::warn!(
            categories = ?missing,
            fallback,
            "categories missing from palette"
        );
    }

    tracing::debug!(
        width,
        height,
        scale = projection.scale,
        nodes = nodes.len(),
        edges = edges.len(),
        "laid out graph"
    );

    Ok(GraphLayout {
        title: config.title.clone(),
        width,
        height,
        stretch: canvas.is_stretch(),
        bounds: Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width,
            max_y: height,
        },
        directed: style.directed,
        edge_alpha: style.edge_alpha,
        edge_width: style.edge_width,
        highlight: HighlightStyle {
            node_fill: style.node_highlight_color.clone(),
            edge_stroke: style.edge_highlight_color.clone(),
            node_line_width: HIGHLIGHT_LINE_WIDTH,
            edge_width: HIGHLIGHT_LINE_WIDTH,
        },
        nodes,
        edges,
    })
}

/// Uniform scale + translation from data space to screen space, y pointing down.
#[derive(Debug, Clone, Copy)]
struct Projection {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    min_x: f64,
    max_y: f64,
}

impl Projection {
    fn fit(data: &Bounds, width: f64, height: f64, pad: f64) -> Self {
        let avail_w = width - pad * 2.0;
        let avail_h = height - pad * 2.0;
        let (dw, dh) = (data.width(), data.height());
        let scale = match (dw > 0.0, dh > 0.0) {
            (true, true) => (avail_w / dw).min(avail_h / dh),
            (true, false) => avail_w / dw,
            (false, true) => avail_h / dh,
            (false, false) => 1.0,
        };
        Self {
            scale,
            offset_x: pad + (avail_w - dw * scale) / 2.0,
            offset_y: pad + (avail_h - dh * scale) / 2.0,
            min_x: data.min_x,
            max_y: data.max_y,
        }
    }

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.offset_x + (x - self.min_x) * self.scale,
            self.offset_y + (self.max_y - y) * self.scale,
        )
    }
}

fn tooltip_rows(
    columns: &IndexMap<String, String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<TooltipRow> {
    columns
        .iter()
        .map(|(label, column)| TooltipRow {
            label: label.clone(),
            value: lookup(column).unwrap_or_else(|| MISSING_FIELD.to_string()),
        })
        .collect()
}
