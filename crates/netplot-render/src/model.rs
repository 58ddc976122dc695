use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A hover row: `label: value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub index: usize,
    pub id: String,
    /// Screen-space center.
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: String,
    pub stroke: String,
    pub tooltip: Vec<TooltipRow>,
    /// Indices into [`GraphLayout::edges`].
    pub linked_edges: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: String,
    pub tooltip: Vec<TooltipRow>,
}

/// Highlight colors used by the interactive document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightStyle {
    pub node_fill: String,
    pub edge_stroke: String,
    pub node_line_width: f64,
    pub edge_width: f64,
}

/// Everything a writer needs, already in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLayout {
    pub title: String,
    pub width: f64,
    pub height: f64,
    /// `false` when the canvas was given a fixed pixel size.
    pub stretch: bool,
    pub bounds: Bounds,
    pub directed: bool,
    pub edge_alpha: f64,
    pub edge_width: f64,
    pub highlight: HighlightStyle,
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}
