//! Feature derivation: indices, degrees, marker sizes, cluster offsets and edge categories.
//!
//! Every step is a plain function over slices so it can be checked on its own; [`prepare`]
//! composes them in the fixed order the renderers expect.

use crate::config::DeriveConfig;
use crate::model::{EdgeRecord, NodeRecord, PreparedEdge, PreparedGraph, PreparedNode, RawTables};
use crate::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};

/// Node id -> positional index. Duplicate ids are rejected.
pub fn index_nodes(nodes: &[NodeRecord]) -> Result<FxHashMap<&str, usize>> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    index.reserve(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        if let Some(&first) = index.get(node.id.as_str()) {
            return Err(Error::DuplicateNode {
                id: node.id.clone(),
                first,
                second: i,
            });
        }
        index.insert(node.id.as_str(), i);
    }
    Ok(index)
}

/// `(start, end)` node indices for every edge.
pub fn map_edge_endpoints(
    edges: &[EdgeRecord],
    index: &FxHashMap<&str, usize>,
) -> Result<Vec<(usize, usize)>> {
    edges
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let start = lookup(index, &e.source, i, "source")?;
            let end = lookup(index, &e.target, i, "target")?;
            Ok::<_, Error>((start, end))
        })
        .collect()
}

fn lookup(
    index: &FxHashMap<&str, usize>,
    id: &str,
    edge: usize,
    endpoint: &'static str,
) -> Result<usize> {
    index.get(id).copied().ok_or_else(|| Error::UnknownEndpoint {
        edge,
        endpoint,
        id: id.to_string(),
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Degree {
    pub in_degree: u32,
    pub out_degree: u32,
}

impl Degree {
    pub fn total(&self) -> u32 {
        self.in_degree + self.out_degree
    }
}

/// Distinct in-neighbors and distinct out-neighbors per node; parallel edges count once.
pub fn compute_degrees(node_count: usize, endpoints: &[(usize, usize)]) -> Vec<Degree> {
    let unique: FxHashSet<(usize, usize)> = endpoints.iter().copied().collect();
    let mut degrees = vec![Degree::default(); node_count];
    for (start, end) in unique {
        degrees[start].out_degree += 1;
        degrees[end].in_degree += 1;
    }
    degrees
}

/// Min-max normalizes `degrees` into `[min_size, max_size]`.
///
/// When every degree is equal there is nothing to spread, so every node gets `min_size`.
pub fn scale_node_sizes(degrees: &[u32], min_size: f64, max_size: f64) -> Vec<f64> {
    let (Some(&lo), Some(&hi)) = (degrees.iter().min(), degrees.iter().max()) else {
        return Vec::new();
    };
    let span = f64::from(hi - lo);
    degrees
        .iter()
        .map(|&d| {
            if span == 0.0 {
                min_size
            } else {
                min_size + (max_size - min_size) * f64::from(d - lo) / span
            }
        })
        .collect()
}

/// Shifts every non-LCC node right by the x-range plus `pad_ratio` of it, so the two clusters
/// sit side by side. Returns the pad.
///
/// A zero x-range (every node on one vertical line) falls back to `max(|x_max|, 1)` as the
/// span, so the clusters still separate.
pub fn reposition_clusters(xs: &mut [f64], lcc: &[bool], pad_ratio: f64) -> f64 {
    debug_assert_eq!(xs.len(), lcc.len());
    let Some((x_min, x_max)) = x_extent(xs) else {
        return 0.0;
    };
    let range = if x_max > x_min {
        x_max - x_min
    } else {
        x_max.abs().max(1.0)
    };
    let x_pad = range * pad_ratio;
    let offset = range + x_pad;
    let mut moved = 0usize;
    for (x, &in_lcc) in xs.iter_mut().zip(lcc) {
        if !in_lcc {
            *x += offset;
            moved += 1;
        }
    }
    tracing::debug!(x_min, x_max, x_pad, moved, "repositioned non-LCC nodes");
    x_pad
}

fn x_extent(xs: &[f64]) -> Option<(f64, f64)> {
    let mut it = xs.iter().copied().filter(|x| x.is_finite());
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x))))
}

/// Edge color key: the target node's `pretty_category`.
pub fn color_edges(nodes: &[PreparedNode], endpoints: &[(usize, usize)]) -> Vec<String> {
    endpoints
        .iter()
        .map(|&(_, end)| nodes[end].pretty_category.clone())
        .collect()
}

/// Runs the whole derivation and returns the prepared tables.
pub fn prepare(raw: RawTables, cfg: &DeriveConfig) -> Result<PreparedGraph> {
    let RawTables { nodes, edges } = raw;

    let index = index_nodes(&nodes)?;
    let endpoints = map_edge_endpoints(&edges, &index)?;
    drop(index);

    let degrees = compute_degrees(nodes.len(), &endpoints);
    let totals: Vec<u32> = degrees.iter().map(Degree::total).collect();
    let sizes = scale_node_sizes(&totals, cfg.min_node_size, cfg.max_node_size);

    let mut xs: Vec<f64> = nodes.iter().map(|n| n.x).collect();
    let x_pad = if cfg.reposition {
        let lcc: Vec<bool> = nodes.iter().map(|n| n.lcc).collect();
        reposition_clusters(&mut xs, &lcc, cfg.pad_ratio)
    } else {
        0.0
    };

    let prepared_nodes: Vec<PreparedNode> = nodes
        .into_iter()
        .enumerate()
        .map(|(i, n)| PreparedNode {
            index: i,
            id: n.id,
            x: xs[i],
            y: n.y,
            lcc: n.lcc,
            category: n.category,
            pretty_category: n.pretty_category,
            state_abbrv: n.state_abbrv,
            name: n.name,
            in_degree: degrees[i].in_degree,
            out_degree: degrees[i].out_degree,
            degree: degrees[i].total(),
            node_size: sizes[i],
        })
        .collect();

    let categories = color_edges(&prepared_nodes, &endpoints);
    let prepared_edges: Vec<PreparedEdge> = edges
        .into_iter()
        .zip(endpoints)
        .zip(categories)
        .map(|((e, (start, end)), target_category)| PreparedEdge {
            target_category,
            source: e.source,
            target: e.target,
            start,
            end,
            amount: e.amount,
            logamount: e.logamount,
            count: e.count,
        })
        .collect();

    tracing::info!(
        nodes = prepared_nodes.len(),
        edges = prepared_edges.len(),
        lcc = prepared_nodes.iter().filter(|n| n.lcc).count(),
        max_degree = totals.iter().max().copied().unwrap_or(0),
        "prepared graph"
    );

    Ok(PreparedGraph {
        nodes: prepared_nodes,
        edges: prepared_edges,
        x_pad,
    })
}
