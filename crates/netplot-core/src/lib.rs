#![forbid(unsafe_code)]

//! Node/edge table loading and feature derivation (headless).
//!
//! The pipeline is fixed: load both tables, then [`derive::prepare`] them into a
//! [`PreparedGraph`] that any renderer can consume without further table work.

pub mod config;
pub mod derive;
pub mod error;
pub mod model;
pub mod source;

pub use config::{
    CanvasConfig, DatasetConfig, DeriveConfig, NodeSizing, Palette, PlotConfig, StyleConfig,
};
pub use error::{Error, Result};
pub use model::{EdgeRecord, NodeRecord, PreparedEdge, PreparedGraph, PreparedNode, RawTables};
pub use source::{TableKind, TableSource};

/// Loads both tables named by `config.dataset` and derives the prepared graph.
pub fn load_and_prepare(config: &PlotConfig) -> Result<PreparedGraph> {
    let raw = source::load_tables(&config.dataset)?;
    derive::prepare(raw, &config.derive)
}

/// Same as [`load_and_prepare`] for tables already held in memory.
pub fn prepare_from_csv(
    nodes_csv: &str,
    edges_csv: &str,
    config: &DeriveConfig,
) -> Result<PreparedGraph> {
    let nodes = source::parse_nodes(nodes_csv)?;
    if nodes.is_empty() {
        return Err(Error::EmptyTable {
            table: TableKind::Nodes,
        });
    }
    let edges = source::parse_edges(edges_csv)?;
    derive::prepare(RawTables { nodes, edges }, config)
}

#[cfg(test)]
mod tests;
