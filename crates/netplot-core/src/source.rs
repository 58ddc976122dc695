//! Table loader: fetches the node and edge CSVs from a URL or a local path.

use crate::config::DatasetConfig;
use crate::model::{EdgeRecord, NodeRecord, RawTables};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

pub const DEFAULT_NODES_URL: &str =
    "https://raw.githubusercontent.com/eric-mc2/test-viz/main/data/nodes.csv";
pub const DEFAULT_EDGES_URL: &str =
    "https://raw.githubusercontent.com/eric-mc2/test-viz/main/data/edges.csv";

const USER_AGENT: &str = concat!("netplot/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Nodes,
    Edges,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Nodes => f.write_str("node"),
            TableKind::Edges => f.write_str("edge"),
        }
    }
}

/// Where a table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Url(Url),
    Path(PathBuf),
}

impl TableSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Self::Path(path),
                Err(()) => Self::Path(PathBuf::from(raw)),
            },
            // Anything else (including Windows drive letters, which parse as a scheme) is a path.
            _ => Self::Path(PathBuf::from(raw)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl FromStr for TableSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Url(url) => write!(f, "{url}"),
            TableSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads the whole table as text. Remote sources get a single blocking GET; there is no retry.
pub fn fetch_text(source: &TableSource) -> Result<String> {
    match source {
        TableSource::Url(url) => {
            tracing::info!(%url, "fetching table");
            let fetch_err = |source: reqwest::Error| Error::Fetch {
                url: url.to_string(),
                source,
            };
            let client = reqwest::blocking::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .map_err(fetch_err)?;
            let resp = client.get(url.as_str()).send().map_err(fetch_err)?;
            let status = resp.status();
            if !status.is_success() {
                return Err(Error::HttpStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            resp.text().map_err(fetch_err)
        }
        TableSource::Path(path) => {
            tracing::info!(path = %path.display(), "reading table");
            std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.display().to_string(),
                source,
            })
        }
    }
}

pub fn parse_nodes(text: &str) -> Result<Vec<NodeRecord>> {
    parse_table(text, TableKind::Nodes)
}

pub fn parse_edges(text: &str) -> Result<Vec<EdgeRecord>> {
    parse_table(text, TableKind::Edges)
}

fn parse_table<T: DeserializeOwned>(text: &str, table: TableKind) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        let row = record.map_err(|err| csv_error(table, &err))?;
        rows.push(row);
    }
    tracing::debug!(%table, rows = rows.len(), "parsed table");
    Ok(rows)
}

fn csv_error(table: TableKind, err: &csv::Error) -> Error {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    };
    Error::Csv {
        table,
        line,
        message,
    }
}

/// Loads both tables. An empty node table is an error; an empty edge table is not.
pub fn load_tables(dataset: &DatasetConfig) -> Result<RawTables> {
    let nodes = parse_nodes(&fetch_text(&TableSource::parse(&dataset.nodes))?)?;
    if nodes.is_empty() {
        return Err(Error::EmptyTable {
            table: TableKind::Nodes,
        });
    }
    let edges = parse_edges(&fetch_text(&TableSource::parse(&dataset.edges))?)?;
    tracing::info!(
        nodes = nodes.len(),
        edges = edges.len(),
        "loaded graph tables"
    );
    Ok(RawTables { nodes, edges })
}
