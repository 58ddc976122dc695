use crate::source::TableKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {table} table (line {line}): {message}")]
    Csv {
        table: TableKind,
        line: u64,
        message: String,
    },

    #[error("{table} table has no rows")]
    EmptyTable { table: TableKind },

    #[error("duplicate node id `{id}` (rows {first} and {second})")]
    DuplicateNode {
        id: String,
        first: usize,
        second: usize,
    },

    #[error("edge {edge} references unknown {endpoint} node `{id}`")]
    UnknownEndpoint {
        edge: usize,
        endpoint: &'static str,
        id: String,
    },

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
