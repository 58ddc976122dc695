//! Node and edge tables, before and after feature derivation.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of the node table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Member of the largest connected component.
    #[serde(deserialize_with = "deserialize_flag")]
    pub lcc: bool,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub pretty_category: String,
    #[serde(default)]
    pub state_abbrv: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// One row of the edge table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub logamount: Option<f64>,
    #[serde(default)]
    pub count: Option<f64>,
}

/// Both tables as loaded, untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTables {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedNode {
    pub index: usize,
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub lcc: bool,
    pub category: String,
    pub pretty_category: String,
    pub state_abbrv: Option<String>,
    pub name: String,
    pub in_degree: u32,
    pub out_degree: u32,
    pub degree: u32,
    pub node_size: f64,
}

impl PreparedNode {
    /// Looks up a column by name, for tooltip and color encodings.
    pub fn field(&self, column: &str) -> Option<String> {
        let v = match column {
            "index" => self.index.to_string(),
            "id" => self.id.clone(),
            "x" => self.x.to_string(),
            "y" => self.y.to_string(),
            "lcc" => u8::from(self.lcc).to_string(),
            "category" => self.category.clone(),
            "pretty_category" => self.pretty_category.clone(),
            "state_abbrv" => self.state_abbrv.clone()?,
            "name" => self.name.clone(),
            "in_degree" => self.in_degree.to_string(),
            "out_degree" => self.out_degree.to_string(),
            "degree" => self.degree.to_string(),
            "node_size" => self.node_size.to_string(),
            _ => return None,
        };
        Some(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedEdge {
    pub source: String,
    pub target: String,
    pub start: usize,
    pub end: usize,
    pub amount: f64,
    pub logamount: Option<f64>,
    pub count: Option<f64>,
    pub target_category: String,
}

impl PreparedEdge {
    pub fn field(&self, column: &str) -> Option<String> {
        let v = match column {
            "source" => self.source.clone(),
            "target" => self.target.clone(),
            "start" => self.start.to_string(),
            "end" => self.end.to_string(),
            "amount" => self.amount.to_string(),
            "logamount" => self.logamount?.to_string(),
            "count" => self.count?.to_string(),
            "target_category" => self.target_category.clone(),
            _ => return None,
        };
        Some(v)
    }
}

/// Output of the derivation pipeline; immutable from here on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedGraph {
    pub nodes: Vec<PreparedNode>,
    pub edges: Vec<PreparedEdge>,
    /// Horizontal gap inserted between the LCC and the remaining nodes.
    pub x_pad: f64,
}

impl PreparedGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&PreparedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Fixed node positions keyed by positional index.
    pub fn layout(&self) -> Vec<(usize, (f64, f64))> {
        self.nodes.iter().map(|n| (n.index, (n.x, n.y))).collect()
    }

    /// Indices of the edges touching node `index` in either direction.
    pub fn linked_edges(&self, index: usize) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.start == index || e.end == index)
            .map(|(i, _)| i)
            .collect()
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid flag `{raw}`")))
}

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" | "" => Some(false),
        other => other.parse::<f64>().ok().map(|v| v != 0.0),
    }
}
