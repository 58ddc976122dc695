//! Plot configuration: built-in defaults, optionally overlaid with a JSON document.

mod palette;

pub use palette::Palette;

use crate::source::{DEFAULT_EDGES_URL, DEFAULT_NODES_URL};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_TITLE: &str = "Police Foundation Donations";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub title: String,
    pub dataset: DatasetConfig,
    pub derive: DeriveConfig,
    pub style: StyleConfig,
    pub canvas: CanvasConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            dataset: DatasetConfig::default(),
            derive: DeriveConfig::default(),
            style: StyleConfig::default(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl PlotConfig {
    /// Overlays `overrides` onto the defaults. Objects merge key by key; everything else replaces.
    pub fn from_overrides(overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(Self::default())?;
        deep_merge_value(&mut base, overrides);
        let cfg: Self = serde_json::from_value(base).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_overrides(&Self::parse_overrides(text)?)
    }

    /// Parses a JSON config document into an override object without applying it.
    pub fn parse_overrides(text: &str) -> Result<Value> {
        let overrides: Value = serde_json::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        if !overrides.is_object() {
            return Err(Error::InvalidConfig {
                message: "top-level config must be a JSON object".to_string(),
            });
        }
        Ok(overrides)
    }

    pub fn validate(&self) -> Result<()> {
        let d = &self.derive;
        if !(d.min_node_size.is_finite() && d.max_node_size.is_finite()) {
            return Err(Error::InvalidConfig {
                message: "node sizes must be finite".to_string(),
            });
        }
        if d.min_node_size < 0.0 || d.max_node_size < d.min_node_size {
            return Err(Error::InvalidConfig {
                message: format!(
                    "expected 0 <= min_node_size <= max_node_size, got {} and {}",
                    d.min_node_size, d.max_node_size
                ),
            });
        }
        if !(d.pad_ratio.is_finite() && d.pad_ratio >= 0.0) {
            return Err(Error::InvalidConfig {
                message: format!("pad_ratio must be >= 0, got {}", d.pad_ratio),
            });
        }
        if !(0.0..=1.0).contains(&self.style.edge_alpha) {
            return Err(Error::InvalidConfig {
                message: format!("edge_alpha must be within 0..=1, got {}", self.style.edge_alpha),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub nodes: String,
    pub edges: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES_URL.to_string(),
            edges: DEFAULT_EDGES_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriveConfig {
    pub min_node_size: f64,
    pub max_node_size: f64,
    /// Fraction of the x-range left empty between the LCC and the rest.
    pub pad_ratio: f64,
    pub reposition: bool,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            min_node_size: 2.0,
            max_node_size: 10.0,
            pad_ratio: 0.1,
            reposition: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeSizing {
    /// Marker size follows the normalized degree.
    Degree,
    /// Every marker gets `fixed_node_size`.
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub node_color_attr: String,
    pub edge_color_attr: String,
    pub palette: Palette,
    /// Color for categories missing from the palette.
    pub fallback_color: String,
    pub color_nodes: bool,
    pub node_fill: String,
    pub node_line: String,
    pub node_highlight_color: String,
    pub edge_highlight_color: String,
    pub edge_alpha: f64,
    pub edge_width: f64,
    pub sizing: NodeSizing,
    pub fixed_node_size: f64,
    pub directed: bool,
    /// Hover rows for nodes: label -> column.
    pub tooltips: IndexMap<String, String>,
    /// Hover rows for edges: label -> column.
    pub edge_tooltips: IndexMap<String, String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            node_color_attr: "pretty_category".to_string(),
            edge_color_attr: "target_category".to_string(),
            palette: Palette::default(),
            fallback_color: "gray".to_string(),
            color_nodes: false,
            node_fill: "white".to_string(),
            node_line: "black".to_string(),
            node_highlight_color: "white".to_string(),
            edge_highlight_color: "black".to_string(),
            edge_alpha: 0.5,
            edge_width: 1.0,
            sizing: NodeSizing::Degree,
            fixed_node_size: 8.0,
            directed: false,
            tooltips: IndexMap::from([
                ("Name".to_string(), "name".to_string()),
                ("Category".to_string(), "pretty_category".to_string()),
                ("State".to_string(), "state_abbrv".to_string()),
            ]),
            edge_tooltips: IndexMap::from([("Amount".to_string(), "amount".to_string())]),
        }
    }
}

/// Output canvas. `None` dimensions stretch to the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub padding: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            padding: 20.0,
        }
    }
}

impl CanvasConfig {
    pub fn is_stretch(&self) -> bool {
        self.width.is_none() || self.height.is_none()
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

/// Sets `value` at a dotted path inside a JSON object, creating intermediate objects.
pub fn set_dotted(root: &mut Value, dotted_path: &str, value: Value) {
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let Value::Object(map) = root else {
        return;
    };
    let mut cur: &mut Map<String, Value> = map;
    let mut segments = dotted_path.split('.').peekable();
    while let Some(seg) = segments.next() {
        if segments.peek().is_none() {
            cur.insert(seg.to_string(), value);
            return;
        }
        let slot = cur
            .entry(seg)
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Some(next) = slot.as_object_mut() else {
            return;
        };
        cur = next;
    }
}
