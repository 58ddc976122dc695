use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered category -> color lookup (factor color map).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(IndexMap<String, String>);

impl Default for Palette {
    fn default() -> Self {
        Self::from_pairs([
            ("Private-ish", "#668DE5"),
            ("LEOs", "#062160"),
            ("Havens", "#F2BE57"),
            ("Boosters", "#901400"),
            ("Connectors", "#40B363"),
            ("Other Foundations", "#D4D4D4"),
            ("Government", "#D4D4D4"),
        ])
    }
}

impl Palette {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn get(&self, category: &str) -> Option<&str> {
        self.0.get(category).map(String::as_str)
    }

    pub fn color_for<'a>(&'a self, category: &str, fallback: &'a str) -> &'a str {
        match self.get(category) {
            Some(c) => c,
            None => {
                tracing::debug!(category, "category missing from palette");
                fallback
            }
        }
    }

    pub fn factors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
