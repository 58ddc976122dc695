use crate::Result;
use netplot_core::PreparedGraph;
use serde::Serialize;
use serde_json::{Map, Value};

/// The prepared tables, one array per column:
/// `{"nodes": {"id": [..], "x": [..], ..}, "edges": {..}, "x_pad": ..}`.
///
/// Column order follows the row struct field order.
pub fn render_json(graph: &PreparedGraph) -> Result<Value> {
    let mut out = Map::new();
    out.insert("nodes".to_string(), columns(&graph.nodes)?);
    out.insert("edges".to_string(), columns(&graph.edges)?);
    out.insert("x_pad".to_string(), serde_json::to_value(graph.x_pad)?);
    Ok(Value::Object(out))
}

fn columns<T: Serialize>(rows: &[T]) -> Result<Value> {
    let mut cols: Map<String, Value> = Map::new();
    for (i, row) in rows.iter().enumerate() {
        let Value::Object(fields) = serde_json::to_value(row)? else {
            continue;
        };
        for (key, value) in fields {
            let col = cols
                .entry(key)
                .or_insert_with(|| Value::Array(vec![Value::Null; i]));
            if let Value::Array(values) = col {
                values.push(value);
            }
        }
    }
    Ok(Value::Object(cols))
}
