use super::{FlatMetrics, MetricFilter};
use serde_json::{Map, Value};

/// Flatten a JSON document into a map from dotted path to numeric value.
///
/// `path` holds the leading segments (normally just the prefix). Object keys and
/// array indices are appended as the walk descends. Null, string, and boolean leaves
/// never produce an entry, and a bare top-level scalar yields an empty map.
///
/// Keys are not escaped, so a key containing `.` produces a path indistinguishable
/// from a nested one. Should two leaves ever map to the same path, the later one wins.
#[must_use]
pub fn flatten(value: &Value, path: &[String], filter: &MetricFilter) -> FlatMetrics {
    let mut out = FlatMetrics::new();
    let mut segments = path.to_vec();
    flatten_into(&mut out, &mut segments, value, filter);
    out
}

fn flatten_into(out: &mut FlatMetrics, path: &mut Vec<String>, value: &Value, filter: &MetricFilter) {
    match value {
        Value::Array(items) => flatten_array(out, path, items, filter),
        Value::Object(map) => flatten_object(out, path, map, filter),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn flatten_array(out: &mut FlatMetrics, path: &mut Vec<String>, items: &[Value], filter: &MetricFilter) {
    for (index, item) in items.iter().enumerate() {
        path.push(index.to_string());
        flatten_into(out, path, item, filter);
        let _ = path.pop();
    }
}

fn flatten_object(out: &mut FlatMetrics, path: &mut Vec<String>, map: &Map<String, Value>, filter: &MetricFilter) {
    for (key, value) in map {
        path.push(key.clone());

        match value {
            Value::Null => {}
            Value::Object(child) => flatten_object(out, path, child, filter),
            Value::Array(items) => flatten_array(out, path, items, filter),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                let name = path.join(".");
                if let Some(v) = filter.output_metric(&name, value) {
                    let _ = out.insert(name, v);
                }
            }
        }

        let _ = path.pop();
    }
}
