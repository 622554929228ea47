//! In-memory mock resource store.
//!
//! One ordered dataset per resource name, owned by the serving session and
//! passed by reference to request handlers. Every mutation goes through the
//! `RwLock`, so concurrent request handling cannot interleave appends or
//! replacements for a resource.

use crate::faker::classify::{classify, ScalarKind, TypeClass};
use crate::schema::SchemaHandle;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const FLOAT_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Default)]
pub struct MockStore {
    data: Arc<RwLock<HashMap<String, Vec<Value>>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Resets the resource's dataset and fills it with `instances`.
    pub async fn populate(&self, resource: &str, instances: Vec<Value>) {
        let mut data = self.data.write().await;
        let items = data.entry(resource.to_string()).or_default();
        items.clear();
        items.extend(instances);
    }

    pub async fn count(&self, resource: &str) -> usize {
        let data = self.data.read().await;
        data.get(resource).map_or(0, Vec::len)
    }

    /// All items, in insertion order, optionally narrowed by equality
    /// filters. Filters on names the schema does not declare are ignored.
    pub async fn list(
        &self,
        resource: &str,
        handle: &SchemaHandle,
        filters: &HashMap<String, String>,
    ) -> Vec<Value> {
        let data = self.data.read().await;
        let items = data.get(resource).cloned().unwrap_or_default();
        if filters.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| matches_filters(item, handle, filters))
            .collect()
    }

    /// Resolves `identifier` against the id/uuid field when the schema
    /// declares one, falling back to a zero-based positional index.
    pub async fn get(
        &self,
        resource: &str,
        handle: &SchemaHandle,
        identifier: &str,
    ) -> Option<Value> {
        let data = self.data.read().await;
        let items = data.get(resource)?;
        find_index(items, handle, identifier).map(|i| items[i].clone())
    }

    /// Appends a new item. When the schema declares an integer `id` field
    /// and the payload omits it, the next id (max existing + 1, or 1) is
    /// assigned.
    pub async fn create(
        &self,
        resource: &str,
        handle: &SchemaHandle,
        mut payload: Map<String, Value>,
    ) -> Value {
        let mut data = self.data.write().await;
        let items = data.entry(resource.to_string()).or_default();

        if declares_integer_id(handle) && payload.get("id").map_or(true, Value::is_null) {
            payload.insert("id".to_string(), Value::from(next_id(items)));
        }

        let item = Value::Object(payload);
        items.push(item.clone());
        item
    }

    /// Replaces the matched item. The original identifier value survives
    /// whatever the payload says. Returns the stored item, or `None` when
    /// the identifier resolves to nothing.
    pub async fn update(
        &self,
        resource: &str,
        handle: &SchemaHandle,
        identifier: &str,
        mut payload: Map<String, Value>,
    ) -> Option<Value> {
        let mut data = self.data.write().await;
        let items = data.get_mut(resource)?;
        let index = find_index(items, handle, identifier)?;

        if let Some(id_field) = id_field(handle) {
            if let Some(original) = items[index].get(id_field) {
                if !original.is_null() {
                    payload.insert(id_field.to_string(), original.clone());
                }
            }
        }

        items[index] = Value::Object(payload);
        Some(items[index].clone())
    }

    /// Removes the matched item. Returns false when nothing matched.
    pub async fn delete(&self, resource: &str, handle: &SchemaHandle, identifier: &str) -> bool {
        let mut data = self.data.write().await;
        let Some(items) = data.get_mut(resource) else {
            return false;
        };
        match find_index(items, handle, identifier) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        }
    }
}

/// The identifier field: a declared `id` wins over a declared `uuid`.
fn id_field(handle: &SchemaHandle) -> Option<&'static str> {
    if handle.declares_field("id") {
        Some("id")
    } else if handle.declares_field("uuid") {
        Some("uuid")
    } else {
        None
    }
}

fn declares_integer_id(handle: &SchemaHandle) -> bool {
    let Some(field) = handle.field("id") else {
        return false;
    };
    matches!(
        strip_optional(classify(&field.type_expr, handle.document())),
        TypeClass::Scalar(ScalarKind::Int)
    )
}

fn strip_optional(class: TypeClass) -> TypeClass {
    match class {
        TypeClass::Optional(inner) => *inner,
        other => other,
    }
}

fn find_index(items: &[Value], handle: &SchemaHandle, identifier: &str) -> Option<usize> {
    if let Some(field) = id_field(handle) {
        let matched = items.iter().position(|item| {
            item.get(field)
                .filter(|value| !value.is_null())
                .map_or(false, |value| value_as_string(value) == identifier)
        });
        if matched.is_some() {
            return matched;
        }
    }
    identifier
        .parse::<usize>()
        .ok()
        .filter(|index| *index < items.len())
}

fn next_id(items: &[Value]) -> i64 {
    items
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_i64))
        .max()
        .unwrap_or(0)
        .max(0)
        + 1
}

fn matches_filters(item: &Value, handle: &SchemaHandle, filters: &HashMap<String, String>) -> bool {
    filters.iter().all(|(name, raw)| {
        let Some(field) = handle.field(name) else {
            // Unrecognized query field names are ignored, not errors
            return true;
        };
        let class = strip_optional(classify(&field.type_expr, handle.document()));
        let value = item.get(name).unwrap_or(&Value::Null);
        value_matches(value, &class, raw)
    })
}

/// Type-aware equality between a stored value and a query string.
fn value_matches(value: &Value, class: &TypeClass, raw: &str) -> bool {
    if value.is_null() {
        let lowered = raw.to_lowercase();
        return raw.is_empty() || lowered == "none" || lowered == "null";
    }
    match class {
        TypeClass::Scalar(ScalarKind::Bool) => match (parse_bool(raw), value.as_bool()) {
            (Some(query), Some(stored)) => query == stored,
            _ => false,
        },
        TypeClass::Scalar(ScalarKind::Int) => match (raw.parse::<i64>(), value.as_i64()) {
            (Ok(query), Some(stored)) => query == stored,
            _ => false,
        },
        TypeClass::Scalar(ScalarKind::Float) => match (raw.parse::<f64>(), value.as_f64()) {
            (Ok(query), Some(stored)) => (query - stored).abs() < FLOAT_TOLERANCE,
            _ => false,
        },
        _ => value_as_string(value) == raw,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn value_as_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
