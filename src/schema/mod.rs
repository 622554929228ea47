//! Schema document model.
//!
//! A schema document declares named record schemas (ordered, typed,
//! optionally-constrained fields) plus named enumerations, in YAML or JSON:
//!
//! ```yaml
//! enums:
//!   Color: [red, green, blue]
//!
//! schemas:
//!   User:
//!     fields:
//!       - name: id
//!         type: int
//!       - name: email
//!         type: str
//!       - name: rating
//!         type: float | none
//!         gt: 0
//!         le: 5
//! ```
//!
//! Field declaration order is significant: it is the emission order for
//! generated instances.

pub mod loader;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A parsed schema document: named record schemas plus named enumerations.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct SchemaDocument {
    /// Named enumerations; members are the underlying emitted values
    #[serde(default)]
    pub enums: HashMap<String, Vec<Value>>,
    /// Named record schemas
    #[serde(default)]
    pub schemas: HashMap<String, SchemaDef>,
}

/// A single record schema: an ordered list of field declarations.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct SchemaDef {
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// One declared field: a type expression plus an advisory constraint set.
///
/// Absent constraints fall back to engine-wide defaults (integers 0–1000,
/// floats 0.0–1000.0, strings length 1–50, collections 1–3 items).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldDef {
    pub name: String,
    /// Declared type expression, e.g. `int`, `str | none`, `list[str]`,
    /// `dict[str, int]`, `literal["free", "pro"]`, or the name of another
    /// schema or enum in the same document.
    #[serde(rename = "type")]
    pub type_expr: String,
    /// Exclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<f64>,
    /// Inclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge: Option<f64>,
    /// Exclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<f64>,
    /// Inclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub le: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    /// Minimum length for strings and collections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    /// Maximum length for strings and collections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    /// Literal example values; a non-empty list short-circuits synthesis
    /// with fixed probability
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,
    /// Declared default value (recorded, not used by synthesis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Opaque handle to one named schema inside a resolved document.
///
/// Cheap to clone; the underlying document is shared. Immutable for the
/// duration of generation.
#[derive(Debug, Clone)]
pub struct SchemaHandle {
    document: Arc<SchemaDocument>,
    name: String,
}

impl SchemaHandle {
    /// Returns `None` when the document does not declare `name`.
    pub fn new(document: Arc<SchemaDocument>, name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        document
            .schemas
            .contains_key(&name)
            .then_some(Self { document, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.document.schemas[&self.name].fields
    }

    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields().iter().find(|f| f.name == name)
    }

    pub fn declares_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// A handle to another schema in the same document (for nested types).
    pub fn sibling(&self, name: &str) -> Option<SchemaHandle> {
        SchemaHandle::new(Arc::clone(&self.document), name)
    }

    /// The REST resource name: schema name lower-cased, pluralized by
    /// appending `s` unless it already ends in `s`.
    pub fn resource_name(&self) -> String {
        let mut resource = self.name.to_lowercase();
        if !resource.ends_with('s') {
            resource.push('s');
        }
        resource
    }
}
