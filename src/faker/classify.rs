//! Type classification: parses a declared type expression into a closed
//! variant set the synthesizer can match exhaustively.
//!
//! The grammar accepts Python-style annotations, which is what schema
//! documents use: primitives (`int`, `str | none`), parametrized generics
//! (`list[str]`, `dict[str, int]`), literal sets (`literal["a", "b"]`), and
//! names declared elsewhere in the same document (enums and nested schemas).
//! Anything unrecognized classifies to `Unsupported`; the synthesizer then
//! emits a tagged placeholder instead of failing the instance.

use crate::schema::SchemaDocument;
use serde_json::Value;

/// Primitive scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Int,
    Float,
    Str,
    Bool,
    Uuid,
    Date,
    Time,
    DateTime,
}

/// The closed classification set.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeClass {
    Scalar(ScalarKind),
    /// `any`: emits a fixed placeholder value
    Any,
    /// The null marker inside unions (`none` / `null`)
    Null,
    /// A union with exactly one non-null alternative
    Optional(Box<TypeClass>),
    /// A union with several alternatives; the null marker, when present,
    /// stays in the set (no null-suppression)
    Union(Vec<TypeClass>),
    /// Members carry the underlying emitted values
    Enum(Vec<Value>),
    Literal(Vec<Value>),
    List(Box<TypeClass>),
    /// String-keyed mapping; only the value type matters
    Mapping(Box<TypeClass>),
    /// Another schema in the same document
    Nested(String),
    Unsupported(String),
}

/// Classifies a type expression against the document it appears in.
pub fn classify(expr: &str, document: &SchemaDocument) -> TypeClass {
    let expr = expr.trim();

    let parts = split_top_level(expr, '|');
    if parts.len() > 1 {
        return classify_union(&parts, document);
    }

    classify_single(expr, document)
}

fn classify_union(parts: &[&str], document: &SchemaDocument) -> TypeClass {
    let classified: Vec<TypeClass> = parts
        .iter()
        .map(|part| classify_single(part.trim(), document))
        .collect();

    let non_null: Vec<&TypeClass> = classified
        .iter()
        .filter(|class| **class != TypeClass::Null)
        .collect();
    let has_null = non_null.len() < classified.len();

    match (non_null.len(), has_null) {
        (0, _) => TypeClass::Null,
        (1, true) => TypeClass::Optional(Box::new(non_null[0].clone())),
        (1, false) => non_null[0].clone(),
        _ => TypeClass::Union(classified),
    }
}

fn classify_single(expr: &str, document: &SchemaDocument) -> TypeClass {
    // ASCII-only lowering keeps byte offsets aligned with `expr` for the
    // generic-argument slicing below
    let lowered = expr.to_ascii_lowercase();

    match lowered.as_str() {
        "int" | "integer" => return TypeClass::Scalar(ScalarKind::Int),
        "float" | "number" => return TypeClass::Scalar(ScalarKind::Float),
        "str" | "string" => return TypeClass::Scalar(ScalarKind::Str),
        "bool" | "boolean" => return TypeClass::Scalar(ScalarKind::Bool),
        "uuid" => return TypeClass::Scalar(ScalarKind::Uuid),
        "date" => return TypeClass::Scalar(ScalarKind::Date),
        "time" => return TypeClass::Scalar(ScalarKind::Time),
        "datetime" => return TypeClass::Scalar(ScalarKind::DateTime),
        "any" => return TypeClass::Any,
        "none" | "null" => return TypeClass::Null,
        "list" | "array" => return TypeClass::List(Box::new(TypeClass::Any)),
        "dict" | "map" => return TypeClass::Mapping(Box::new(TypeClass::Any)),
        _ => {}
    }

    if let Some(args) = generic_args(&lowered, expr, &["list", "array"]) {
        let inner = args
            .first()
            .map(|arg| classify(arg, document))
            .unwrap_or(TypeClass::Any);
        return TypeClass::List(Box::new(inner));
    }

    if let Some(args) = generic_args(&lowered, expr, &["dict", "map"]) {
        // Keys are always generated as short words; only the value type
        // (the last argument) drives synthesis
        let value = args
            .last()
            .map(|arg| classify(arg, document))
            .unwrap_or(TypeClass::Any);
        return TypeClass::Mapping(Box::new(value));
    }

    if let Some(args) = generic_args(&lowered, expr, &["literal"]) {
        let values = args.iter().map(|arg| parse_literal_value(arg)).collect();
        return TypeClass::Literal(values);
    }

    if let Some(members) = document.enums.get(expr) {
        return TypeClass::Enum(members.clone());
    }

    if document.schemas.contains_key(expr) {
        return TypeClass::Nested(expr.to_string());
    }

    TypeClass::Unsupported(expr.to_string())
}

/// Extracts the bracketed argument list when `expr` is `head[...]` for one
/// of the given heads. Arguments are split at the top level only.
fn generic_args<'a>(lowered: &str, expr: &'a str, heads: &[&str]) -> Option<Vec<&'a str>> {
    for head in heads {
        let Some(rest) = lowered.strip_prefix(head) else {
            continue;
        };
        if !rest.starts_with('[') || !rest.ends_with(']') {
            continue;
        }
        let inner = &expr[head.len() + 1..expr.len() - 1];
        return Some(
            split_top_level(inner, ',')
                .into_iter()
                .map(str::trim)
                .filter(|arg| !arg.is_empty())
                .collect(),
        );
    }
    None
}

/// Splits on `separator` outside brackets and string quotes.
fn split_top_level(expr: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in expr.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, _) if c == separator && depth == 0 => {
                parts.push(&expr[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&expr[start..]);
    parts
}

/// Parses one literal argument into a JSON scalar. Quoted strings lose
/// their quotes; numbers and booleans parse natively; bare words fall back
/// to strings.
fn parse_literal_value(raw: &str) -> Value {
    let raw = raw.trim();
    let unquoted = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')));
    if let Some(text) = unquoted {
        return Value::from(text);
    }
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        if value.is_number() || value.is_boolean() || value.is_null() {
            return value;
        }
    }
    Value::from(raw)
}
