//! Value synthesis: produces constraint-respecting values for classified
//! types and assembles whole instances in field declaration order.
//!
//! Per-field anomalies (unsupported types, over-constrained ranges) never
//! fail an instance; they degrade to clamped values or tagged placeholder
//! strings. The only instance-level failure is runaway recursion through
//! self-referential schemas, which aborts the whole batch.

use crate::error::{Result, TycheError};
use crate::faker::classify::{classify, ScalarKind, TypeClass};
use crate::faker::constraints::Constraints;
use crate::faker::provider::{FakeProvider, SemanticCategory};
use crate::schema::SchemaHandle;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Map, Value};

pub const DEFAULT_INT_MIN: i64 = 0;
pub const DEFAULT_INT_MAX: i64 = 1000;
pub const DEFAULT_FLOAT_MIN: f64 = 0.0;
pub const DEFAULT_FLOAT_MAX: f64 = 1000.0;
pub const DEFAULT_STR_MIN_LEN: usize = 1;
pub const DEFAULT_STR_MAX_LEN: usize = 50;
pub const DEFAULT_MIN_ITEMS: usize = 1;
pub const DEFAULT_MAX_ITEMS: usize = 3;

/// Probability of short-circuiting to a declared example value.
const EXAMPLE_PROBABILITY: f64 = 0.3;

/// Nudge applied when floating rounding lands exactly on a strict bound.
const STRICT_BOUND_EPSILON: f64 = 1e-9;

/// Self-referential schemas would otherwise recurse without bound.
const MAX_DEPTH: usize = 32;

/// Assembles one instance of the schema: every declared field, in
/// declaration order, no extra keys.
pub fn generate_instance(
    handle: &SchemaHandle,
    provider: &mut FakeProvider,
) -> Result<Map<String, Value>> {
    assemble(handle, provider, 0)
}

/// Generates a batch. Any instance-level failure aborts the whole batch;
/// no partial output is returned.
pub fn generate_instances(
    handle: &SchemaHandle,
    count: usize,
    provider: &mut FakeProvider,
) -> Result<Vec<Value>> {
    let mut instances = Vec::with_capacity(count);
    for _ in 0..count {
        instances.push(Value::Object(generate_instance(handle, provider)?));
    }
    Ok(instances)
}

fn assemble(
    handle: &SchemaHandle,
    provider: &mut FakeProvider,
    depth: usize,
) -> Result<Map<String, Value>> {
    if depth > MAX_DEPTH {
        return Err(TycheError::Generation {
            schema: handle.name().to_string(),
            reason: format!("nested schema recursion exceeded {MAX_DEPTH} levels"),
        });
    }

    let mut instance = Map::new();
    for field in handle.fields() {
        let class = classify(&field.type_expr, handle.document());
        let constraints = Constraints::from_field(field);
        let value = synthesize_field(&field.name, &class, &constraints, handle, provider, depth)?;
        instance.insert(field.name.clone(), value);
    }
    Ok(instance)
}

/// Field-level synthesis: the optional null coin runs first, then the
/// example-value override, then the field-name semantic override, then
/// generic type-based synthesis.
fn synthesize_field(
    name: &str,
    class: &TypeClass,
    constraints: &Constraints,
    handle: &SchemaHandle,
    provider: &mut FakeProvider,
    depth: usize,
) -> Result<Value> {
    if let TypeClass::Optional(inner) = class {
        if provider.rng().gen_bool(0.5) {
            return Ok(Value::Null);
        }
        return synthesize_field(name, inner, constraints, handle, provider, depth);
    }

    if !constraints.examples.is_empty() && provider.rng().gen_bool(EXAMPLE_PROBABILITY) {
        let example = constraints
            .examples
            .choose(provider.rng())
            .cloned()
            .unwrap_or(Value::Null);
        return Ok(example);
    }

    if let Some(category) = SemanticCategory::from_field_name(name) {
        // A category-generated string still honors explicit length bounds
        let value = match provider.by_category(category) {
            Value::String(text) if constraints.has_length_bounds() => {
                Value::String(satisfy_length(text, constraints, provider))
            }
            other => other,
        };
        return Ok(value);
    }

    synthesize_value(class, constraints, handle, provider, depth)
}

/// Type-directed synthesis for one classified type.
pub fn synthesize_value(
    class: &TypeClass,
    constraints: &Constraints,
    handle: &SchemaHandle,
    provider: &mut FakeProvider,
    depth: usize,
) -> Result<Value> {
    let value = match class {
        TypeClass::Scalar(ScalarKind::Int) => json!(synth_int(constraints, provider)),
        TypeClass::Scalar(ScalarKind::Float) => json!(synth_float(constraints, provider)),
        TypeClass::Scalar(ScalarKind::Str) => json!(synth_str(constraints, provider)),
        TypeClass::Scalar(ScalarKind::Bool) => json!(provider.rng().gen_bool(0.5)),
        TypeClass::Scalar(ScalarKind::Uuid) => json!(provider.uuid_v4()),
        TypeClass::Scalar(ScalarKind::Date) => json!(provider.date()),
        TypeClass::Scalar(ScalarKind::Time) => json!(provider.time_of_day()),
        TypeClass::Scalar(ScalarKind::DateTime) => json!(provider.datetime()),
        TypeClass::Any => json!("any_value_placeholder"),
        TypeClass::Null => Value::Null,
        TypeClass::Optional(inner) => {
            // Reached when nested inside lists/mappings/unions
            if provider.rng().gen_bool(0.5) {
                Value::Null
            } else {
                synthesize_value(inner, constraints, handle, provider, depth)?
            }
        }
        TypeClass::Union(alternatives) => match pick(alternatives, provider) {
            Some(alternative) => {
                synthesize_value(&alternative, constraints, handle, provider, depth)?
            }
            None => Value::Null,
        },
        TypeClass::Enum(members) => pick(members, provider).unwrap_or(Value::Null),
        TypeClass::Literal(values) => pick(values, provider).unwrap_or(Value::Null),
        TypeClass::List(item) => {
            let count = item_count(constraints, provider);
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                // Field constraints bound the count, not the items
                items.push(synthesize_value(
                    item,
                    &Constraints::default(),
                    handle,
                    provider,
                    depth,
                )?);
            }
            Value::Array(items)
        }
        TypeClass::Mapping(value_type) => {
            let count = item_count(constraints, provider);
            let mut entries = Map::new();
            for _ in 0..count {
                // Keys are short random words; collisions silently collapse
                let key = provider.word().to_lowercase();
                let value =
                    synthesize_value(value_type, &Constraints::default(), handle, provider, depth)?;
                entries.insert(key, value);
            }
            Value::Object(entries)
        }
        TypeClass::Nested(schema_name) => match handle.sibling(schema_name) {
            Some(nested) => Value::Object(assemble(&nested, provider, depth + 1)?),
            None => json!(format!("unsupported_type_{schema_name}")),
        },
        TypeClass::Unsupported(raw) => json!(format!("unsupported_type_{raw}")),
    };
    Ok(value)
}

fn pick<T: Clone>(choices: &[T], provider: &mut FakeProvider) -> Option<T> {
    choices.choose(provider.rng()).cloned()
}

fn item_count(constraints: &Constraints, provider: &mut FakeProvider) -> usize {
    let (min, max) = constraints.length_range(DEFAULT_MIN_ITEMS, DEFAULT_MAX_ITEMS);
    provider.rng().gen_range(min..=max)
}

/// Integer synthesis: the default range intersected with the declared
/// bounds, strict bounds narrowed by one so they become inclusive. An
/// over-constrained range collapses to its low bound instead of failing.
fn synth_int(constraints: &Constraints, provider: &mut FakeProvider) -> i64 {
    let mut low = DEFAULT_INT_MIN;
    let mut high = DEFAULT_INT_MAX;

    if let Some(ge) = constraints.ge {
        low = low.max(ge.ceil() as i64);
    }
    if let Some(gt) = constraints.gt {
        low = low.max(gt.floor() as i64 + 1);
    }
    if let Some(le) = constraints.le {
        high = high.min(le.floor() as i64);
    }
    if let Some(lt) = constraints.lt {
        high = high.min(lt.ceil() as i64 - 1);
    }
    if low > high {
        high = low;
    }

    if let Some(step) = integer_step(constraints.multiple_of) {
        let first = div_ceil(low, step);
        let last = high.div_euclid(step);
        if first <= last {
            return step * provider.rng().gen_range(first..=last);
        }
        // No multiple inside the range: fall back to a plain uniform draw
    }

    provider.rng().gen_range(low..=high)
}

fn integer_step(multiple_of: Option<f64>) -> Option<i64> {
    let m = multiple_of?;
    let rounded = m.round();
    (rounded >= 1.0 && (m - rounded).abs() < f64::EPSILON).then_some(rounded as i64)
}

fn div_ceil(value: i64, divisor: i64) -> i64 {
    let quotient = value.div_euclid(divisor);
    if value.rem_euclid(divisor) != 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// Float synthesis: bound intersection, epsilon nudge away from violated
/// strict bounds, multiple-of rounding, and a final 2-decimal rounding for
/// output stability.
fn synth_float(constraints: &Constraints, provider: &mut FakeProvider) -> f64 {
    let mut low = DEFAULT_FLOAT_MIN;
    let mut high = DEFAULT_FLOAT_MAX;

    if let Some(ge) = constraints.ge {
        low = low.max(ge);
    }
    if let Some(gt) = constraints.gt {
        low = low.max(gt);
    }
    if let Some(le) = constraints.le {
        high = high.min(le);
    }
    if let Some(lt) = constraints.lt {
        high = high.min(lt);
    }
    if low > high {
        high = low;
    }

    let mut value = provider.rng().gen_range(low..=high);

    if let Some(gt) = constraints.gt {
        if value <= gt {
            value = gt + STRICT_BOUND_EPSILON;
        }
    }
    if let Some(lt) = constraints.lt {
        if value >= lt {
            value = lt - STRICT_BOUND_EPSILON;
        }
    }
    value = value.clamp(low, high);

    if let Some(multiple) = constraints.multiple_of.filter(|m| *m > 0.0) {
        value = (value / multiple).round() * multiple;
        value = value.clamp(low, high);
    }

    (value * 100.0).round() / 100.0
}

/// String synthesis: an exact-length string when the bounds pin a single
/// length, otherwise free text truncated/padded into the effective range.
/// Lengths are counted in characters, not bytes.
fn synth_str(constraints: &Constraints, provider: &mut FakeProvider) -> String {
    let (min, max) = constraints.length_range(DEFAULT_STR_MIN_LEN, DEFAULT_STR_MAX_LEN);
    if max == 0 {
        return String::new();
    }
    if min == max {
        return provider.exact_string(min);
    }

    // Without explicit bounds, short free text reads best; with bounds,
    // size the text somewhat above the target before trimming
    let words = if constraints.has_length_bounds() {
        max / 5 + 2
    } else {
        3
    };
    let text = provider.sentence(words, words + 1);
    satisfy_length_range(text, min, max, provider)
}

/// Truncates/pads `text` into the field's declared length bounds.
fn satisfy_length(text: String, constraints: &Constraints, provider: &mut FakeProvider) -> String {
    let (min, max) = constraints.length_range(DEFAULT_STR_MIN_LEN, DEFAULT_STR_MAX_LEN);
    satisfy_length_range(text, min, max, provider)
}

fn satisfy_length_range(
    text: String,
    min: usize,
    max: usize,
    provider: &mut FakeProvider,
) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    if chars.len() > max {
        chars.truncate(max);
    }
    while chars.len() < min {
        chars.push(provider.letter());
    }
    if chars.len() > max {
        chars.truncate(max);
    }
    chars.into_iter().collect()
}
