//! Constraint extraction: normalizes a field's raw metadata into a
//! satisfiable constraint record.
//!
//! Constraints are advisory. Over-constrained input (negative lengths,
//! `min_length > max_length`) is resolved permissively: negatives clamp to
//! zero and the stricter bound forces the weaker one to match. Extraction
//! never fails.

use crate::schema::FieldDef;
use serde_json::Value;

/// Normalized constraint set for one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub gt: Option<f64>,
    pub ge: Option<f64>,
    pub lt: Option<f64>,
    pub le: Option<f64>,
    pub multiple_of: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub examples: Vec<Value>,
}

impl Constraints {
    pub fn from_field(field: &FieldDef) -> Self {
        let mut min_length = field.min_length.map(clamp_non_negative);
        let mut max_length = field.max_length.map(clamp_non_negative);

        // min > max: the stricter bound wins by forcing the weaker one
        if let (Some(min), Some(max)) = (min_length, max_length) {
            if min > max {
                max_length = Some(min);
                min_length = Some(min);
            }
        }

        Self {
            gt: field.gt,
            ge: field.ge,
            lt: field.lt,
            le: field.le,
            multiple_of: field.multiple_of,
            min_length,
            max_length,
            examples: field.examples.clone(),
        }
    }

    /// True when the field declares explicit length bounds.
    pub fn has_length_bounds(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some()
    }

    /// The effective length range, with defaults filled in. Always
    /// satisfiable: if the resolved minimum exceeds the resolved maximum,
    /// the maximum is raised to match.
    pub fn length_range(&self, default_min: usize, default_max: usize) -> (usize, usize) {
        let min = self.min_length.unwrap_or(default_min);
        let mut max = self.max_length.unwrap_or(default_max);
        if min > max {
            max = min;
        }
        (min, max)
    }
}

fn clamp_non_negative(value: i64) -> usize {
    value.max(0) as usize
}
