//! Record filtering and score ordering
//!
//! A [`FilterSpec`] is a conjunction of per-field constraints. Fields in
//! [`THRESHOLD_FIELDS`] are inclusive numeric maximums; every other field is
//! a case-insensitive exact match.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::CoercionError;
use crate::record::{value_to_text, HelmetRecord};

/// Fields whose filter value is an inclusive upper bound
pub const THRESHOLD_FIELDS: &[&str] = &["cost", "score"];

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Threshold,
    Exact,
}

impl ConstraintKind {
    pub fn for_field(field: &str) -> Self {
        if THRESHOLD_FIELDS.contains(&field) {
            ConstraintKind::Threshold
        } else {
            ConstraintKind::Exact
        }
    }
}

/// Requested constraint value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl FilterValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            FilterValue::Text(s) => s.trim().parse().ok(),
            FilterValue::Integer(i) => Some(*i as f64),
            FilterValue::Number(n) => Some(*n),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Integer(i) => write!(f, "{}", i),
            FilterValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<i64> for FilterValue {
    fn from(i: i64) -> Self {
        FilterValue::Integer(i)
    }
}

impl From<u8> for FilterValue {
    fn from(i: u8) -> Self {
        FilterValue::Integer(i64::from(i))
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

/// Ordered field -> value constraints for one filtering pass.
///
/// Order only matters for display; matching is a logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSpec {
    constraints: Vec<(String, FilterValue)>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterSpec::insert`]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Add a constraint, replacing any earlier value for the same field
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        let field = field.into();
        let value = value.into();
        match self.constraints.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.constraints.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.constraints
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.constraints.iter().map(|(f, v)| (f.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// True when the record satisfies every constraint
    pub fn matches(&self, record: &HelmetRecord) -> bool {
        self.iter().all(|(field, requested)| {
            let Some(value) = record.get(field) else {
                return false;
            };

            match ConstraintKind::for_field(field) {
                ConstraintKind::Threshold => match check_threshold(field, value, requested) {
                    Ok(within) => within,
                    Err(e) => {
                        warn!("Failed to convert {} values: {}", field, e);
                        false
                    }
                },
                ConstraintKind::Exact => exact_match(value, requested),
            }
        })
    }
}

/// Filter records and sort survivors by score, lowest (safest) first.
///
/// Never fails: records whose threshold fields can't be read as numbers are
/// dropped with a warning.
pub fn filter_records<'a>(
    records: &'a [HelmetRecord],
    spec: &FilterSpec,
) -> Vec<&'a HelmetRecord> {
    if records.is_empty() {
        warn!("No data provided for filtering");
        return Vec::new();
    }

    let mut filtered: Vec<&HelmetRecord> = records.iter().filter(|r| spec.matches(r)).collect();
    sort_by_score(&mut filtered);

    info!(
        "Filtered {} items down to {} items",
        records.len(),
        filtered.len()
    );
    filtered
}

/// Stable ascending sort by score; records without a usable score go last
pub fn sort_by_score(records: &mut [&HelmetRecord]) {
    records.sort_by(|a, b| score_key(a).total_cmp(&score_key(b)));
}

// -0.0 + 0.0 is +0.0, so both zeros compare equal under total_cmp
fn score_key(record: &HelmetRecord) -> f64 {
    record.score().map(|s| s + 0.0).unwrap_or(f64::INFINITY)
}

/// Numeric value of a threshold field.
///
/// `cost` may carry a leading currency symbol and thousands separators.
pub fn coerce_threshold(field: &str, value: &Value) -> Result<f64, CoercionError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if field == "cost" => parse_cost(s),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| CoercionError::NotNumeric {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_cost(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let amount = trimmed
        .strip_prefix(CURRENCY_SYMBOLS)
        .unwrap_or(trimmed)
        .trim_start()
        .replace(',', "");
    amount.parse().ok()
}

fn check_threshold(
    field: &str,
    value: &Value,
    requested: &FilterValue,
) -> Result<bool, CoercionError> {
    let actual = coerce_threshold(field, value)?;
    let max = requested
        .as_f64()
        .ok_or_else(|| CoercionError::NotNumeric {
            field: field.to_string(),
            value: requested.to_string(),
        })?;
    Ok(actual <= max)
}

fn exact_match(value: &Value, requested: &FilterValue) -> bool {
    match value_to_text(value) {
        Some(text) => text.to_lowercase() == requested.to_string().to_lowercase(),
        None => false,
    }
}
