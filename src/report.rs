//! Human-readable output for filtered results

use std::fmt::{self, Write};

use serde_json::Value;

use crate::filter::{ConstraintKind, FilterSpec};
use crate::record::{value_to_text, HelmetRecord};

const RULE_WIDTH: usize = 60;

/// Render the filtered helmets followed by a summary of the filters applied
pub fn render_report(records: &[&HelmetRecord], spec: &FilterSpec) -> String {
    let mut out = String::new();
    // Writing to a String can't fail
    let _ = write_report(&mut out, records, spec);
    out
}

pub fn write_report<W: Write>(
    out: &mut W,
    records: &[&HelmetRecord],
    spec: &FilterSpec,
) -> fmt::Result {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    writeln!(out, "\nFiltered data ({} items):", records.len())?;
    writeln!(out, "{}", heavy)?;

    if records.is_empty() {
        return writeln!(out, "No helmets match your criteria.");
    }

    for (i, record) in records.iter().enumerate() {
        writeln!(
            out,
            "\n{}. {} - {}",
            i + 1,
            field_or(record, "brand", "Unknown"),
            field_or(record, "model", "Unknown")
        )?;
        writeln!(
            out,
            "   Score: {} | Cost: {} | Style: {}",
            field_or(record, "score", "N/A"),
            field_or(record, "cost", "N/A"),
            field_or(record, "style", "N/A")
        )?;
        writeln!(
            out,
            "   Rating: {} stars | Date: {}",
            field_or(record, "rating", "N/A"),
            field_or(record, "date", "N/A")
        )?;
        if let Some(certs) = record.get("certifications").filter(|v| has_content(v)) {
            writeln!(out, "   Certifications: {}", value_to_text(certs).unwrap_or_default())?;
        }
        writeln!(out, "{}", light)?;
    }

    writeln!(out, "\nFILTER SUMMARY:")?;
    if spec.is_empty() {
        writeln!(out, "No filters applied - showing all data")?;
    }
    for (field, value) in spec.iter() {
        match ConstraintKind::for_field(field) {
            ConstraintKind::Threshold => {
                writeln!(out, "Maximum {}: {}", capitalize(field), value)?
            }
            ConstraintKind::Exact => writeln!(out, "{}: {}", capitalize(field), value)?,
        }
    }
    writeln!(out, "Total results: {} items", records.len())?;
    writeln!(out, "{}", heavy)
}

fn field_or(record: &HelmetRecord, field: &str, fallback: &str) -> String {
    record
        .text(field)
        .unwrap_or_else(|| fallback.to_string())
}

// Null, false, zero and empty strings/lists/maps print nothing
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
