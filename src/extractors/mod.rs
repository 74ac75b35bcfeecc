//! Dataset extraction
//!
//! Turns the raw `bicycleData.js` script text into helmet records.

mod js_extractor;

pub use js_extractor::repair_js_literal;

use tracing::debug;

use crate::error::ExtractionError;
use crate::record::HelmetRecord;

/// Identifier the dataset array is bound to in the published script
pub const DATA_IDENTIFIER: &str = "bicycleDataRaw";

/// Extract helmet records from the published script text
pub fn extract_records(js_code: &str) -> Result<Vec<HelmetRecord>, ExtractionError> {
    extract_records_named(js_code, DATA_IDENTIFIER)
}

/// Extract records from the array literal bound to `identifier`.
///
/// Records come back in source order. An empty array gives an empty vector.
pub fn extract_records_named(
    js_code: &str,
    identifier: &str,
) -> Result<Vec<HelmetRecord>, ExtractionError> {
    let literal = js_extractor::locate_array_literal(js_code, identifier)?;
    debug!("Located {} literal ({} bytes)", identifier, literal.len());

    // Try parsing as-is first
    if let Ok(records) = serde_json::from_str::<Vec<HelmetRecord>>(literal) {
        return Ok(records);
    }

    let json_text = repair_js_literal(literal);
    let records: Vec<HelmetRecord> = serde_json::from_str(&json_text)?;
    Ok(records)
}
