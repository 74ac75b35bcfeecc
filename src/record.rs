//! Helmet record type

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One helmet's attribute set as parsed from the dataset.
///
/// Not a strict schema: any field may be present or absent, and values keep
/// whatever JSON type the source used. There are no mutating methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HelmetRecord {
    fields: Map<String, Value>,
}

impl HelmetRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Text form of a field, or None when absent or null
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).and_then(value_to_text)
    }

    /// Numeric score, if present and readable as a number
    pub fn score(&self) -> Option<f64> {
        match self.get("score")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Value> for HelmetRecord {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

/// Render a JSON value the way it reads to a person: strings unquoted,
/// numbers as written. Null becomes None.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        _ => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let record = HelmetRecord::try_from(json!({
            "brand": "Giro",
            "score": 12,
            "rating": 5,
            "date": null
        }))
        .unwrap();

        assert!(record.contains("brand"));
        assert!(!record.contains("model"));
        assert_eq!(record.text("brand"), Some("Giro".to_string()));
        assert_eq!(record.text("rating"), Some("5".to_string()));
        assert_eq!(record.text("date"), None);
        assert_eq!(record.score(), Some(12.0));
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_score_from_string() {
        let record = HelmetRecord::try_from(json!({"score": " 9.5 "})).unwrap();
        assert_eq!(record.score(), Some(9.5));

        let record = HelmetRecord::try_from(json!({"score": "n/a"})).unwrap();
        assert_eq!(record.score(), None);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(HelmetRecord::try_from(json!([1, 2])).is_err());
    }
}
