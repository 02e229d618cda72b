//! Helpers shared by every form submission: lenient field decoding and
//! required-field bookkeeping.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
#[error("Missing required fields: {}", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

impl MissingFields {
    pub fn fields(&self) -> &[&'static str] {
        &self.0
    }
}

/// Collects the names of absent required fields while a form is converted
/// into its validated record.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the trimmed value, or an empty string after recording `name` as missing.
    pub fn text(&mut self, name: &'static str, value: Option<String>) -> String {
        match optional(value) {
            Some(value) => value,
            None => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    pub fn list<T>(&mut self, name: &'static str, items: Vec<T>, minimum: usize) -> Vec<T> {
        if items.len() < minimum.max(1) {
            self.missing.push(name);
        }
        items
    }

    pub fn require(&mut self, name: &'static str, satisfied: bool) {
        if !satisfied {
            self.missing.push(name);
        }
    }

    pub fn finish(self) -> Result<(), MissingFields> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(MissingFields(self.missing))
        }
    }
}

/// Trims a submitted value, treating whitespace-only input as absent.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accepts strings, numbers and booleans for a text field.
pub fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Checkbox-style field: booleans, non-zero numbers and non-empty strings
/// other than "false", "no", "off" or "0" count as set.
pub fn flag_field<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |n| n != 0.0),
        Some(Value::String(s)) => is_truthy(&s),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    })
}

pub fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "false" | "no" | "off" | "0"
    )
}
