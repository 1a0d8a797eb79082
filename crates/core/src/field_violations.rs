use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Field name to human-readable violation message.
///
/// Serializes as a flat JSON object so it can be returned to form clients
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldViolations(BTreeMap<String, String>);

impl FieldViolations {
    /// Creates an empty violation set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation, replacing any earlier message for the same field.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Returns the message recorded for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns whether a violation is recorded for a field.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns true when no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violating fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Consumes the set into its underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl Display for FieldViolations {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for field in self.0.keys() {
            if !first {
                formatter.write_str(", ")?;
            }
            formatter.write_str(field)?;
            first = false;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FieldViolations;

    #[test]
    fn serializes_as_flat_object() {
        let mut violations = FieldViolations::new();
        violations.insert("email", "Please enter a valid email address");

        let json = serde_json::to_value(&violations).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({"email": "Please enter a valid email address"}))
        );
    }

    #[test]
    fn later_insert_replaces_message() {
        let mut violations = FieldViolations::new();
        violations.insert("name", "first");
        violations.insert("name", "second");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations.get("name"), Some("second"));
    }
}
