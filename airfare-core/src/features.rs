use serde::{Deserialize, Serialize};
use std::fmt;

/// A single model input value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl FeatureValue {
    /// Numeric view used by purely numeric models. Text is accepted when it
    /// holds a number (e.g. a year stored as `"2024"`).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            FeatureValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Number(n) => write!(f, "{}", n),
            FeatureValue::Flag(b) => write!(f, "{}", b),
            FeatureValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Number(value)
    }
}

impl From<u32> for FeatureValue {
    fn from(value: u32) -> Self {
        FeatureValue::Number(value as f64)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Number(value as f64)
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Flag(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Text(value)
    }
}

/// One row of named features, kept in insertion order.
///
/// Column order matters for models that consume positional input, so the row
/// never reorders its entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: impl Into<FeatureValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Replaces an existing column in place, or appends a new one
    pub fn set(&mut self, name: &str, value: impl Into<FeatureValue>) {
        let value = value.into();
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.columns.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn remove(&mut self, name: &str) -> Option<FeatureValue> {
        let idx = self.columns.iter().position(|(n, _)| n == name)?;
        Some(self.columns.remove(idx).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Appends every column of `other` after this row's columns
    pub fn extend(&mut self, other: FeatureRow) {
        for (name, value) in other.columns {
            self.set(&name, value);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A batch of feature rows sharing one schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    pub rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_keeps_insertion_order() {
        let mut row = FeatureRow::new()
            .with("b", 2.0)
            .with("a", "JFK")
            .with("c", true);
        row.set("b", 3.0);

        let names: Vec<&str> = row.names().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(row.get("b"), Some(&FeatureValue::Number(3.0)));
        assert_eq!(row.remove("a"), Some(FeatureValue::Text("JFK".to_string())));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(FeatureValue::from("2024").as_f64(), Some(2024.0));
        assert_eq!(FeatureValue::from(true).as_f64(), Some(1.0));
        assert_eq!(FeatureValue::from("coach").as_f64(), None);
        assert_eq!(FeatureValue::from(7u32).as_f64(), Some(7.0));
    }
}
