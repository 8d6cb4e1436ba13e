use serde_json::{Map, Value};

use crate::domain::entities::column::DisplayColumn;

/// One row as returned by the data source, keyed by result column name.
pub type RawRow = Map<String, Value>;

/// Read-only, field-by-name view of a fetched row handed to virtual columns.
///
/// Besides the row's own fields it exposes the running row number under
/// `line`, unless the query already returned a column with that name.
pub struct RowView<'a> {
    row: &'a RawRow,
    line: Value,
}

impl<'a> RowView<'a> {
    pub fn new(row: &'a RawRow, line: i64) -> Self {
        Self {
            row,
            line: Value::from(line),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.row.get(name) {
            Some(value) => Some(value),
            None if name == DisplayColumn::LINE_KEY => Some(&self.line),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Field value rendered as display text; `null` and missing fields are empty.
    pub fn text(&self, name: &str) -> String {
        match self.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn line(&self) -> i64 {
        self.line.as_i64().unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.row.iter().map(|(name, value)| (name.as_str(), value))
    }
}
