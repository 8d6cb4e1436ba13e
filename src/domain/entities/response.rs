use serde::Serialize;
use serde_json::{Map, Value};

/// One projected row, positional or keyed depending on configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputRow {
    Positional(Vec<Value>),
    Keyed(Map<String, Value>),
}

impl OutputRow {
    pub fn len(&self) -> usize {
        match self {
            OutputRow::Positional(values) => values.len(),
            OutputRow::Keyed(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values in display order regardless of the row shape.
    pub fn values(&self) -> Vec<&Value> {
        match self {
            OutputRow::Positional(values) => values.iter().collect(),
            OutputRow::Keyed(values) => values.values().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTableResponse {
    pub draw: i64,
    pub records_total: i64,
    pub records_filtered: i64,
    pub data: Vec<OutputRow>,
}
