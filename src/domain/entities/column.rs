use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::row::RowView;

/// Computes a display value from an already fetched row.
pub type ColumnCallback = Arc<dyn Fn(&RowView<'_>) -> Value + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColumnAttributes {
    pub hidden: bool,
    pub orderable: bool,
    pub searchable: bool,
}

impl ColumnAttributes {
    /// Sets the flag named by a single attribute token. Returns `false` for
    /// anything other than `h`, `o` or `s`.
    pub fn apply_flag(&mut self, token: &str) -> bool {
        match token {
            "h" => self.hidden = true,
            "o" => self.orderable = true,
            "s" => self.searchable = true,
            _ => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        !(self.hidden || self.orderable || self.searchable)
    }
}

/// One configured column after its declaration string has been parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDeclaration {
    /// The declaration exactly as configured.
    pub expression: String,
    /// Key used in output rows.
    pub clean_name: String,
    /// Expression placed into generated SQL.
    pub original_expression: String,
    pub attributes: ColumnAttributes,
    pub extra_search_targets: Vec<String>,
}

impl ColumnDeclaration {
    pub fn is_hidden(&self) -> bool {
        self.attributes.hidden
    }

    pub fn is_orderable(&self) -> bool {
        self.attributes.orderable
    }

    pub fn is_searchable(&self) -> bool {
        self.attributes.searchable
    }
}

/// Where a declared column gets its value from.
#[derive(Clone)]
pub enum ColumnSource {
    Real(String),
    Virtual(String, ColumnCallback),
}

impl ColumnSource {
    pub fn real(expression: impl Into<String>) -> Self {
        ColumnSource::Real(expression.into())
    }

    pub fn virtual_column<F>(key: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&RowView<'_>) -> Value + Send + Sync + 'static,
    {
        ColumnSource::Virtual(key.into(), Arc::new(callback))
    }
}

impl fmt::Debug for ColumnSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSource::Real(expression) => f.debug_tuple("Real").field(expression).finish(),
            ColumnSource::Virtual(key, _) => f.debug_tuple("Virtual").field(key).finish(),
        }
    }
}

/// Entry of [`ColumnSet::display_columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayColumn {
    LineNumber,
    Field(String),
}

impl DisplayColumn {
    pub const LINE_KEY: &'static str = "line";

    pub fn key(&self) -> &str {
        match self {
            DisplayColumn::LineNumber => Self::LINE_KEY,
            DisplayColumn::Field(name) => name,
        }
    }
}

/// The three parallel projections of the configured columns, plus the extra
/// search expressions collected from bracketed attribute lists.
///
/// `search_columns` follows declaration order while `order_columns` follows
/// display order, so the two only line up when no column is hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    pub display_columns: Vec<DisplayColumn>,
    pub search_columns: Vec<Option<String>>,
    pub order_columns: Vec<Option<String>>,
    pub extra_search_targets: Vec<String>,
}
