use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::entities::column::{ColumnCallback, ColumnSet, ColumnSource};
use crate::domain::entities::query::SearchMode;
use crate::domain::entities::row::RowView;
use crate::error::ConfigError;
use crate::usecase::engine::column_set::ColumnSetBuilder;
use crate::usecase::engine::template::validate_template;

/// Validated, read-only configuration of one server-side table.
///
/// Built once and shared between requests; every request derives its own
/// [`ColumnSet`] and queries from it.
#[derive(Debug, Clone)]
pub struct DataTable {
    query: String,
    columns: ColumnSetBuilder,
    default_order: Option<String>,
    keyed: bool,
    search_mode: SearchMode,
}

impl DataTable {
    pub fn builder() -> DataTableBuilder {
        DataTableBuilder::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn column_set(&self) -> Result<ColumnSet, ConfigError> {
        self.columns.build()
    }

    pub fn virtual_columns(&self) -> &BTreeMap<String, ColumnCallback> {
        self.columns.virtual_columns()
    }

    pub fn default_order(&self) -> Option<&str> {
        self.default_order.as_deref()
    }

    pub fn keyed(&self) -> bool {
        self.keyed
    }

    pub fn lines(&self) -> bool {
        self.columns.has_lines()
    }

    pub fn search_mode(&self) -> SearchMode {
        self.search_mode
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataTableBuilder {
    query: String,
    columns: ColumnSetBuilder,
    default_order: Option<String>,
    keyed: bool,
    search_mode: SearchMode,
}

impl DataTableBuilder {
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn column(mut self, expression: impl Into<String>) -> Self {
        self.columns = self.columns.column(expression);
        self
    }

    pub fn columns<I>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = ColumnSource>,
    {
        self.columns = self.columns.columns(sources);
        self
    }

    pub fn virtual_column<F>(mut self, name: &str, callback: F) -> Self
    where
        F: Fn(&RowView<'_>) -> Value + Send + Sync + 'static,
    {
        self.columns = self.columns.virtual_column(name, callback);
        self
    }

    pub fn default_order(mut self, order: impl Into<String>) -> Self {
        let order = order.into();
        self.default_order = (!order.trim().is_empty()).then_some(order);
        self
    }

    pub fn lines(mut self, lines: bool) -> Self {
        self.columns = self.columns.lines(lines);
        self
    }

    pub fn keyed(mut self, keyed: bool) -> Self {
        self.keyed = keyed;
        self
    }

    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    pub fn build(self) -> Result<DataTable, ConfigError> {
        validate_template(&self.query)?;
        self.columns.build()?;

        Ok(DataTable {
            query: self.query,
            columns: self.columns,
            default_order: self.default_order,
            keyed: self.keyed,
            search_mode: self.search_mode,
        })
    }
}
