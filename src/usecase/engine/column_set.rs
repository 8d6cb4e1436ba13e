use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::column::{ColumnCallback, ColumnSet, ColumnSource, DisplayColumn};
use crate::domain::entities::row::RowView;
use crate::error::ConfigError;
use crate::usecase::engine::column_spec::{clean_name, parse_column};

#[derive(Debug, Clone)]
struct Declared {
    expression: String,
    is_virtual: bool,
}

/// Collects column declarations and virtual columns in configuration order.
#[derive(Clone)]
pub struct ColumnSetBuilder {
    declarations: Vec<Declared>,
    virtual_columns: BTreeMap<String, ColumnCallback>,
    lines: bool,
}

impl Default for ColumnSetBuilder {
    fn default() -> Self {
        Self {
            declarations: Vec::new(),
            virtual_columns: BTreeMap::new(),
            lines: true,
        }
    }
}

impl ColumnSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the leading row-number column.
    pub fn lines(mut self, lines: bool) -> Self {
        self.lines = lines;
        self
    }

    pub fn has_lines(&self) -> bool {
        self.lines
    }

    pub fn column(mut self, expression: impl Into<String>) -> Self {
        self.declarations.push(Declared {
            expression: expression.into(),
            is_virtual: false,
        });
        self
    }

    /// Registers a callback for `name` without adding it to the declaration
    /// order. Useful when a real column with the same key is declared
    /// separately and should still be searched and sorted in SQL.
    pub fn virtual_column<F>(mut self, name: &str, callback: F) -> Self
    where
        F: Fn(&RowView<'_>) -> Value + Send + Sync + 'static,
    {
        self.virtual_columns
            .insert(clean_name(name), Arc::new(callback));
        self
    }

    /// Appends each source in order; virtual entries are registered and
    /// declared under their key.
    pub fn columns<I>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = ColumnSource>,
    {
        for source in sources {
            match source {
                ColumnSource::Real(expression) => {
                    self = self.column(expression);
                }
                ColumnSource::Virtual(key, callback) => {
                    self.virtual_columns.insert(clean_name(&key), callback);
                    self.declarations.push(Declared {
                        expression: key,
                        is_virtual: true,
                    });
                }
            }
        }
        self
    }

    pub fn virtual_columns(&self) -> &BTreeMap<String, ColumnCallback> {
        &self.virtual_columns
    }

    pub fn declared_expressions(&self) -> impl Iterator<Item = &str> {
        self.declarations
            .iter()
            .map(|declared| declared.expression.as_str())
    }

    /// Derives the display, search and order projections.
    ///
    /// Columns declared as virtual never reach SQL: they are neither
    /// searchable nor orderable and contribute no extra search targets.
    pub fn build(&self) -> Result<ColumnSet, ConfigError> {
        let mut set = ColumnSet::default();
        let mut displayed = HashSet::new();

        if self.lines {
            set.display_columns.push(DisplayColumn::LineNumber);
            set.search_columns.push(None);
            set.order_columns.push(None);
            displayed.insert(DisplayColumn::LINE_KEY.to_string());
        }

        for declared in &self.declarations {
            let column = parse_column(&declared.expression);
            let in_sql = !declared.is_virtual;

            if in_sql {
                for target in &column.extra_search_targets {
                    if !set.extra_search_targets.contains(target) {
                        set.extra_search_targets.push(target.clone());
                    }
                }
            }

            if !column.is_hidden() {
                if !displayed.insert(column.clean_name.clone()) {
                    return Err(ConfigError::DuplicateColumn(column.clean_name));
                }
                set.order_columns.push(
                    (in_sql && column.is_orderable()).then(|| column.original_expression.clone()),
                );
                set.display_columns
                    .push(DisplayColumn::Field(column.clean_name.clone()));
            }

            set.search_columns
                .push((in_sql && column.is_searchable()).then_some(column.original_expression));
        }

        Ok(set)
    }
}

impl std::fmt::Debug for ColumnSetBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnSetBuilder")
            .field("declarations", &self.declarations)
            .field(
                "virtual_columns",
                &self.virtual_columns.keys().collect::<Vec<_>>(),
            )
            .field("lines", &self.lines)
            .finish()
    }
}
