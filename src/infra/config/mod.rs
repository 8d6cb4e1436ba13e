use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::domain::entities::query::SearchMode;
use crate::error::ConfigError;
use crate::usecase::engine::table::{DataTable, DataTableBuilder};

/// File form of a table configuration. Virtual columns are code-only and
/// can be added to the builder returned by [`TableConfig::into_builder`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub query: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub default_order: Option<String>,
    #[serde(default = "default_lines")]
    pub lines: bool,
    #[serde(default)]
    pub keyed: bool,
    #[serde(default)]
    pub search_mode: SearchMode,
}

fn default_lines() -> bool {
    true
}

impl TableConfig {
    pub fn from_json(text: &str, path: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn into_builder(self) -> DataTableBuilder {
        let mut builder = DataTable::builder()
            .query(self.query)
            .lines(self.lines)
            .keyed(self.keyed)
            .search_mode(self.search_mode);
        for column in self.columns {
            builder = builder.column(column);
        }
        if let Some(order) = self.default_order {
            builder = builder.default_order(order);
        }
        builder
    }
}

pub fn load_table_config(path: &Path) -> Result<TableConfig, ConfigError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    TableConfig::from_json(&text, &display)
}

/// Reads and validates a table configuration file.
pub fn load_table(path: &Path) -> Result<DataTable, ConfigError> {
    load_table_config(path)?.into_builder().build()
}

pub fn default_db_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "datatable", "datatable-ssp")
        .ok_or_else(|| anyhow!("failed to resolve data directory"))?;
    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create data dir: {}", data_dir.display()))?;
    Ok(data_dir.join("datatable.sqlite"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = TableConfig::from_json(
            r#"{"query": "SELECT * FROM t __where__", "columns": ["name (s)"]}"#,
            "inline",
        )
        .expect("config should parse");

        assert!(config.lines);
        assert!(!config.keyed);
        assert_eq!(config.default_order, None);
        assert_eq!(config.search_mode, SearchMode::Bound);
    }

    #[test]
    fn full_config_builds_a_table() {
        let config = TableConfig::from_json(
            r#"{
                "query": "SELECT * FROM t __where__ __order__ __limit_offset__",
                "columns": ["t.name (o|s)", "t.city (s)"],
                "default_order": "t.name ASC",
                "lines": false,
                "keyed": true,
                "search_mode": "inline"
            }"#,
            "inline",
        )
        .expect("config should parse");

        let table = config.into_builder().build().expect("table should build");

        assert!(!table.lines());
        assert!(table.keyed());
        assert_eq!(table.search_mode(), SearchMode::Inline);
        assert_eq!(table.default_order(), Some("t.name ASC"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = TableConfig::from_json(
            r#"{"query": "SELECT 1", "columns": [], "colums": []}"#,
            "inline",
        );

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn load_table_reports_missing_file() {
        let temp_dir = tempfile::tempdir().expect("should create temp dir");
        let result = load_table(&temp_dir.path().join("missing.json"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn load_table_validates_template() {
        let temp_dir = tempfile::tempdir().expect("should create temp dir");
        let path = temp_dir.path().join("table.json");
        fs::write(
            &path,
            r#"{"query": "SELECT * FROM t __where__ __where__", "columns": ["name"]}"#,
        )
        .expect("should write config");

        let result = load_table(&path);

        assert!(matches!(result, Err(ConfigError::DuplicatePlaceholder(_))));
    }
}
