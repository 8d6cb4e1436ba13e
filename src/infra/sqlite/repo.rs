use std::path::PathBuf;

use crate::domain::entities::row::RawRow;
use crate::infra::sqlite::queries::{query_rows, query_scalar};
use crate::usecase::ports::data_source::{DataAccessError, DataSource};

/// [`DataSource`] backed by a SQLite file. Each call opens its own
/// read-only connection.
#[derive(Debug, Clone)]
pub struct SqliteDataSource {
    pub db_path: PathBuf,
}

impl SqliteDataSource {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl DataSource for SqliteDataSource {
    fn fetch_rows(&self, sql: &str, bindings: &[String]) -> Result<Vec<RawRow>, DataAccessError> {
        query_rows(&self.db_path, sql, bindings)
            .map_err(|err| DataAccessError::Message(format!("{err:#}")))
    }

    fn fetch_scalar(&self, sql: &str, bindings: &[String]) -> Result<i64, DataAccessError> {
        query_scalar(&self.db_path, sql, bindings)
            .map_err(|err| DataAccessError::Message(format!("{err:#}")))
    }
}
