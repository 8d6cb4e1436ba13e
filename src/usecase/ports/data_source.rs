use crate::domain::entities::row::RawRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataAccessError {
    Message(String),
}

impl std::fmt::Display for DataAccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataAccessError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for DataAccessError {}

/// Executes resolved SQL text. `bindings` fill `?1`, `?2`, .. in order.
pub trait DataSource: Send + Sync {
    fn fetch_rows(&self, sql: &str, bindings: &[String]) -> Result<Vec<RawRow>, DataAccessError>;

    /// Runs a query returning one row with one integer column.
    fn fetch_scalar(&self, sql: &str, bindings: &[String]) -> Result<i64, DataAccessError>;
}
