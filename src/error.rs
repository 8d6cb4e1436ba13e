use thiserror::Error;

use crate::usecase::ports::data_source::DataAccessError;

/// Problems with long-lived table configuration, reported when the table is built.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("query template is empty")]
    EmptyTemplate,

    #[error("placeholder {0} appears more than once in the query template")]
    DuplicatePlaceholder(&'static str),

    #[error("unknown placeholder {0} in the query template")]
    UnknownPlaceholder(String),

    #[error("column {0:?} is displayed more than once")]
    DuplicateColumn(String),

    #[error("failed to read table config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse table config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A fetched row does not match the configured display columns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("row {row} has no field {column:?}")]
    MissingField { column: String, row: usize },
}

/// Any failure while answering a table request. Nothing is emitted when one occurs.
#[derive(Error, Debug)]
pub enum DataTableError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    DataAccess(#[from] DataAccessError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DataTableError>;
