//! Server-side processing for table widgets.
//!
//! A [`DataTable`] pairs a SQL template containing placeholder tokens with
//! column declarations. For each request, [`DataTableService`] resolves the
//! placeholders from the widget's paging, search and sort parameters, runs
//! the page and count queries through a [`DataSource`], and projects the
//! rows into the response the widget expects.

pub mod domain;
pub mod error;
pub mod infra;
pub mod usecase;

pub use domain::entities::column::{ColumnSource, DisplayColumn};
pub use domain::entities::query::{QueryPair, SearchMode};
pub use domain::entities::request::{OrderDirection, RawParams, RequestParameters};
pub use domain::entities::response::{DataTableResponse, OutputRow};
pub use domain::entities::row::{RawRow, RowView};
pub use error::{ConfigError, DataTableError, ProjectionError};
pub use infra::sanitize::xss::{PassthroughSanitizer, XssSanitizer};
pub use infra::sqlite::repo::SqliteDataSource;
pub use usecase::engine::table::{DataTable, DataTableBuilder};
pub use usecase::ports::data_source::{DataAccessError, DataSource};
pub use usecase::ports::sanitizer::Sanitizer;
pub use usecase::services::datatable_service::DataTableService;
