use std::sync::Arc;

use crate::domain::entities::request::RawParams;
use crate::domain::entities::response::DataTableResponse;
use crate::error::Result;
use crate::usecase::engine::assembler::assemble;
use crate::usecase::engine::projector::project_rows;
use crate::usecase::engine::request_reader::read_parameters;
use crate::usecase::engine::table::DataTable;
use crate::usecase::engine::template::build_queries;
use crate::usecase::ports::data_source::DataSource;
use crate::usecase::ports::sanitizer::Sanitizer;

/// Answers table widget requests against an injected data source.
pub struct DataTableService {
    data_source: Arc<dyn DataSource>,
    sanitizer: Arc<dyn Sanitizer>,
}

impl DataTableService {
    pub fn new(data_source: Arc<dyn DataSource>, sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self {
            data_source,
            sanitizer,
        }
    }

    pub fn respond(&self, table: &DataTable, raw: &RawParams) -> Result<DataTableResponse> {
        let params = read_parameters(raw, self.sanitizer.as_ref());
        let columns = table.column_set()?;
        let queries = build_queries(
            table.query(),
            &params,
            &columns,
            table.default_order(),
            table.search_mode(),
        );

        let rows = self
            .data_source
            .fetch_rows(&queries.page_query, &queries.bindings)?;
        let total = self
            .data_source
            .fetch_scalar(&queries.count_sql(), &queries.bindings)?;

        let data = project_rows(
            &rows,
            &columns,
            table.virtual_columns(),
            &params,
            table.keyed(),
        )?;
        log::debug!(
            "draw {}: {} of {total} rows from offset {}",
            params.draw_token,
            data.len(),
            params.page_offset
        );

        Ok(assemble(data, total, params.draw_token))
    }

    /// Same as [`respond`](Self::respond), encoded as the JSON body.
    pub fn respond_json(&self, table: &DataTable, raw: &RawParams) -> Result<String> {
        let response = self.respond(table, raw)?;
        Ok(serde_json::to_string(&response)?)
    }
}
