use crate::domain::entities::response::{DataTableResponse, OutputRow};

/// `total` is the filtered count and fills both record totals.
pub fn assemble(rows: Vec<OutputRow>, total: i64, draw_token: i64) -> DataTableResponse {
    DataTableResponse {
        draw: draw_token,
        records_total: total,
        records_filtered: total,
        data: rows,
    }
}
