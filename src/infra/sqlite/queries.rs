use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::types::ValueRef;
use serde_json::Value;

use crate::domain::entities::row::RawRow;
use crate::infra::sqlite::connection::open_read_only;

/// Runs `sql` with `bindings` as `?1`, `?2`, .. and returns every row keyed
/// by result column name.
pub fn query_rows(db_path: &Path, sql: &str, bindings: &[String]) -> Result<Vec<RawRow>> {
    let conn = open_read_only(db_path)?;
    let mut stmt = conn
        .prepare(sql)
        .with_context(|| format!("failed to prepare page query: {sql}"))?;
    let names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = stmt
        .query(rusqlite::params_from_iter(bindings.iter()))
        .context("failed to run page query")?;

    let mut fetched = Vec::new();
    while let Some(row) = rows.next().context("failed to read page row")? {
        let mut raw = RawRow::new();
        for (idx, name) in names.iter().enumerate() {
            let value = row
                .get_ref(idx)
                .with_context(|| format!("failed to read column {name}"))?;
            raw.insert(name.clone(), to_json(value));
        }
        fetched.push(raw);
    }

    Ok(fetched)
}

/// Runs a query that yields a single integer, such as a wrapped count.
pub fn query_scalar(db_path: &Path, sql: &str, bindings: &[String]) -> Result<i64> {
    let conn = open_read_only(db_path)?;
    conn.query_row(sql, rusqlite::params_from_iter(bindings.iter()), |row| {
        row.get::<_, i64>(0)
    })
    .with_context(|| format!("failed to run count query: {sql}"))
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(number) => Value::from(number),
        ValueRef::Real(number) => serde_json::Number::from_f64(number)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(text) => Value::String(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Blob(bytes) => Value::String(hex::encode(bytes)),
    }
}
