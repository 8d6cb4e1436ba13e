use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::entities::column::{ColumnCallback, ColumnSet, DisplayColumn};
use crate::domain::entities::request::RequestParameters;
use crate::domain::entities::response::OutputRow;
use crate::domain::entities::row::{RawRow, RowView};
use crate::error::ProjectionError;

/// Maps fetched rows onto the display columns.
///
/// Row numbers start at `page_offset + 1` and are rendered as `"{n}."`.
/// A display key that is neither virtual nor present in the row fails the
/// whole projection.
pub fn project_rows(
    rows: &[RawRow],
    columns: &ColumnSet,
    virtual_columns: &BTreeMap<String, ColumnCallback>,
    params: &RequestParameters,
    keyed: bool,
) -> Result<Vec<OutputRow>, ProjectionError> {
    let mut projected = Vec::with_capacity(rows.len());
    let mut line = params.page_offset.saturating_add(1);

    for (row_idx, row) in rows.iter().enumerate() {
        let mut values = Vec::with_capacity(columns.display_columns.len());
        for column in &columns.display_columns {
            let value = match column {
                DisplayColumn::LineNumber => Value::String(format!("{line}.")),
                DisplayColumn::Field(key) => match virtual_columns.get(key) {
                    Some(callback) => callback(&RowView::new(row, line)),
                    None => row
                        .get(key)
                        .cloned()
                        .ok_or_else(|| ProjectionError::MissingField {
                            column: key.clone(),
                            row: row_idx,
                        })?,
                },
            };
            values.push((column.key(), value));
        }

        projected.push(if keyed {
            OutputRow::Keyed(
                values
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value))
                    .collect::<Map<_, _>>(),
            )
        } else {
            OutputRow::Positional(values.into_iter().map(|(_, value)| value).collect())
        });
        line = line.saturating_add(1);
    }

    Ok(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn row(value: Value) -> RawRow {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture should be an object, got {other}"),
        }
    }

    fn columns(lines: bool, keys: &[&str]) -> ColumnSet {
        let mut display_columns = Vec::new();
        if lines {
            display_columns.push(DisplayColumn::LineNumber);
        }
        display_columns.extend(keys.iter().map(|key| DisplayColumn::Field(key.to_string())));
        ColumnSet {
            display_columns,
            ..ColumnSet::default()
        }
    }

    fn full_name() -> BTreeMap<String, ColumnCallback> {
        let callback: ColumnCallback =
            Arc::new(|row: &RowView<'_>| {
            json!(format!("{} {}", row.text("first"), row.text("last")))
        });
        BTreeMap::from([("full_name".to_string(), callback)])
    }

    #[test]
    fn line_numbers_start_after_offset_and_step_by_one() {
        let rows = vec![
            row(json!({"a": 1, "b": 2, "c": 3})),
            row(json!({"a": 4, "b": 5, "c": 6})),
            row(json!({"a": 7, "b": 8, "c": 9})),
        ];
        let params = RequestParameters {
            page_offset: 20,
            ..RequestParameters::default()
        };

        let projected = project_rows(&rows, &columns(true, &["a", "b", "c"]), &BTreeMap::new(), &params, false)
            .expect("projection should succeed");

        let lines: Vec<_> = projected.iter().map(|row| row.values()[0].clone()).collect();
        assert_eq!(lines, vec![json!("21."), json!("22."), json!("23.")]);
    }

    #[test]
    fn huge_offsets_saturate_instead_of_overflowing() {
        let rows = vec![row(json!({"a": 1})), row(json!({"a": 2}))];
        let params = RequestParameters {
            page_limit: -1,
            page_offset: i64::MAX - 1,
            ..RequestParameters::default()
        };

        let projected = project_rows(&rows, &columns(true, &["a"]), &BTreeMap::new(), &params, false)
            .expect("projection should succeed");

        let lines: Vec<_> = projected.iter().map(|row| row.values()[0].clone()).collect();
        let last = format!("{}.", i64::MAX);
        assert_eq!(lines, vec![json!(last.clone()), json!(last)]);
    }

    #[test]
    fn virtual_column_is_computed_from_the_row() {
        let rows = vec![row(json!({"first": "A", "last": "B"}))];

        let projected = project_rows(
            &rows,
            &columns(false, &["first", "full_name"]),
            &full_name(),
            &RequestParameters::default(),
            false,
        )
        .expect("projection should succeed");

        assert_eq!(projected, vec![OutputRow::Positional(vec![json!("A"), json!("A B")])]);
    }

    #[test]
    fn keyed_and_positional_rows_hold_the_same_values() {
        let rows = vec![row(json!({"email": "a@x", "name": "Ann", "first": "A", "last": "N"}))];
        let set = columns(true, &["name", "email", "full_name"]);
        let params = RequestParameters::default();

        let positional = project_rows(&rows, &set, &full_name(), &params, false)
            .expect("positional projection should succeed");
        let keyed = project_rows(&rows, &set, &full_name(), &params, true)
            .expect("keyed projection should succeed");

        assert_eq!(
            positional[0],
            OutputRow::Positional(vec![json!("1."), json!("Ann"), json!("a@x"), json!("A N")])
        );
        let OutputRow::Keyed(map) = &keyed[0] else {
            panic!("expected keyed row");
        };
        assert_eq!(
            map.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["line", "name", "email", "full_name"]
        );
        assert_eq!(positional[0].values(), keyed[0].values());
    }

    #[test]
    fn virtual_column_sees_the_line_number() {
        let rows = vec![row(json!({"id": 1})), row(json!({"id": 2}))];
        let callback: ColumnCallback = Arc::new(|row: &RowView<'_>| json!(row.line() * 10));
        let virtuals = BTreeMap::from([("rank".to_string(), callback)]);
        let params = RequestParameters {
            page_offset: 4,
            ..RequestParameters::default()
        };

        let projected = project_rows(&rows, &columns(false, &["rank"]), &virtuals, &params, false)
            .expect("projection should succeed");

        assert_eq!(
            projected,
            vec![
                OutputRow::Positional(vec![json!(50)]),
                OutputRow::Positional(vec![json!(60)]),
            ]
        );
    }

    #[test]
    fn missing_field_is_an_error() {
        let rows = vec![row(json!({"name": "Ann"})), row(json!({"nick": "B"}))];

        let result = project_rows(
            &rows,
            &columns(true, &["name"]),
            &BTreeMap::new(),
            &RequestParameters::default(),
            true,
        );

        assert_eq!(
            result,
            Err(ProjectionError::MissingField {
                column: "name".to_string(),
                row: 1,
            })
        );
    }

    #[test]
    fn null_values_are_kept() {
        let rows = vec![row(json!({"name": null}))];

        let projected = project_rows(
            &rows,
            &columns(false, &["name"]),
            &BTreeMap::new(),
            &RequestParameters::default(),
            false,
        )
        .expect("projection should succeed");

        assert_eq!(projected, vec![OutputRow::Positional(vec![Value::Null])]);
    }
}
