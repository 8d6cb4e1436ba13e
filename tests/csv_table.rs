mod common;

use std::fs;
use std::sync::Arc;

use serde_json::json;

use datatable_ssp::infra::config::load_table;
use datatable_ssp::infra::import::csv::import_csv;
use datatable_ssp::{DataTableService, SqliteDataSource, XssSanitizer};

use common::request;

#[test]
fn imported_csv_is_served_through_file_config() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = temp_dir.path().join("app.sqlite");
    let csv_path = temp_dir.path().join("cities.csv");
    let config_path = temp_dir.path().join("cities.json");

    fs::write(
        &csv_path,
        "name,country\nParis,France\nLyon,France\nTokyo,Japan\nOsaka,Japan\n",
    )
    .expect("should write csv fixture");
    fs::write(
        &config_path,
        r#"{
            "query": "SELECT c.name, c.country FROM cities c __where__ __order__ __limit_offset__",
            "columns": ["c.name (o|s)", "c.country (o|s)"],
            "default_order": "c.name ASC",
            "keyed": true
        }"#,
    )
    .expect("should write config fixture");

    let imported = import_csv(&db_path, "cities", &csv_path).expect("import should succeed");
    assert_eq!(imported.row_count, 4);

    let table = load_table(&config_path).expect("config should load");
    let service = DataTableService::new(
        Arc::new(SqliteDataSource::new(&db_path)),
        Arc::new(XssSanitizer),
    );

    let response = service
        .respond(
            &table,
            &request(&[
                ("draw", "2"),
                ("search[value]", "<b>japan</b>"),
                ("order[0][column]", "1"),
                ("order[0][dir]", "desc"),
            ]),
        )
        .expect("request should succeed");

    assert_eq!(response.draw, 2);
    assert_eq!(response.records_filtered, 2);
    assert_eq!(
        serde_json::to_value(&response.data).expect("data should serialize"),
        json!([
            {"line": "1.", "name": "Tokyo", "country": "Japan"},
            {"line": "2.", "name": "Osaka", "country": "Japan"},
        ])
    );
}
