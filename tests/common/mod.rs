#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tempfile::TempDir;

pub struct Fixture {
    _dir: TempDir,
    pub db_path: PathBuf,
}

/// Creates a database with `users` and `teams` tables.
pub fn users_db() -> Fixture {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = dir.path().join("app.sqlite");
    seed(&db_path);
    Fixture { _dir: dir, db_path }
}

fn seed(db_path: &Path) {
    let conn = Connection::open(db_path).expect("should open sqlite db");
    conn.execute_batch(
        "
        CREATE TABLE teams (
            id    INTEGER PRIMARY KEY,
            title TEXT NOT NULL
        );
        CREATE TABLE users (
            id      INTEGER PRIMARY KEY,
            first   TEXT NOT NULL,
            last    TEXT NOT NULL,
            email   TEXT,
            score   REAL,
            team_id INTEGER REFERENCES teams(id)
        );
        INSERT INTO teams(id, title) VALUES (1, 'Platform'), (2, 'Growth');
        ",
    )
    .expect("schema should be created");

    let users = [
        ("Ada", "Lovelace", Some("ada@example.com"), 9.5, 1),
        ("Alan", "Turing", Some("alan@example.com"), 8.0, 1),
        ("Grace", "Hopper", Some("grace@navy.mil"), 9.0, 2),
        ("Edsger", "Dijkstra", None, 7.5, 2),
        ("Barbara", "Liskov", Some("liskov@mit.edu"), 8.5, 1),
        ("Don", "Knuth", Some("knuth_100%@stanford.edu"), 9.9, 2),
    ];
    let mut insert = conn
        .prepare("INSERT INTO users(first, last, email, score, team_id) VALUES (?1, ?2, ?3, ?4, ?5)")
        .expect("insert should prepare");
    for (first, last, email, score, team) in users {
        insert
            .execute(params![first, last, email, score, team])
            .expect("user should insert");
    }
}

pub fn request(pairs: &[(&str, &str)]) -> datatable_ssp::RawParams {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
