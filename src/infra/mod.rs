pub mod config;
pub mod import;
pub mod sanitize;
pub mod sqlite;
