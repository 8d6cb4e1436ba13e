pub mod connection;
pub mod queries;
pub mod repo;
