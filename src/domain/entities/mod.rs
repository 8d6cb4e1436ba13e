pub mod column;
pub mod query;
pub mod request;
pub mod response;
pub mod row;
