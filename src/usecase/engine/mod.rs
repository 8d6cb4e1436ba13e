pub mod assembler;
pub mod column_set;
pub mod column_spec;
pub mod projector;
pub mod request_reader;
pub mod table;
pub mod template;
