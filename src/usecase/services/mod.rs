pub mod datatable_service;
