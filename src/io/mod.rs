pub mod json_writer;
pub mod summary;
pub mod tsv_reader;
pub mod tsv_writer;
pub mod validate;
