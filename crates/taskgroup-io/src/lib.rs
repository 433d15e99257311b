//! # taskgroup-io
//!
//! The file-side collaborators of the pipeline: find the input CSV, detect
//! its encoding, read it into [`Record`](taskgroup_core::Record)s, and write
//! the annotated result as UTF-8 with a BOM.

pub mod discovery;
pub mod encoding;
pub mod reader;
pub mod writer;

pub use discovery::find_csv;
pub use encoding::{decode, detect_encoding};
pub use reader::{read_records, validate_columns, InputTable};
pub use writer::{output_file_name, write_records, WriteOptions};
