//! Ingestion boundary: CSV parsing and validation.
//!
//! Records are parsed and validated exactly once here; the services layer
//! only ever sees typed [`crate::models::OccupancyRecord`] values.

pub mod csv_parser;

pub use csv_parser::{parse_records, parse_records_from_path, ParseError, ParsedDataset, RowIssue};
