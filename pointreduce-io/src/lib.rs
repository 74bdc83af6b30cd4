//! pointreduce-io: File I/O for pointreduce.
//!
//! Reads point batches from CSV or JSON and writes reduction results as CSV,
//! JSON, binary records or a plain-text report.
//!

mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::{parse_csv_points, parse_json_points, read_points, PointFormat};
pub use writer::ReductionWriter;
