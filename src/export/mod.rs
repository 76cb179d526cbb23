//! Export of collected locations.

mod csv;

pub use csv::{write_csv, CSV_HEADER};
