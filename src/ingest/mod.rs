//! LAS ingestion: format parsing and curve categorization.

pub mod las_parser;
pub mod taxonomy;

pub use las_parser::{parse_las, LasError};
pub use taxonomy::categorize;
