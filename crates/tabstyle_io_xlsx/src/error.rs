use polars::prelude::PolarsError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Errors raised by the styling writer.
#[derive(Error, Debug)]
pub enum ExcelStyleError {
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("table error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Worksheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Worksheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("No table loaded. Call load_data() before write_data().")]
    NoDataLoaded,

    #[error("Cannot write after close().")]
    WorkbookClosed,

    #[error("Invalid {axis} range: start {start} > end {end}")]
    InvalidRange {
        axis: &'static str,
        start: usize,
        end: usize,
    },

    #[error("{axis} index overflow: {value}")]
    IndexOverflow { axis: &'static str, value: usize },
}

pub type Result<T> = std::result::Result<T, ExcelStyleError>;
