//! `tabstyle_io_xlsx` v1:
//! Styled XLSX export for Polars DataFrames.
//!
//! Modules:
//! - `conf`      : constants, name markers and default presets
//! - `spec`      : categories, style sets, options and report models
//! - `error`     : error type
//! - `classify`  : column classification and per-cell script detection
//! - `style`     : style registry and column width table
//! - `highlight` : per-sheet column highlight overrides
//! - `util`      : pure helper functions
//! - `writer`    : workbook writer
pub mod classify;
pub mod conf;
pub mod error;
pub mod highlight;
pub mod spec;
pub mod style;
pub mod util;
pub mod writer;

pub use classify::{
    classify_column, classify_dataframe_columns, contains_cjk, derive_cell_style_key,
    derive_column_value_type,
};
pub use conf::{derive_default_writer_options, derive_writer_options};
pub use error::ExcelStyleError;
pub use highlight::HighlightManager;
pub use spec::{
    EnumCellValue, EnumColumnValueType, EnumSemanticCategory, EnumStyleKey, SpecCellFormat,
    SpecColumnPlan, SpecColumnWidthTable, SpecExcelWriterOptions, SpecStyleSet, SpecXlsxReport,
};
pub use style::{
    StyleRegistry, derive_column_width_table, derive_default_style_set, derive_style_attributes,
};
pub use writer::{ExcelStyleWriter, plan_cell, plan_columns};
