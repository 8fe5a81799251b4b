//! Stateless helpers shared by the sheet writer.

use polars::prelude::{AnyValue, TimeUnit};
use rust_xlsxwriter::{ColNum, RowNum};

use crate::conf::{C_NEGINF_TEXT, C_POSINF_TEXT, N_DAYS_EXCEL_EPOCH_TO_UNIX, N_SECONDS_PER_DAY};
use crate::error::{ExcelStyleError, Result};
use crate::spec::EnumCellValue;

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Normalize one Polars value for writing.
///
/// Nulls and `NaN` become [`EnumCellValue::None`]; infinities become text;
/// dates and datetimes become Excel serial numbers. Datetimes are written as
/// UTC wall-clock time; a column time zone is ignored.
pub fn convert_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => {
            EnumCellValue::String(if val { "True" } else { "False" }.to_string())
        }
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int128(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => convert_float(val as f64),
        AnyValue::Float64(val) => convert_float(val),
        AnyValue::Date(n_days) => {
            EnumCellValue::Number(n_days as f64 + N_DAYS_EXCEL_EPOCH_TO_UNIX)
        }
        AnyValue::Datetime(n_ticks, time_unit, _tz) => {
            EnumCellValue::Number(convert_datetime_to_excel_serial(n_ticks, time_unit))
        }
        _ => EnumCellValue::Opaque(value.to_string()),
    }
}

fn convert_float(x: f64) -> EnumCellValue {
    if x.is_nan() {
        EnumCellValue::None
    } else if x.is_infinite() {
        EnumCellValue::String(
            if x.is_sign_positive() {
                C_POSINF_TEXT
            } else {
                C_NEGINF_TEXT
            }
            .to_string(),
        )
    } else {
        EnumCellValue::Number(x)
    }
}

/// Convert a Unix timestamp in `time_unit` ticks to an Excel serial date.
pub fn convert_datetime_to_excel_serial(n_ticks: i64, time_unit: TimeUnit) -> f64 {
    let n_ticks_per_second = match time_unit {
        TimeUnit::Nanoseconds => 1_000_000_000.0,
        TimeUnit::Microseconds => 1_000_000.0,
        TimeUnit::Milliseconds => 1_000.0,
    };
    n_ticks as f64 / n_ticks_per_second / N_SECONDS_PER_DAY + N_DAYS_EXCEL_EPOCH_TO_UNIX
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region IndexCasting

pub fn cast_row_num(value: usize) -> Result<RowNum> {
    RowNum::try_from(value).map_err(|_| ExcelStyleError::IndexOverflow { axis: "row", value })
}

pub fn cast_col_num(value: usize) -> Result<ColNum> {
    ColNum::try_from(value).map_err(|_| ExcelStyleError::IndexOverflow {
        axis: "column",
        value,
    })
}

/// Validate an inclusive `start..=end` range.
pub fn validate_range(axis: &'static str, start: usize, end: usize) -> Result<()> {
    if start > end {
        return Err(ExcelStyleError::InvalidRange { axis, start, end });
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
