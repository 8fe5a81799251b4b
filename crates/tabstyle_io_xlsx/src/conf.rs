//! XLSX styling constants, column-name marker tables and default presets.

use crate::spec::SpecExcelWriterOptions;

/// Font size that column widths are expressed at.
pub const N_FONT_SIZE_BASELINE: f64 = 10.0;

/// Days between the Excel epoch (1899-12-30) and the Unix epoch.
pub const N_DAYS_EXCEL_EPOCH_TO_UNIX: f64 = 25_569.0;
/// Seconds per day.
pub const N_SECONDS_PER_DAY: f64 = 86_400.0;

////////////////////////////////////////////////////////////////////////////////
// #region ColumnNameMarkers

/// Name markers for percentage columns (percent sign, full-width percent, "rate").
pub const TUP_MARKERS_PERCENTAGE: [&str; 3] = ["%", "％", "率"];
/// Name markers for identifier columns (employee number, serial number, code).
pub const TUP_MARKERS_SERIAL_ID: [&str; 3] = ["工号", "编号", "编码"];
/// Name markers for work-time columns (year abbreviation, work hours).
pub const TUP_MARKERS_WORK_TIME: [&str; 2] = ["yr", "工时"];

/// First code point of the CJK Unified Ideographs block.
pub const N_CJK_UNIFIED_START: u32 = 0x4E00;
/// Last code point of the CJK Unified Ideographs block.
pub const N_CJK_UNIFIED_END: u32 = 0x9FFF;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StylePresets

/// Latin text font.
pub const C_FONT_LATIN_DEFAULT: &str = "Arial";
/// CJK text font (SimSun).
pub const C_FONT_CJK_DEFAULT: &str = "宋体";
/// Font for numbers, dates and identifiers.
pub const C_FONT_NUMERIC_DEFAULT: &str = "Arial";
/// Font size in points.
pub const N_FONT_SIZE_DEFAULT: f64 = 10.0;
/// Header fill color.
pub const C_HEADER_BG_COLOR_DEFAULT: &str = "#EEECE1";

/// Highlight fill color when the caller gives none.
pub const C_HIGHLIGHT_BG_COLOR_DEFAULT: &str = "#EEECE1";
/// Highlight font color when the caller gives none.
pub const C_HIGHLIGHT_FONT_COLOR_DEFAULT: &str = "#000000";

pub const C_NUM_FORMAT_DATE: &str = "yyyy/mm/dd";
pub const C_NUM_FORMAT_NUMERIC: &str = "#,##0";
pub const C_NUM_FORMAT_WORK_TIME: &str = "#,##0.00";
pub const C_NUM_FORMAT_PERCENTAGE: &str = "0.00%";

/// Text written for positive infinity.
pub const C_POSINF_TEXT: &str = "Inf";
/// Text written for negative infinity.
pub const C_NEGINF_TEXT: &str = "-Inf";

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnWidths

/// Numeric column width at baseline font size.
pub const N_WIDTH_NUMERIC: f64 = 15.0;
/// Work-time column width at baseline font size.
pub const N_WIDTH_WORK_TIME: f64 = 10.0;
/// Date column width at baseline font size.
pub const N_WIDTH_DATE: f64 = 10.0;
/// Percentage column width at baseline font size.
pub const N_WIDTH_PERCENTAGE: f64 = 8.0;
/// Text column width at baseline font size.
pub const N_WIDTH_TEXT: f64 = 15.0;
/// Identifier column width at baseline font size.
pub const N_WIDTH_SERIAL_ID: f64 = 8.0;
/// Fallback width at baseline font size.
pub const N_WIDTH_DEFAULT: f64 = 10.0;

// #endregion
////////////////////////////////////////////////////////////////////////////////

/// Build default writer options.
pub fn derive_default_writer_options() -> SpecExcelWriterOptions {
    SpecExcelWriterOptions::default()
}

/// Build writer options from optional overrides; `None` keeps the default.
///
/// `en_font`, `ch_font` and `num_font` set the Latin, CJK and numeric fonts.
/// An empty `header_bg_color` disables the header fill.
pub fn derive_writer_options(
    en_font: Option<String>,
    ch_font: Option<String>,
    num_font: Option<String>,
    font_size: Option<f64>,
    header_bg_color: Option<String>,
    header_row_height: Option<f64>,
) -> SpecExcelWriterOptions {
    let mut cfg_options = derive_default_writer_options();
    if let Some(v) = en_font {
        cfg_options.font_latin = v;
    }
    if let Some(v) = ch_font {
        cfg_options.font_cjk = v;
    }
    if let Some(v) = num_font {
        cfg_options.font_numeric = v;
    }
    if let Some(v) = font_size {
        cfg_options.font_size = v;
    }
    if let Some(v) = header_bg_color {
        cfg_options.header_bg_color = if v.is_empty() { None } else { Some(v) };
    }
    cfg_options.header_row_height = header_row_height;
    cfg_options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_writer_options_maps_font_keywords() {
        let cfg_options = derive_writer_options(
            Some("Times New Roman".to_string()),
            Some("楷体".to_string()),
            Some("Arial".to_string()),
            Some(15.0),
            None,
            None,
        );
        assert_eq!(cfg_options.font_latin, "Times New Roman");
        assert_eq!(cfg_options.font_cjk, "楷体");
        assert_eq!(cfg_options.font_numeric, "Arial");
        assert_eq!(cfg_options.font_size, 15.0);
        assert_eq!(cfg_options.header_bg_color.as_deref(), Some("#EEECE1"));
        assert_eq!(cfg_options.header_row_height, None);
    }

    #[test]
    fn test_derive_writer_options_defaults_and_disabled_header_fill() {
        assert_eq!(
            derive_writer_options(None, None, None, None, None, None),
            derive_default_writer_options()
        );

        let cfg_options =
            derive_writer_options(None, None, None, None, Some(String::new()), Some(24.0));
        assert_eq!(cfg_options.header_bg_color, None);
        assert_eq!(cfg_options.header_row_height, Some(24.0));
        assert_eq!(cfg_options.font_cjk, "宋体");
    }
}
