//! Shared styling specification models.

use std::collections::BTreeMap;

use crate::conf::{
    C_FONT_CJK_DEFAULT, C_FONT_LATIN_DEFAULT, C_FONT_NUMERIC_DEFAULT, C_HEADER_BG_COLOR_DEFAULT,
    N_FONT_SIZE_DEFAULT,
};

////////////////////////////////////////////////////////////////////////////////
// #region ColumnCategories

/// Value type of a table column, as seen by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumColumnValueType {
    /// Date or datetime values.
    Date,
    /// Integer or floating point values.
    Numeric,
    /// Anything else.
    Text,
}

/// Semantic category inferred once per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumSemanticCategory {
    /// Calendar dates.
    Date,
    /// Employee numbers, serial numbers, codes.
    SerialId,
    /// Plain quantities.
    Numeric,
    /// Ratios displayed as percent.
    Percentage,
    /// Work-time quantities with two decimals.
    WorkTime,
    /// Free text; script is decided per cell.
    Text,
}

/// Slot of a [`SpecStyleSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumStyleKey {
    Header,
    Date,
    SerialId,
    Numeric,
    Percentage,
    WorkTime,
    TextCjk,
    TextLatin,
    Default,
}

impl EnumStyleKey {
    /// All slots in storage order.
    pub const ALL: [EnumStyleKey; 9] = [
        EnumStyleKey::Header,
        EnumStyleKey::Date,
        EnumStyleKey::SerialId,
        EnumStyleKey::Numeric,
        EnumStyleKey::Percentage,
        EnumStyleKey::WorkTime,
        EnumStyleKey::TextCjk,
        EnumStyleKey::TextLatin,
        EnumStyleKey::Default,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Visual attributes of one cell style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<f64>,
    /// Bold style.
    pub bold: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Normalized cell value during the write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing value; written as an empty string without style.
    None,
    /// Text value.
    String(String),
    /// Numeric value (dates are Excel serial numbers).
    Number(f64),
    /// Nested or binary value rendered as text.
    Opaque(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleSetSpecification

/// Complete category-to-format table.
///
/// Backed by a fixed array so every [`EnumStyleKey`] resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecStyleSet {
    l_fmts: [SpecCellFormat; 9],
}

impl SpecStyleSet {
    /// Build a set by evaluating `derive_fmt` for every slot.
    pub fn from_fn(mut derive_fmt: impl FnMut(EnumStyleKey) -> SpecCellFormat) -> Self {
        Self {
            l_fmts: EnumStyleKey::ALL.map(&mut derive_fmt),
        }
    }

    /// Format stored for `key`.
    pub fn attributes_for(&self, key: EnumStyleKey) -> &SpecCellFormat {
        &self.l_fmts[key.index()]
    }

    /// Copy of this set with `bg_color`/`font_color` replaced in every slot.
    pub fn with_colors(&self, bg_color: &str, font_color: &str) -> SpecStyleSet {
        let patch = SpecCellFormat {
            bg_color: Some(bg_color.to_string()),
            font_color: Some(font_color.to_string()),
            ..Default::default()
        };
        Self::from_fn(|key| self.attributes_for(key).merge(&patch))
    }

    /// Iterate `(key, format)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (EnumStyleKey, &SpecCellFormat)> {
        EnumStyleKey::ALL.into_iter().zip(self.l_fmts.iter())
    }
}

/// Column display widths keyed by category.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecColumnWidthTable {
    /// Width per category.
    pub widths: BTreeMap<EnumSemanticCategory, f64>,
    /// Width for categories without an entry.
    pub width_default: f64,
}

impl SpecColumnWidthTable {
    /// Width for `category`, falling back to [`Self::width_default`].
    pub fn width_for(&self, category: EnumSemanticCategory) -> f64 {
        self.widths
            .get(&category)
            .copied()
            .unwrap_or(self.width_default)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriterOptions

/// Constructor-time writer options.
///
/// Values are not validated; malformed fonts or colors reach the encoder as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecExcelWriterOptions {
    /// Font for Latin-script text.
    pub font_latin: String,
    /// Font for CJK text and headers.
    pub font_cjk: String,
    /// Font for numbers, dates and identifiers.
    pub font_numeric: String,
    /// Font size in points; also scales column widths.
    pub font_size: f64,
    /// Header fill color.
    pub header_bg_color: Option<String>,
    /// Header row height; encoder default when `None`.
    pub header_row_height: Option<f64>,
}

impl Default for SpecExcelWriterOptions {
    fn default() -> Self {
        Self {
            font_latin: C_FONT_LATIN_DEFAULT.to_string(),
            font_cjk: C_FONT_CJK_DEFAULT.to_string(),
            font_numeric: C_FONT_NUMERIC_DEFAULT.to_string(),
            font_size: N_FONT_SIZE_DEFAULT,
            header_bg_color: Some(C_HEADER_BG_COLOR_DEFAULT.to_string()),
            header_row_height: None,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetPlanSpecification

/// Per-column decisions made before any cell is written.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecColumnPlan {
    /// Header text.
    pub name: String,
    /// Inferred category.
    pub category: EnumSemanticCategory,
    /// Style set resolved for this `(sheet, column)`.
    pub style_set: SpecStyleSet,
    /// Display width.
    pub width: f64,
    /// Whether an override style set is in effect.
    pub if_highlighted: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Diagnostics collected over the writer's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheets written, in order.
    pub sheets: Vec<String>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
