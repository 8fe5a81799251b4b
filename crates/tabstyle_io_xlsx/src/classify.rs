//! Column classification by header name and value type.
//!
//! Name markers are checked before the numeric dtype so that, for example,
//! an integer `工号` column is styled as an identifier rather than a quantity.

use polars::prelude::{DataFrame, DataType};

use crate::conf::{
    N_CJK_UNIFIED_END, N_CJK_UNIFIED_START, TUP_MARKERS_PERCENTAGE, TUP_MARKERS_SERIAL_ID,
    TUP_MARKERS_WORK_TIME,
};
use crate::spec::{EnumCellValue, EnumColumnValueType, EnumSemanticCategory, EnumStyleKey};

/// Deduce the semantic category of one column. First matching rule wins.
pub fn classify_column(
    column_name: &str,
    if_is_date: bool,
    if_is_numeric: bool,
) -> EnumSemanticCategory {
    if if_is_date {
        return EnumSemanticCategory::Date;
    }
    if contains_any(column_name, &TUP_MARKERS_PERCENTAGE) {
        return EnumSemanticCategory::Percentage;
    }
    if contains_any(column_name, &TUP_MARKERS_SERIAL_ID) {
        return EnumSemanticCategory::SerialId;
    }
    if contains_any(column_name, &TUP_MARKERS_WORK_TIME) {
        return EnumSemanticCategory::WorkTime;
    }
    if if_is_numeric {
        return EnumSemanticCategory::Numeric;
    }
    EnumSemanticCategory::Text
}

/// Map a Polars dtype to the classifier's value type.
pub fn derive_column_value_type(dtype: &DataType) -> EnumColumnValueType {
    match dtype {
        DataType::Date | DataType::Datetime(_, _) => EnumColumnValueType::Date,
        dtype if dtype.is_numeric() => EnumColumnValueType::Numeric,
        _ => EnumColumnValueType::Text,
    }
}

/// Classify every column of `df`, in column order.
pub fn classify_dataframe_columns(df: &DataFrame) -> Vec<EnumSemanticCategory> {
    df.get_columns()
        .iter()
        .map(|c_col| {
            let value_type = derive_column_value_type(c_col.dtype());
            let category = classify_column(
                c_col.name().as_str(),
                value_type == EnumColumnValueType::Date,
                value_type == EnumColumnValueType::Numeric,
            );
            tracing::debug!(column = %c_col.name(), ?value_type, ?category, "classified column");
            category
        })
        .collect()
}

/// True when `text` has at least one CJK Unified Ideograph.
pub fn contains_cjk(text: &str) -> bool {
    text.chars()
        .any(|chr| (N_CJK_UNIFIED_START..=N_CJK_UNIFIED_END).contains(&(chr as u32)))
}

/// Pick the style slot for one non-missing cell of a column in `category`.
///
/// Text cells are split by script per cell since a text column may mix both.
pub fn derive_cell_style_key(category: EnumSemanticCategory, value: &EnumCellValue) -> EnumStyleKey {
    match category {
        EnumSemanticCategory::Date => EnumStyleKey::Date,
        EnumSemanticCategory::SerialId => EnumStyleKey::SerialId,
        EnumSemanticCategory::Numeric => EnumStyleKey::Numeric,
        EnumSemanticCategory::Percentage => EnumStyleKey::Percentage,
        EnumSemanticCategory::WorkTime => EnumStyleKey::WorkTime,
        EnumSemanticCategory::Text => match value {
            EnumCellValue::String(s) if contains_cjk(s) => EnumStyleKey::TextCjk,
            EnumCellValue::String(_) | EnumCellValue::Number(_) => EnumStyleKey::TextLatin,
            EnumCellValue::Opaque(_) | EnumCellValue::None => EnumStyleKey::Default,
        },
    }
}

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, TimeUnit};

    use super::*;

    #[test]
    fn test_percent_marker_wins_over_numeric_dtype() {
        for name in ["占比%", "%", "growth %", "完成率", "占比％"] {
            assert_eq!(
                classify_column(name, false, true),
                EnumSemanticCategory::Percentage
            );
            assert_eq!(
                classify_column(name, false, false),
                EnumSemanticCategory::Percentage
            );
        }
    }

    #[test]
    fn test_date_dtype_overrides_every_name_rule() {
        for name in ["占比%", "工号", "工时", "yr", "入职日期"] {
            assert_eq!(classify_column(name, true, false), EnumSemanticCategory::Date);
            assert_eq!(classify_column(name, true, true), EnumSemanticCategory::Date);
        }
    }

    #[test]
    fn test_rule_order_and_fallthrough() {
        assert_eq!(
            classify_column("员工工号", false, true),
            EnumSemanticCategory::SerialId
        );
        assert_eq!(
            classify_column("项目编码", false, false),
            EnumSemanticCategory::SerialId
        );
        // Percent is checked before identifier markers.
        assert_eq!(
            classify_column("编号%", false, false),
            EnumSemanticCategory::Percentage
        );
        assert_eq!(
            classify_column("tenure_yr", false, true),
            EnumSemanticCategory::WorkTime
        );
        assert_eq!(
            classify_column("累计工时", false, false),
            EnumSemanticCategory::WorkTime
        );
        assert_eq!(
            classify_column("amount", false, true),
            EnumSemanticCategory::Numeric
        );
        assert_eq!(
            classify_column("姓名", false, false),
            EnumSemanticCategory::Text
        );
        assert_eq!(classify_column("", false, false), EnumSemanticCategory::Text);
    }

    #[test]
    fn test_derive_column_value_type() {
        assert_eq!(
            derive_column_value_type(&DataType::Date),
            EnumColumnValueType::Date
        );
        assert_eq!(
            derive_column_value_type(&DataType::Datetime(TimeUnit::Milliseconds, None)),
            EnumColumnValueType::Date
        );
        assert_eq!(
            derive_column_value_type(&DataType::Int64),
            EnumColumnValueType::Numeric
        );
        assert_eq!(
            derive_column_value_type(&DataType::Float32),
            EnumColumnValueType::Numeric
        );
        assert_eq!(
            derive_column_value_type(&DataType::String),
            EnumColumnValueType::Text
        );
        assert_eq!(
            derive_column_value_type(&DataType::Boolean),
            EnumColumnValueType::Text
        );
    }

    #[test]
    fn test_classify_dataframe_columns() {
        let df = DataFrame::new(vec![
            Column::new("姓名".into(), ["张三", "Tom"]),
            Column::new("工号".into(), ["E001", "E002"]),
            Column::new("占比%".into(), [0.42, 0.58]),
            Column::new("人数".into(), [3i64, 4]),
            Column::new("入职日期".into(), [19_000i32, 19_001])
                .cast(&DataType::Date)
                .unwrap(),
        ])
        .unwrap();

        assert_eq!(
            classify_dataframe_columns(&df),
            vec![
                EnumSemanticCategory::Text,
                EnumSemanticCategory::SerialId,
                EnumSemanticCategory::Percentage,
                EnumSemanticCategory::Numeric,
                EnumSemanticCategory::Date,
            ]
        );
    }

    #[test]
    fn test_contains_cjk() {
        assert!(contains_cjk("张三"));
        assert!(contains_cjk("Tom 汤姆"));
        assert!(!contains_cjk("Tom"));
        assert!(!contains_cjk(""));
        assert!(!contains_cjk("１２３"));
    }

    #[test]
    fn test_derive_cell_style_key_splits_text_by_script() {
        let category = EnumSemanticCategory::Text;
        assert_eq!(
            derive_cell_style_key(category, &EnumCellValue::String("张三".to_string())),
            EnumStyleKey::TextCjk
        );
        assert_eq!(
            derive_cell_style_key(category, &EnumCellValue::String("Tom".to_string())),
            EnumStyleKey::TextLatin
        );
        assert_eq!(
            derive_cell_style_key(category, &EnumCellValue::Opaque("[1, 2]".to_string())),
            EnumStyleKey::Default
        );
        assert_eq!(
            derive_cell_style_key(
                EnumSemanticCategory::Percentage,
                &EnumCellValue::String("n/a".to_string())
            ),
            EnumStyleKey::Percentage
        );
    }
}
