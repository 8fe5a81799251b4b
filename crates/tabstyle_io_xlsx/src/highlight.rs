//! Per-sheet column highlight registry.

use std::collections::{BTreeMap, BTreeSet};

use crate::conf::{C_HIGHLIGHT_BG_COLOR_DEFAULT, C_HIGHLIGHT_FONT_COLOR_DEFAULT};
use crate::spec::SpecStyleSet;

/// Highlighted columns by sheet, with one override style set per `(sheet, column)`.
///
/// Both maps are only written together in [`Self::mark_highlighted`], so every
/// highlighted column has an override.
#[derive(Debug, Clone, Default)]
pub struct HighlightManager {
    dict_cols_by_sheet: BTreeMap<String, BTreeSet<String>>,
    dict_style_overrides: BTreeMap<(String, String), SpecStyleSet>,
}

impl HighlightManager {
    /// Mark `(sheet, column)` highlighted with colors applied over `style_set_base`.
    ///
    /// Repeated calls replace the stored override (last write wins).
    pub fn mark_highlighted(
        &mut self,
        sheet_name: &str,
        column_name: &str,
        bg_color: Option<&str>,
        font_color: Option<&str>,
        style_set_base: &SpecStyleSet,
    ) {
        let bg_color = bg_color.unwrap_or(C_HIGHLIGHT_BG_COLOR_DEFAULT);
        let font_color = font_color.unwrap_or(C_HIGHLIGHT_FONT_COLOR_DEFAULT);
        let style_set = style_set_base.with_colors(bg_color, font_color);

        self.dict_cols_by_sheet
            .entry(sheet_name.to_string())
            .or_default()
            .insert(column_name.to_string());
        self.dict_style_overrides
            .insert((sheet_name.to_string(), column_name.to_string()), style_set);

        tracing::debug!(
            sheet = sheet_name,
            column = column_name,
            bg_color,
            font_color,
            "highlighted column"
        );
    }

    /// Whether `(sheet, column)` is highlighted.
    pub fn is_highlighted(&self, sheet_name: &str, column_name: &str) -> bool {
        self.dict_cols_by_sheet
            .get(sheet_name)
            .is_some_and(|set_cols| set_cols.contains(column_name))
    }

    /// Highlighted column names of a sheet, sorted.
    pub fn highlighted_columns(&self, sheet_name: &str) -> Vec<String> {
        self.dict_cols_by_sheet
            .get(sheet_name)
            .map(|set_cols| set_cols.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Override style set of `(sheet, column)`, if highlighted.
    pub fn override_for(&self, sheet_name: &str, column_name: &str) -> Option<&SpecStyleSet> {
        self.dict_style_overrides
            .get(&(sheet_name.to_string(), column_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{EnumStyleKey, SpecExcelWriterOptions};
    use crate::style::derive_default_style_set;

    fn base() -> SpecStyleSet {
        derive_default_style_set(&SpecExcelWriterOptions::default())
    }

    #[test]
    fn test_mark_highlighted_uses_default_colors() {
        let style_set_base = base();
        let mut manager = HighlightManager::default();
        manager.mark_highlighted("T1", "判断", None, None, &style_set_base);

        assert!(manager.is_highlighted("T1", "判断"));
        let style_set = manager.override_for("T1", "判断").unwrap();
        for (key, fmt) in style_set.iter() {
            assert_eq!(fmt.bg_color.as_deref(), Some("#EEECE1"), "{key:?}");
            assert_eq!(fmt.font_color.as_deref(), Some("#000000"), "{key:?}");
        }
    }

    #[test]
    fn test_override_keeps_non_color_attributes() {
        let style_set_base = base();
        let mut manager = HighlightManager::default();
        manager.mark_highlighted("T1", "占比%", Some("#FFFF00"), Some("#9B3519"), &style_set_base);

        let style_set = manager.override_for("T1", "占比%").unwrap();
        for (key, fmt) in style_set.iter() {
            let fmt_base = style_set_base.attributes_for(key);
            assert_eq!(fmt.font_name, fmt_base.font_name);
            assert_eq!(fmt.font_size, fmt_base.font_size);
            assert_eq!(fmt.align, fmt_base.align);
            assert_eq!(fmt.valign, fmt_base.valign);
            assert_eq!(fmt.num_format, fmt_base.num_format);
            assert_eq!(fmt.bold, fmt_base.bold);
            assert_eq!(fmt.bg_color.as_deref(), Some("#FFFF00"));
            assert_eq!(fmt.font_color.as_deref(), Some("#9B3519"));
        }
    }

    #[test]
    fn test_second_mark_overwrites_first() {
        let style_set_base = base();
        let mut manager = HighlightManager::default();
        manager.mark_highlighted("T1", "姓名", Some("#FFFF00"), None, &style_set_base);
        manager.mark_highlighted("T1", "姓名", Some("#00FF00"), Some("#FF0000"), &style_set_base);

        assert_eq!(manager.highlighted_columns("T1"), vec!["姓名".to_string()]);
        let fmt = manager
            .override_for("T1", "姓名")
            .unwrap()
            .attributes_for(EnumStyleKey::TextCjk);
        assert_eq!(fmt.bg_color.as_deref(), Some("#00FF00"));
        assert_eq!(fmt.font_color.as_deref(), Some("#FF0000"));
    }

    #[test]
    fn test_highlight_is_scoped_per_sheet() {
        let style_set_base = base();
        let mut manager = HighlightManager::default();
        manager.mark_highlighted("A", "姓名", None, None, &style_set_base);

        assert!(manager.is_highlighted("A", "姓名"));
        assert!(!manager.is_highlighted("B", "姓名"));
        assert!(manager.override_for("B", "姓名").is_none());
        assert!(manager.highlighted_columns("B").is_empty());
    }
}
