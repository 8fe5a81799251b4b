//! Style registry: default style set, per-column overrides and column widths.

use std::collections::BTreeMap;

use crate::conf::{
    C_NUM_FORMAT_DATE, C_NUM_FORMAT_NUMERIC, C_NUM_FORMAT_PERCENTAGE, C_NUM_FORMAT_WORK_TIME,
    N_FONT_SIZE_BASELINE, N_WIDTH_DATE, N_WIDTH_DEFAULT, N_WIDTH_NUMERIC, N_WIDTH_PERCENTAGE,
    N_WIDTH_SERIAL_ID, N_WIDTH_TEXT, N_WIDTH_WORK_TIME,
};
use crate::highlight::HighlightManager;
use crate::spec::{
    EnumSemanticCategory, EnumStyleKey, SpecCellFormat, SpecColumnWidthTable,
    SpecExcelWriterOptions, SpecStyleSet,
};

/// Font role of a style slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnumFontRole {
    Latin,
    Cjk,
    Numeric,
    /// Leave the workbook default font.
    Inherit,
}

/// Fixed attribute rules per slot: `(font role, align, num format, bold)`.
fn derive_slot_rule(
    key: EnumStyleKey,
) -> (EnumFontRole, &'static str, Option<&'static str>, bool) {
    match key {
        EnumStyleKey::Header => (EnumFontRole::Cjk, "center", None, true),
        EnumStyleKey::Date => (EnumFontRole::Numeric, "right", Some(C_NUM_FORMAT_DATE), false),
        EnumStyleKey::SerialId => (EnumFontRole::Numeric, "left", None, true),
        EnumStyleKey::Numeric => (
            EnumFontRole::Numeric,
            "right",
            Some(C_NUM_FORMAT_NUMERIC),
            false,
        ),
        EnumStyleKey::Percentage => (
            EnumFontRole::Numeric,
            "right",
            Some(C_NUM_FORMAT_PERCENTAGE),
            false,
        ),
        EnumStyleKey::WorkTime => (
            EnumFontRole::Numeric,
            "right",
            Some(C_NUM_FORMAT_WORK_TIME),
            false,
        ),
        EnumStyleKey::TextCjk => (EnumFontRole::Cjk, "left", None, false),
        EnumStyleKey::TextLatin => (EnumFontRole::Latin, "left", None, false),
        EnumStyleKey::Default => (EnumFontRole::Inherit, "left", None, false),
    }
}

/// Build the format of one slot from writer options.
pub fn derive_style_attributes(
    key: EnumStyleKey,
    options: &SpecExcelWriterOptions,
) -> SpecCellFormat {
    let (font_role, align, num_format, if_bold) = derive_slot_rule(key);

    let font_name = match font_role {
        EnumFontRole::Latin => Some(options.font_latin.clone()),
        EnumFontRole::Cjk => Some(options.font_cjk.clone()),
        EnumFontRole::Numeric => Some(options.font_numeric.clone()),
        EnumFontRole::Inherit => None,
    };
    let bg_color = if key == EnumStyleKey::Header {
        options.header_bg_color.clone()
    } else {
        None
    };

    SpecCellFormat {
        font_name,
        font_size: Some(options.font_size),
        bold: if_bold.then_some(true),
        align: Some(align.to_string()),
        valign: Some("vcenter".to_string()),
        num_format: num_format.map(ToString::to_string),
        bg_color,
        font_color: None,
    }
}

/// Build the default style set used by non-highlighted columns.
pub fn derive_default_style_set(options: &SpecExcelWriterOptions) -> SpecStyleSet {
    SpecStyleSet::from_fn(|key| derive_style_attributes(key, options))
}

/// Build the category width table scaled by `font_size / 10`.
pub fn derive_column_width_table(font_size: f64) -> SpecColumnWidthTable {
    let n_ratio = font_size / N_FONT_SIZE_BASELINE;

    let widths = BTreeMap::from([
        (EnumSemanticCategory::Numeric, N_WIDTH_NUMERIC * n_ratio),
        (EnumSemanticCategory::WorkTime, N_WIDTH_WORK_TIME * n_ratio),
        (EnumSemanticCategory::Date, N_WIDTH_DATE * n_ratio),
        (EnumSemanticCategory::Percentage, N_WIDTH_PERCENTAGE * n_ratio),
        (EnumSemanticCategory::Text, N_WIDTH_TEXT * n_ratio),
        (EnumSemanticCategory::SerialId, N_WIDTH_SERIAL_ID * n_ratio),
    ]);

    SpecColumnWidthTable {
        widths,
        width_default: N_WIDTH_DEFAULT * n_ratio,
    }
}

/// Default style set plus highlight overrides.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    style_set_default: SpecStyleSet,
    highlights: HighlightManager,
}

impl StyleRegistry {
    /// Create registry with the default set derived from `options`.
    pub fn new(options: &SpecExcelWriterOptions) -> Self {
        Self {
            style_set_default: derive_default_style_set(options),
            highlights: HighlightManager::default(),
        }
    }

    /// The global default style set.
    pub fn default_style_set(&self) -> &SpecStyleSet {
        &self.style_set_default
    }

    /// Read access to highlight state.
    pub fn highlights(&self) -> &HighlightManager {
        &self.highlights
    }

    /// Highlight one column; see [`HighlightManager::mark_highlighted`].
    pub fn mark_highlighted(
        &mut self,
        sheet_name: &str,
        column_name: &str,
        bg_color: Option<&str>,
        font_color: Option<&str>,
    ) {
        self.highlights.mark_highlighted(
            sheet_name,
            column_name,
            bg_color,
            font_color,
            &self.style_set_default,
        );
    }

    /// Override set for `(sheet, column)` if highlighted, else the default set.
    pub fn resolve_style(&self, sheet_name: &str, column_name: &str) -> &SpecStyleSet {
        self.highlights
            .override_for(sheet_name, column_name)
            .unwrap_or(&self.style_set_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_set_rules() {
        let options = SpecExcelWriterOptions::default();
        let style_set = derive_default_style_set(&options);

        let fmt_header = style_set.attributes_for(EnumStyleKey::Header);
        assert_eq!(fmt_header.font_name.as_deref(), Some("宋体"));
        assert_eq!(fmt_header.bold, Some(true));
        assert_eq!(fmt_header.align.as_deref(), Some("center"));
        assert_eq!(fmt_header.bg_color.as_deref(), Some("#EEECE1"));

        let fmt_pct = style_set.attributes_for(EnumStyleKey::Percentage);
        assert_eq!(fmt_pct.num_format.as_deref(), Some("0.00%"));
        assert_eq!(fmt_pct.font_name.as_deref(), Some("Arial"));
        assert_eq!(fmt_pct.align.as_deref(), Some("right"));

        let fmt_sn = style_set.attributes_for(EnumStyleKey::SerialId);
        assert_eq!(fmt_sn.bold, Some(true));
        assert_eq!(fmt_sn.align.as_deref(), Some("left"));
        assert_eq!(fmt_sn.num_format, None);

        assert_eq!(
            style_set
                .attributes_for(EnumStyleKey::Numeric)
                .num_format
                .as_deref(),
            Some("#,##0")
        );
        assert_eq!(
            style_set
                .attributes_for(EnumStyleKey::WorkTime)
                .num_format
                .as_deref(),
            Some("#,##0.00")
        );
        assert_eq!(
            style_set
                .attributes_for(EnumStyleKey::Date)
                .num_format
                .as_deref(),
            Some("yyyy/mm/dd")
        );
        assert_eq!(
            style_set
                .attributes_for(EnumStyleKey::TextLatin)
                .font_name
                .as_deref(),
            Some("Arial")
        );
        assert_eq!(
            style_set.attributes_for(EnumStyleKey::Default).font_name,
            None
        );

        for (key, fmt) in style_set.iter() {
            assert_eq!(fmt.font_size, Some(10.0), "{key:?}");
            assert_eq!(fmt.valign.as_deref(), Some("vcenter"), "{key:?}");
            assert_eq!(fmt.font_color, None, "{key:?}");
            if key != EnumStyleKey::Header {
                assert_eq!(fmt.bg_color, None, "{key:?}");
            }
        }
    }

    #[test]
    fn test_header_bg_color_can_be_disabled() {
        let options = SpecExcelWriterOptions {
            header_bg_color: None,
            font_cjk: "楷体".to_string(),
            ..Default::default()
        };
        let fmt_header = derive_style_attributes(EnumStyleKey::Header, &options);
        assert_eq!(fmt_header.bg_color, None);
        assert_eq!(fmt_header.font_name.as_deref(), Some("楷体"));
    }

    #[test]
    fn test_width_scaling_is_linear_in_font_size() {
        let widths_10 = derive_column_width_table(10.0);
        let widths_20 = derive_column_width_table(20.0);

        assert_eq!(widths_10.width_for(EnumSemanticCategory::Numeric), 15.0);
        assert_eq!(widths_10.width_for(EnumSemanticCategory::Percentage), 8.0);
        assert_eq!(widths_10.width_default, 10.0);

        for (category, n_width) in &widths_10.widths {
            assert_eq!(widths_20.width_for(*category), n_width * 2.0);
        }
        assert_eq!(widths_20.width_default, widths_10.width_default * 2.0);
    }

    #[test]
    fn test_width_lookup_falls_back_to_default() {
        let mut widths = derive_column_width_table(10.0);
        widths.widths.remove(&EnumSemanticCategory::Date);
        assert_eq!(widths.width_for(EnumSemanticCategory::Date), 10.0);
    }

    #[test]
    fn test_resolve_style_uses_override_only_for_marked_sheet() {
        let mut registry = StyleRegistry::new(&SpecExcelWriterOptions::default());
        registry.mark_highlighted("A", "姓名", Some("#FFFF00"), None);

        let style_a = registry.resolve_style("A", "姓名");
        assert_eq!(
            style_a
                .attributes_for(EnumStyleKey::TextCjk)
                .bg_color
                .as_deref(),
            Some("#FFFF00")
        );
        assert_eq!(registry.resolve_style("B", "姓名"), registry.default_style_set());
        assert_eq!(registry.resolve_style("A", "工号"), registry.default_style_set());
    }
}
