//! Sheet writer that turns a loaded DataFrame into a styled worksheet.

use std::collections::BTreeSet;
use std::io::Cursor;
use std::path::PathBuf;

use polars::prelude::{AnyValue, DataFrame, IpcReader, SerReader};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};

use crate::classify::{classify_dataframe_columns, derive_cell_style_key};
use crate::error::{ExcelStyleError, Result};
use crate::spec::{
    EnumCellValue, EnumSemanticCategory, EnumStyleKey, SpecCellFormat, SpecColumnPlan,
    SpecColumnWidthTable, SpecExcelWriterOptions, SpecStyleSet, SpecXlsxReport,
};
use crate::style::{StyleRegistry, derive_column_width_table};
use crate::util::{cast_col_num, cast_row_num, convert_any_value, validate_range};

/// Stateful workbook writer.
///
/// Highlights must be registered before the `write_data` call they should
/// affect; styles are resolved at write time.
pub struct ExcelStyleWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    options: SpecExcelWriterOptions,
    registry: StyleRegistry,
    widths: SpecColumnWidthTable,
    df_data: Option<DataFrame>,
    set_sheet_names_existing: BTreeSet<String>,
    report: SpecXlsxReport,
    if_closed: bool,
}

impl ExcelStyleWriter {
    /// Create writer bound to output path and style options.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: PathBuf, options: SpecExcelWriterOptions) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            registry: StyleRegistry::new(&options),
            widths: derive_column_width_table(options.font_size),
            options,
            df_data: None,
            set_sheet_names_existing: BTreeSet::new(),
            report: SpecXlsxReport::default(),
            if_closed: false,
        }
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Style options the writer was built with.
    pub fn options(&self) -> &SpecExcelWriterOptions {
        &self.options
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn width_table(&self) -> &SpecColumnWidthTable {
        &self.widths
    }

    /// Return snapshot of written sheets and warnings.
    pub fn report(&self) -> SpecXlsxReport {
        self.report.clone()
    }

    pub fn warnings(&self) -> &[String] {
        &self.report.warnings
    }

    /// Set the table used by subsequent [`Self::write_data`] calls.
    pub fn load_data(&mut self, df_data: DataFrame) {
        tracing::debug!(
            height = df_data.height(),
            width = df_data.width(),
            "loaded table"
        );
        self.df_data = Some(df_data);
    }

    /// Load the table from Polars IPC bytes.
    pub fn load_data_from_ipc_bytes(&mut self, v_ipc_df: &[u8]) -> Result<()> {
        let df_data = IpcReader::new(Cursor::new(v_ipc_df)).finish()?;
        self.load_data(df_data);
        Ok(())
    }

    /// Highlight one column of one sheet. Colors default to `#EEECE1` / `#000000`.
    pub fn mark_highlighted(
        &mut self,
        sheet_name: &str,
        column_name: &str,
        bg_color: Option<&str>,
        font_color: Option<&str>,
    ) {
        self.registry
            .mark_highlighted(sheet_name, column_name, bg_color, font_color);
    }

    /// Highlight several columns of one sheet with default colors.
    pub fn mark_highlighted_columns<S: AsRef<str>>(&mut self, sheet_name: &str, column_names: &[S]) {
        for column_name in column_names {
            self.mark_highlighted(sheet_name, column_name.as_ref(), None, None);
        }
    }

    /// Write the loaded table into a new sheet named `sheet_name`.
    pub fn write_data(&mut self, sheet_name: &str) -> Result<()> {
        if self.if_closed {
            return Err(ExcelStyleError::WorkbookClosed);
        }
        let df_data = self.df_data.as_ref().ok_or(ExcelStyleError::NoDataLoaded)?;

        let c_sheet_key = sheet_name.to_lowercase();
        if self.set_sheet_names_existing.contains(&c_sheet_key) {
            return Err(ExcelStyleError::SheetAlreadyExists {
                name: sheet_name.to_string(),
            });
        }

        let l_col_plans = plan_columns(df_data, sheet_name, &self.registry, &self.widths);

        let mut worksheet = Worksheet::new();
        worksheet.set_name(sheet_name)?;
        write_sheet(
            &mut worksheet,
            df_data,
            &l_col_plans,
            self.options.header_row_height,
        )?;
        self.workbook.push_worksheet(worksheet);

        self.set_sheet_names_existing.insert(c_sheet_key);
        self.report.sheets.push(sheet_name.to_string());
        tracing::info!(
            sheet = sheet_name,
            rows = df_data.height(),
            cols = df_data.width(),
            "wrote sheet"
        );
        Ok(())
    }

    /// Freeze rows above `row` and columns left of `col`.
    pub fn freeze_panes(&mut self, row: usize, col: usize, sheet_name: &str) -> Result<()> {
        self.apply_to_sheet(sheet_name, "freeze_panes", |worksheet| {
            worksheet.set_freeze_panes(cast_row_num(row)?, cast_col_num(col)?)?;
            Ok(())
        })
    }

    /// Fit column widths to written content.
    pub fn autofit_columns(&mut self, sheet_name: &str) -> Result<()> {
        self.apply_to_sheet(sheet_name, "autofit_columns", |worksheet| {
            worksheet.autofit();
            Ok(())
        })
    }

    /// Hide columns `col_start..=col_end`.
    pub fn hide_columns(&mut self, col_start: usize, col_end: usize, sheet_name: &str) -> Result<()> {
        validate_range("column", col_start, col_end)?;
        self.apply_to_sheet(sheet_name, "hide_columns", |worksheet| {
            for n_idx_col in col_start..=col_end {
                worksheet.set_column_hidden(cast_col_num(n_idx_col)?)?;
            }
            Ok(())
        })
    }

    /// Group columns `col_start..=col_end` at outline level 1, hidden.
    pub fn collapse_columns(
        &mut self,
        col_start: usize,
        col_end: usize,
        sheet_name: &str,
    ) -> Result<()> {
        validate_range("column", col_start, col_end)?;
        self.apply_to_sheet(sheet_name, "collapse_columns", |worksheet| {
            worksheet.group_columns_collapsed(cast_col_num(col_start)?, cast_col_num(col_end)?)?;
            Ok(())
        })
    }

    /// Group rows `row_start..=row_end` at outline level 1, hidden.
    pub fn collapse_rows(&mut self, row_start: usize, row_end: usize, sheet_name: &str) -> Result<()> {
        validate_range("row", row_start, row_end)?;
        self.apply_to_sheet(sheet_name, "collapse_rows", |worksheet| {
            worksheet.group_rows_collapsed(cast_row_num(row_start)?, cast_row_num(row_end)?)?;
            Ok(())
        })
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        if self.if_closed {
            tracing::warn!(file = %self.path_file_out.display(), "workbook already closed");
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        tracing::info!(
            file = %self.path_file_out.display(),
            sheets = self.report.sheets.len(),
            "saved workbook"
        );
        Ok(())
    }

    /// Alias of [`Self::close`].
    pub fn save(&mut self) -> Result<()> {
        self.close()
    }

    /// Run `op` on an existing sheet; a missing sheet is reported and skipped.
    fn apply_to_sheet(
        &mut self,
        sheet_name: &str,
        op_name: &str,
        op: impl FnOnce(&mut Worksheet) -> Result<()>,
    ) -> Result<()> {
        if self.if_closed {
            return Err(ExcelStyleError::WorkbookClosed);
        }
        match self.workbook.worksheet_from_name(sheet_name) {
            Ok(worksheet) => op(worksheet),
            Err(_) => {
                let err = ExcelStyleError::SheetNotFound {
                    name: sheet_name.to_string(),
                };
                tracing::warn!(op = op_name, "{err}");
                self.report.warn(format!("{op_name} skipped: {err}"));
                Ok(())
            }
        }
    }
}

/// Classify columns and resolve their style sets and widths for one sheet.
pub fn plan_columns(
    df_data: &DataFrame,
    sheet_name: &str,
    registry: &StyleRegistry,
    widths: &SpecColumnWidthTable,
) -> Vec<SpecColumnPlan> {
    let l_categories = classify_dataframe_columns(df_data);

    df_data
        .get_column_names_str()
        .into_iter()
        .zip(l_categories)
        .map(|(c_name, category)| SpecColumnPlan {
            name: c_name.to_string(),
            category,
            style_set: registry.resolve_style(sheet_name, c_name).clone(),
            width: widths.width_for(category),
            if_highlighted: registry.highlights().is_highlighted(sheet_name, c_name),
        })
        .collect()
}

/// Normalized value and style slot for one cell; `None` for missing values.
pub fn plan_cell(
    category: EnumSemanticCategory,
    value: AnyValue<'_>,
) -> Option<(EnumCellValue, EnumStyleKey)> {
    let value = convert_any_value(value);
    if value == EnumCellValue::None {
        return None;
    }
    let key = derive_cell_style_key(category, &value);
    Some((value, key))
}

fn write_sheet(
    worksheet: &mut Worksheet,
    df_data: &DataFrame,
    l_col_plans: &[SpecColumnPlan],
    header_row_height: Option<f64>,
) -> Result<()> {
    let n_height_df = df_data.height();

    for (n_idx_col, (col_plan, col)) in l_col_plans
        .iter()
        .zip(df_data.get_columns())
        .enumerate()
    {
        let n_col = cast_col_num(n_idx_col)?;
        let l_fmts = derive_rust_xlsx_formats(&col_plan.style_set);

        worksheet.write_string_with_format(
            0,
            n_col,
            &col_plan.name,
            &l_fmts[EnumStyleKey::Header.index()],
        )?;
        worksheet.set_column_width(n_col, col_plan.width)?;

        for n_idx_row in 0..n_height_df {
            let n_row = cast_row_num(n_idx_row + 1)?;
            match plan_cell(col_plan.category, col.get(n_idx_row)?) {
                None => {
                    worksheet.write_string(n_row, n_col, "")?;
                }
                Some((value, key)) => {
                    write_cell_with_format(worksheet, n_row, n_col, &value, &l_fmts[key.index()])?;
                }
            }
        }

        tracing::debug!(
            column = %col_plan.name,
            category = ?col_plan.category,
            width = col_plan.width,
            if_highlighted = col_plan.if_highlighted,
            "wrote column"
        );
    }

    if let Some(n_height) = header_row_height {
        worksheet.set_row_height(0, n_height)?;
    }
    if !l_col_plans.is_empty() {
        worksheet.autofilter(
            0,
            0,
            cast_row_num(n_height_df)?,
            cast_col_num(l_col_plans.len() - 1)?,
        )?;
    }

    Ok(())
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    n_row: u32,
    n_col: u16,
    value: &EnumCellValue,
    format: &Format,
) -> Result<()> {
    match value {
        EnumCellValue::None => {
            worksheet.write_string(n_row, n_col, "")?;
        }
        EnumCellValue::String(val) | EnumCellValue::Opaque(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

/// Encoder formats for every slot of `style_set`, in slot order.
fn derive_rust_xlsx_formats(style_set: &SpecStyleSet) -> Vec<Format> {
    style_set
        .iter()
        .map(|(_, spec)| derive_rust_xlsx_format(spec))
        .collect()
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }

    format
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        "center_across" => Some(FormatAlign::CenterAcross),
        "distributed" => Some(FormatAlign::Distributed),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        "vjustify" | "vertical_justify" => Some(FormatAlign::VerticalJustify),
        "vdistributed" | "vertical_distributed" => Some(FormatAlign::VerticalDistributed),
        _ => None,
    }
}
