use std::path::PathBuf;

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyAny;
use tabstyle_io_xlsx::{
    ExcelStyleError, ExcelStyleWriter as RsExcelStyleWriter, derive_writer_options,
};

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "tabstyle.xlsx.writer.v1";
const C_BRIDGE_TRANSPORT: &str = "polars_ipc";

#[pyclass(name = "ExcelWriter")]
struct PyExcelWriter {
    inner: RsExcelStyleWriter,
}

#[pymethods]
impl PyExcelWriter {
    #[new]
    #[pyo3(signature = (
        file_out,
        en_font = None,
        ch_font = None,
        num_font = None,
        font_size = None,
        header_bg_color = None,
        header_row_height = None
    ))]
    fn new(
        file_out: String,
        en_font: Option<String>,
        ch_font: Option<String>,
        num_font: Option<String>,
        font_size: Option<f64>,
        header_bg_color: Option<String>,
        header_row_height: Option<f64>,
    ) -> Self {
        let cfg_options = derive_writer_options(
            en_font,
            ch_font,
            num_font,
            font_size,
            header_bg_color,
            header_row_height,
        );
        Self {
            inner: RsExcelStyleWriter::new(PathBuf::from(file_out), cfg_options),
        }
    }

    #[getter]
    fn file_out(&self) -> String {
        self.inner.file_out()
    }

    #[getter]
    fn font_size(&self) -> f64 {
        self.inner.options().font_size
    }

    fn __enter__(slf: PyRefMut<'_, Self>) -> PyRefMut<'_, Self> {
        slf
    }

    #[pyo3(signature = (_exc_type=None, _exc=None, _tb=None))]
    fn __exit__(
        &mut self,
        _exc_type: Option<&Bound<'_, PyAny>>,
        _exc: Option<&Bound<'_, PyAny>>,
        _tb: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<()> {
        self.close()
    }

    /// Load a table serialized with `polars.DataFrame.write_ipc`.
    fn load_data(&mut self, v_ipc_df: &[u8]) -> PyResult<()> {
        self.inner
            .load_data_from_ipc_bytes(v_ipc_df)
            .map_err(derive_py_err)
    }

    #[pyo3(signature = (sheet_name, column_name, bg_color=None, font_color=None))]
    fn mark_highlighted(
        &mut self,
        sheet_name: &str,
        column_name: &str,
        bg_color: Option<&str>,
        font_color: Option<&str>,
    ) {
        self.inner
            .mark_highlighted(sheet_name, column_name, bg_color, font_color);
    }

    /// Highlight one column name or a list of names with default colors.
    fn set_hl_col_by_names(
        &mut self,
        col_names: &Bound<'_, PyAny>,
        sheet_name: &str,
    ) -> PyResult<()> {
        let l_col_names = parse_column_names(col_names)?;
        self.inner.mark_highlighted_columns(sheet_name, &l_col_names);
        Ok(())
    }

    /// Highlighted column names of a sheet, sorted.
    fn highlighted_columns(&self, sheet_name: &str) -> Vec<String> {
        self.inner
            .registry()
            .highlights()
            .highlighted_columns(sheet_name)
    }

    #[pyo3(signature = (sheet_name="Sheet1"))]
    fn write_data(&mut self, sheet_name: &str) -> PyResult<()> {
        self.inner.write_data(sheet_name).map_err(derive_py_err)
    }

    #[pyo3(signature = (row=1, col=1, sheet_name="Sheet1"))]
    fn freeze(&mut self, row: usize, col: usize, sheet_name: &str) -> PyResult<()> {
        self.inner
            .freeze_panes(row, col, sheet_name)
            .map_err(derive_py_err)
    }

    #[pyo3(signature = (sheet_name="Sheet1"))]
    fn autofit(&mut self, sheet_name: &str) -> PyResult<()> {
        self.inner.autofit_columns(sheet_name).map_err(derive_py_err)
    }

    #[pyo3(signature = (s_col=0, end_col=0, sheet_name="Sheet1"))]
    fn hide_col(&mut self, s_col: usize, end_col: usize, sheet_name: &str) -> PyResult<()> {
        self.inner
            .hide_columns(s_col, end_col, sheet_name)
            .map_err(derive_py_err)
    }

    #[pyo3(signature = (s_col=0, end_col=0, sheet_name="Sheet1"))]
    fn collapse_col(&mut self, s_col: usize, end_col: usize, sheet_name: &str) -> PyResult<()> {
        self.inner
            .collapse_columns(s_col, end_col, sheet_name)
            .map_err(derive_py_err)
    }

    #[pyo3(signature = (s_row=1, end_row=1, sheet_name="Sheet1"))]
    fn collapse_row(&mut self, s_row: usize, end_row: usize, sheet_name: &str) -> PyResult<()> {
        self.inner
            .collapse_rows(s_row, end_row, sheet_name)
            .map_err(derive_py_err)
    }

    /// Non-fatal diagnostics, e.g. layout calls on missing sheets.
    fn warnings(&self) -> Vec<String> {
        self.inner.warnings().to_vec()
    }

    fn save(&mut self) -> PyResult<()> {
        self.close()
    }

    fn close(&mut self) -> PyResult<()> {
        self.inner.close().map_err(derive_py_err)
    }
}

fn derive_py_err(err: ExcelStyleError) -> PyErr {
    match err {
        ExcelStyleError::Xlsx(_) | ExcelStyleError::WorkbookClosed => {
            PyRuntimeError::new_err(err.to_string())
        }
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn parse_column_names(value: &Bound<'_, PyAny>) -> PyResult<Vec<String>> {
    if let Ok(c_value) = value.extract::<String>() {
        return Ok(vec![c_value]);
    }
    if let Ok(l_values) = value.extract::<Vec<String>>() {
        return Ok(l_values);
    }

    Err(PyValueError::new_err(
        "Column names must be str or sequence[str].",
    ))
}

#[pymodule]
fn _tabstyle_io_xlsx_rs(_py: Python<'_>, module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyExcelWriter>()?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
