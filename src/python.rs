use std::path::PathBuf;

use polars::prelude::*;
use pyo3::prelude::*;
use pyo3::types::PyModule;
use pyo3_polars::PyDataFrame;

use crate::config::{FieldGeometry, InputConfig};
use crate::pipeline::WaterBalance;
use crate::schema::{self, infiltration, inflow, input, outflow, runoff};
use crate::{summary, table};

#[pyclass]
pub struct IrrigationTrial {
    base_path: PathBuf,
    balance: WaterBalance,
    input: InputConfig,
}

#[pymethods]
impl IrrigationTrial {
    #[new]
    #[pyo3(signature = (
        base_path,
        bucket_size_l = 7.2,
        row_spacing_in = 30.0,
        field_length_ft = 1050.0,
        rows_diverted = 2
    ))]
    fn new(
        base_path: String,
        bucket_size_l: f64,
        row_spacing_in: f64,
        field_length_ft: f64,
        rows_diverted: u32,
    ) -> PyResult<Self> {
        let geometry = FieldGeometry {
            bucket_size_l,
            row_spacing_in,
            field_length_ft,
            rows_diverted,
        };
        geometry.validate()?;
        Ok(Self {
            base_path: PathBuf::from(base_path),
            balance: WaterBalance::new(geometry),
            input: InputConfig::default(),
        })
    }

    // ── Data loading ────────────────────────────────────────────────────────

    /// Load an observation CSV.
    ///
    /// Required columns:
    ///     plot, rep, date, reading_1, reading_2, irr_time, outflow_gal
    /// Optional:
    ///     runoff_time
    /// date is parsed as %m/%d/%y; numeric columns as Float64.
    fn load_observations(&self, filename: &str) -> PyResult<PyDataFrame> {
        let df = table::load_observations(&self.base_path.join(filename), &self.input)?;
        Ok(PyDataFrame(df))
    }

    // ── Water balance ───────────────────────────────────────────────────────

    /// Append inflow, outflow and infiltration columns, then drop
    /// all-missing columns.
    fn compute(&self, observations: PyDataFrame) -> PyResult<PyDataFrame> {
        let df = self.balance.compute(observations.0)?;
        Ok(PyDataFrame(df))
    }

    /// Load then compute in one call.
    fn compute_file(&self, filename: &str) -> PyResult<PyDataFrame> {
        let df = table::load_observations(&self.base_path.join(filename), &self.input)?;
        let df = self.balance.compute(df)?;
        Ok(PyDataFrame(df))
    }

    /// Replicate means per plot and date.
    #[staticmethod]
    fn summarize(computed: PyDataFrame) -> PyResult<PyDataFrame> {
        let df = summary::summarize(&computed.0)?;
        Ok(PyDataFrame(df))
    }

    /// Write a table as .csv or .parquet under the base path.
    fn write(&self, df: PyDataFrame, filename: &str) -> PyResult<()> {
        let mut df: DataFrame = df.0;
        table::write_table(&mut df, &self.base_path.join(filename))?;
        Ok(())
    }

    // ── Properties ──────────────────────────────────────────────────────────

    #[getter]
    fn acreage_row(&self) -> f64 {
        self.balance.geometry().acreage_row()
    }
}

/// Export column-name constants as a `columns` submodule.
fn add_column_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let columns = PyModule::new(m.py(), "columns")?;

    let groups: [&[&str]; 5] = [
        &input::REQUIRED,
        &inflow::ALL,
        &outflow::ALL,
        &runoff::ALL,
        &infiltration::ALL,
    ];
    for name in groups.iter().flat_map(|g| g.iter()) {
        // "inf.avg.sec" -> INF_AVG_SEC
        let attr = name.replace('.', "_").to_uppercase();
        columns.add(attr.as_str(), *name)?;
    }
    columns.add("RUNOFF_TIME", input::RUNOFF_TIME)?;
    columns.add("N_OBS", schema::summary::N_OBS)?;

    m.add_submodule(&columns)?;
    Ok(())
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<IrrigationTrial>()?;
    add_column_exports(m)?;
    Ok(())
}

