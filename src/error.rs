use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(feature = "python")]
impl From<FlowError> for pyo3::PyErr {
    fn from(err: FlowError) -> pyo3::PyErr {
        pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
    }
}
