use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::FlowError;
use crate::units::{INCHES_PER_FOOT, SQFT_PER_ACRE};

/// Trial configuration, read from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrialConfig {
    /// Field and measurement-equipment geometry.
    #[serde(default)]
    pub geometry: FieldGeometry,

    /// How the observation CSV is parsed.
    #[serde(default)]
    pub input: InputConfig,
}

impl TrialConfig {
    /// Read and validate a TOML config file.
    pub fn from_path(path: &Path) -> Result<Self, FlowError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), geometry = ?config.geometry, "loaded trial config");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, FlowError> {
        let config: Self = toml::from_str(text)?;
        config.geometry.validate()?;
        Ok(config)
    }
}

/// Field geometry shared by every row of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldGeometry {
    /// Bucket volume used for the fill timings [L]
    #[serde(default = "default_bucket_size_l")]
    pub bucket_size_l: f64,
    /// Furrow spacing [in]
    #[serde(default = "default_row_spacing_in")]
    pub row_spacing_in: f64,
    /// Run length of the field [ft]
    #[serde(default = "default_field_length_ft")]
    pub field_length_ft: f64,
    /// Rows diverted into the flume. Recorded with the trial but not used by
    /// the depth formulas, which work per wetted-plus-dry row.
    #[serde(default = "default_rows_diverted")]
    pub rows_diverted: u32,
}

fn default_bucket_size_l() -> f64 {
    7.2
}
fn default_row_spacing_in() -> f64 {
    30.0
}
fn default_field_length_ft() -> f64 {
    1050.0
}
fn default_rows_diverted() -> u32 {
    2
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            bucket_size_l: default_bucket_size_l(),
            row_spacing_in: default_row_spacing_in(),
            field_length_ft: default_field_length_ft(),
            rows_diverted: default_rows_diverted(),
        }
    }
}

impl FieldGeometry {
    /// Acreage of one wetted plus one dry row over the field length.
    pub fn acreage_row(&self) -> f64 {
        (self.row_spacing_in * 2.0 / INCHES_PER_FOOT) * self.field_length_ft / SQFT_PER_ACRE
    }

    pub fn validate(&self) -> Result<(), FlowError> {
        let lengths = [
            ("bucket_size_l", self.bucket_size_l),
            ("row_spacing_in", self.row_spacing_in),
            ("field_length_ft", self.field_length_ft),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(FlowError::Validation(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.rows_diverted == 0 {
            return Err(FlowError::Validation(
                "rows_diverted must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parsing options for the observation CSV.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Tokens read as missing in addition to empty cells.
    #[serde(default = "default_null_values")]
    pub null_values: Vec<String>,
    /// strftime format of the `date` column.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_null_values() -> Vec<String> {
    vec!["NA".to_string()]
}
fn default_date_format() -> String {
    "%m/%d/%y".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            null_values: default_null_values(),
            date_format: default_date_format(),
        }
    }
}
