//! Water inflow, outflow and infiltration for surface-irrigation trials,
//! computed from bucket-fill timings and flume gallons.

pub mod config;
pub mod error;
mod exprs;
pub mod infiltration;
pub mod inflow;
pub mod outflow;
pub mod pipeline;
pub mod schema;
pub mod summary;
pub mod table;
pub mod units;

#[cfg(feature = "python")]
mod python;

pub use config::{FieldGeometry, InputConfig, TrialConfig};
pub use error::FlowError;
pub use outflow::RunoffTiming;
pub use pipeline::{prune_empty_columns, WaterBalance};
pub use summary::summarize;
pub use table::{load_observations, write_table};
