//! Integration test: observation CSV on disk through the full water balance.

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use irrigation_flow::schema::{infiltration, inflow, input, outflow, runoff};
use irrigation_flow::{
    load_observations, summarize, write_table, FieldGeometry, FlowError, InputConfig,
    TrialConfig, WaterBalance,
};
use polars::prelude::*;

fn write_csv(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

fn f64_at(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
    df.column(column).unwrap().f64().unwrap().get(row)
}

const WITHOUT_RUNOFF: &str = "\
plot,rep,date,reading_1,reading_2,irr_time,outflow_gal
A,1,7/14/23,60,60,2,500
A,2,7/14/23,NA,50,2,400
B,1,7/14/23,,,2,300
";

const WITH_RUNOFF: &str = "\
plot,rep,date,reading_1,reading_2,irr_time,outflow_gal,runoff_time
A,1,7/14/23,60,60,2,500,45
B,1,7/28/23,55,65,3,NA,NA
";

#[test]
fn worked_example_without_runoff() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(dir.path(), "obs.csv", WITHOUT_RUNOFF);

    let observations = load_observations(&path, &InputConfig::default()).unwrap();
    let geometry = FieldGeometry {
        bucket_size_l: 7.2,
        row_spacing_in: 30.0,
        field_length_ft: 1050.0,
        rows_diverted: 2,
    };
    assert_relative_eq!(geometry.acreage_row(), 0.12052, epsilon = 1e-5);

    let out = WaterBalance::new(geometry).compute(observations).unwrap();

    assert_eq!(f64_at(&out, inflow::AVG_SEC, 0), Some(60.0));
    assert_relative_eq!(f64_at(&out, inflow::AVG_GPM, 0).unwrap(), 1.9020, epsilon = 1e-4);
    assert_relative_eq!(f64_at(&out, inflow::GAL_TRT, 0).unwrap(), 228.24, epsilon = 1e-2);
    assert_relative_eq!(f64_at(&out, inflow::ACREFT_TRT, 0).unwrap(), 0.000842, epsilon = 1e-6);
    assert_relative_eq!(f64_at(&out, inflow::ACREIN_TRT, 0).unwrap(), 0.01011, epsilon = 1e-5);
    assert_relative_eq!(f64_at(&out, inflow::IN_TRT, 0).unwrap(), 0.0839, epsilon = 1e-4);
    assert_relative_eq!(f64_at(&out, inflow::MM_TRT, 0).unwrap(), 0.00330, epsilon = 1e-5);

    for name in runoff::ALL.iter().chain([input::RUNOFF_TIME].iter()) {
        assert!(out.column(name).is_err(), "{name} should not be present");
    }
}

#[test]
fn missing_readings_propagate_per_row() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(dir.path(), "obs.csv", WITHOUT_RUNOFF);

    let observations = load_observations(&path, &InputConfig::default()).unwrap();
    let out = WaterBalance::default().compute(observations).unwrap();

    assert_eq!(out.height(), 3);
    // one reading present: its value is the mean
    assert_eq!(f64_at(&out, inflow::AVG_SEC, 1), Some(50.0));
    // both missing: every inflow-derived value is missing
    assert_eq!(f64_at(&out, inflow::AVG_SEC, 2), None);
    assert_eq!(f64_at(&out, inflow::IN_TRT, 2), None);
    assert_eq!(f64_at(&out, infiltration::DEPTH_IN, 2), None);
    assert_eq!(f64_at(&out, infiltration::BAD_EFF, 2), None);
    // outflow side does not depend on the readings
    assert!(f64_at(&out, outflow::IN_TRT, 2).is_some());
}

#[test]
fn runoff_timing_when_recorded() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(dir.path(), "obs.csv", WITH_RUNOFF);

    let observations = load_observations(&path, &InputConfig::default()).unwrap();
    let out = WaterBalance::default().compute(observations).unwrap();

    assert_eq!(f64_at(&out, runoff::TIME_HRS, 0), Some(0.75));
    assert_eq!(f64_at(&out, runoff::START_TIME_HR, 0), Some(1.25));
    assert_eq!(f64_at(&out, runoff::TIME_HRS, 1), None);
    assert_eq!(f64_at(&out, runoff::START_TIME_HR, 1), None);

    let irr = out.column(input::IRR_TIME).unwrap().f64().unwrap();
    let hrs = out.column(runoff::TIME_HRS).unwrap().f64().unwrap();
    let start = out.column(runoff::START_TIME_HR).unwrap().f64().unwrap();
    for i in 0..out.height() {
        if let (Some(irr), Some(hrs), Some(start)) = (irr.get(i), hrs.get(i), start.get(i)) {
            assert_relative_eq!(start, irr - hrs);
        }
    }
}

#[test]
fn dates_parse_as_two_digit_years() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(dir.path(), "obs.csv", WITH_RUNOFF);

    let observations = load_observations(&path, &InputConfig::default()).unwrap();
    let dates = observations.column(input::DATE).unwrap();
    assert_eq!(dates.dtype(), &DataType::Date);

    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let expected = NaiveDate::from_ymd_opt(2023, 7, 28).unwrap();
    let days = dates.cast(&DataType::Int32).unwrap().i32().unwrap().get(1).unwrap();
    assert_eq!(days as i64, (expected - epoch).num_days());
}

#[test]
fn required_column_absent_is_fatal() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(
        dir.path(),
        "obs.csv",
        "plot,rep,date,reading_1,reading_2,outflow_gal\nA,1,7/14/23,60,60,500\n",
    );

    let err = load_observations(&path, &InputConfig::default()).unwrap_err();
    assert!(
        matches!(err, FlowError::MissingColumn(ref c) if c == input::IRR_TIME),
        "expected MissingColumn(irr_time), got {err:?}",
    );
}

#[test]
fn malformed_date_is_fatal() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(
        dir.path(),
        "obs.csv",
        "plot,rep,date,reading_1,reading_2,irr_time,outflow_gal\nA,1,2023-07-14,60,60,2,500\n",
    );

    let result = load_observations(&path, &InputConfig::default());
    assert!(matches!(result, Err(FlowError::Polars(_))));
}

#[test]
fn config_file_drives_geometry_and_null_tokens() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config_path = write_csv(
        dir.path(),
        "trial.toml",
        "[geometry]\nfield_length_ft = 525.0\n\n[input]\nnull_values = [\"-\"]\n",
    );
    let config = TrialConfig::from_path(&config_path).unwrap();

    let path = write_csv(
        dir.path(),
        "obs.csv",
        "plot,rep,date,reading_1,reading_2,irr_time,outflow_gal\nA,1,7/14/23,60,-,2,500\n",
    );
    let observations = load_observations(&path, &config.input).unwrap();
    let half = WaterBalance::new(config.geometry).compute(observations.clone()).unwrap();
    let full = WaterBalance::default().compute(observations).unwrap();

    assert_eq!(f64_at(&half, inflow::AVG_SEC, 0), Some(60.0));
    // half the field length, twice the depth
    assert_relative_eq!(
        f64_at(&half, inflow::IN_TRT, 0).unwrap(),
        2.0 * f64_at(&full, inflow::IN_TRT, 0).unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn computed_table_and_summary_written_to_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(dir.path(), "obs.csv", WITHOUT_RUNOFF);

    let observations = load_observations(&path, &InputConfig::default()).unwrap();
    let mut computed = WaterBalance::default().compute(observations).unwrap();
    let out_path = dir.path().join("computed.csv");
    write_table(&mut computed, &out_path).unwrap();

    let header = fs::read_to_string(&out_path).unwrap();
    let header = header.lines().next().unwrap();
    assert!(header.starts_with("plot,rep,date,reading_1,reading_2,irr_time,outflow_gal,"));
    assert!(header.ends_with("infiltration.rate.mmhr,bad_eff"));
    assert!(!header.contains("runoff"));

    let mut table = summarize(&computed).unwrap();
    assert_eq!(table.height(), 2);
    let parquet_path = dir.path().join("summary.parquet");
    write_table(&mut table, &parquet_path).unwrap();

    let read_back = ParquetReader::new(fs::File::open(&parquet_path).unwrap())
        .finish()
        .unwrap();
    assert!(read_back.equals_missing(&table));
}

#[test]
fn padded_blank_and_null_cells_load_as_missing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(
        dir.path(),
        "obs.csv",
        "plot,rep,date,reading_1,reading_2,irr_time,outflow_gal\n\
         A,1,7/14/23, ,60,2,500\n\
         A,2,7/14/23,NA ,50,2,400\n",
    );

    let observations = load_observations(&path, &InputConfig::default()).unwrap();
    assert_eq!(observations.column(input::READING_1).unwrap().null_count(), 2);

    let out = WaterBalance::default().compute(observations).unwrap();
    assert_eq!(f64_at(&out, inflow::AVG_SEC, 0), Some(60.0));
    assert_eq!(f64_at(&out, inflow::AVG_SEC, 1), Some(50.0));
    // reading_1 is missing everywhere, so it is pruned
    assert!(out.column(input::READING_1).is_err());
}
