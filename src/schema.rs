/// Column-name constants for irrigation-flow tables.
/// Single source of truth - exported to Python via PyO3.

// ── Observation (input) columns ─────────────────────────────────────────────
pub mod input {
    pub const PLOT: &str = "plot";
    pub const REP: &str = "rep";
    pub const DATE: &str = "date";
    pub const READING_1: &str = "reading_1";
    pub const READING_2: &str = "reading_2";
    pub const IRR_TIME: &str = "irr_time";
    pub const OUTFLOW_GAL: &str = "outflow_gal";
    /// Optional; absent from some datasets altogether.
    pub const RUNOFF_TIME: &str = "runoff_time";

    pub const REQUIRED: [&str; 7] = [
        PLOT,
        REP,
        DATE,
        READING_1,
        READING_2,
        IRR_TIME,
        OUTFLOW_GAL,
    ];

    pub const NUMERIC: [&str; 5] = [READING_1, READING_2, IRR_TIME, OUTFLOW_GAL, RUNOFF_TIME];
}

// ── Inflow stage columns ────────────────────────────────────────────────────
pub mod inflow {
    pub const AVG_SEC: &str = "inf.avg.sec";
    pub const AVG_GPM: &str = "inf.avg.gpm";
    pub const GAL_TRT: &str = "inf.gal.trt";
    pub const ACREFT_TRT: &str = "inf.acreft.trt";
    pub const ACREIN_TRT: &str = "inf.acrein.trt";
    pub const IN_TRT: &str = "inf.in.trt";
    pub const MM_TRT: &str = "inf.mm.trt";

    pub const ALL: [&str; 7] = [
        AVG_SEC, AVG_GPM, GAL_TRT, ACREFT_TRT, ACREIN_TRT, IN_TRT, MM_TRT,
    ];
}

// ── Outflow stage columns ───────────────────────────────────────────────────
pub mod outflow {
    pub const ACREFT_TRT: &str = "out.acreft.trt";
    pub const ACREIN_TRT: &str = "out.acrein.trt";
    pub const IN_TRT: &str = "out.in.trt";
    pub const MM_TRT: &str = "out.mm.trt";

    pub const ALL: [&str; 4] = [ACREFT_TRT, ACREIN_TRT, IN_TRT, MM_TRT];
}

// ── Runoff timing columns (only when runoff_time was recorded) ──────────────
pub mod runoff {
    pub const TIME_HRS: &str = "runoff.time.hrs";
    pub const START_TIME_HR: &str = "runoff.start.time.hr";

    pub const ALL: [&str; 2] = [TIME_HRS, START_TIME_HR];
}

// ── Infiltration stage columns ──────────────────────────────────────────────
pub mod infiltration {
    pub const DEPTH_IN: &str = "infiltration.in";
    pub const DEPTH_MM: &str = "infiltration.mm";
    pub const RATE_MMHR: &str = "infiltration.rate.mmhr";
    /// Efficiency assuming zero deep percolation. Not a valid application
    /// efficiency; the name keeps the caveat visible downstream.
    pub const BAD_EFF: &str = "bad_eff";

    pub const ALL: [&str; 4] = [DEPTH_IN, DEPTH_MM, RATE_MMHR, BAD_EFF];
}

// ── Summary table columns ───────────────────────────────────────────────────
pub mod summary {
    pub const N_OBS: &str = "n_obs";
}
