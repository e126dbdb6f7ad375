//! Fixed conversion factors used by the water-balance stages.

pub const GALLONS_PER_LITER: f64 = 0.264172;
pub const ACRE_FEET_PER_GALLON: f64 = 0.0000036889;
pub const INCHES_PER_FOOT: f64 = 12.0;
pub const MM_PER_INCH: f64 = 25.4;
pub const SQFT_PER_ACRE: f64 = 43560.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const MINUTES_PER_HOUR: f64 = 60.0;
