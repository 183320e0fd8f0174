/// Fixed parameters of the slice service wire contract

/// Query parameter carrying the requested slice height.
pub const HEIGHT_PARAM: &str = "zVal";

/// Fractional digits used when writing centroid coordinates.
pub const CENTROID_DECIMALS: usize = 2;

/// Largest height difference at which a precomputed slice still answers
/// a request.
pub const SLICE_HEIGHT_TOLERANCE: f64 = 1e-9;

/// Content type of every response body.
pub const CONTENT_TYPE: &str = "application/json";

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Largest magnitude written as a JSON integer; beyond it `f64` loses
/// integer precision.
pub const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;
