//! Table constants - all tunable values in one place

// Scale
pub const MM_TO_IN: f64 = 1.0 / 25.4;

// Table (inches)
pub const TABLE_WIDTH_INCHES: f64 = 72.0;
pub const TABLE_DEPTH_INCHES: f64 = 48.0;

// Facing arcs reach this far beyond the base; far larger than any table
pub const DEFAULT_LOOKOUT_DISTANCE: f64 = 100.0;

// Moves and turns smaller than this are not worth reporting
pub const DEFAULT_REPORT_EPSILON: f64 = 0.05;

// Restricted axis names
pub const FORWARD_AXIS: &str = "FORWARD";
pub const SIDEWAYS_AXIS: &str = "SIDEWAYS";
