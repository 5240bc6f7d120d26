//! Tolerances and search bounds shared by the domain and axis solver.
//!
//! These values are part of the output contract: two runs with the same
//! constants over the same input produce identical grids.

use std::f64::consts::PI;

/// Decimal digits kept when comparing, ordering or hashing points.
pub const RESOLUTION: i32 = 6;
/// Decimal digits kept for the domain extents.
pub const DOMAIN_RESOLUTION: i32 = 10;

/// Distance under which a value counts as zero (lattice hits, near-edge angles).
pub const ZERO_TOL: f64 = 5.0e-6;
/// Slack allowed when matching a projected length to a whole number of tiles.
pub const POINT_MATCH_TOLERANCE: f64 = 0.01;

/// Upper bound of the tile repetition search.
pub const MAX_TRY: u32 = 20_000;
/// Largest span or shift accepted, in domain units.
pub const MAX_DOMAIN: f64 = 100.0;

/// Total angular budget for jiggling a seed line (3 degrees).
pub const ANGLE_TOLERANCE: f64 = 3.0 * PI / 180.0;
/// Angles closer than this are treated as identical.
pub const ANGLE_MATCH_TOLERANCE: f64 = 1.0e-10;
/// Number of jiggle attempts, one per milliradian of `ANGLE_TOLERANCE`.
pub const MAX_JIGGLE_STEPS: u32 = 52;

/// Angle added per jiggle step.
#[inline]
pub fn jiggle_step() -> f64 {
    ANGLE_TOLERANCE / MAX_JIGGLE_STEPS as f64
}

/// Round `value` to `digits` decimal places.
#[inline]
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
