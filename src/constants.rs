//! # Constants and type definitions for Starframe
//!
//! This module centralizes the **physical constants**, **conversion factors**, **evaluation
//! limits** and **common type aliases** used throughout the crate.
//!
//! ## Coordinate convention
//!
//! Every frame-local and universal vector in this crate is expressed in the *internal*
//! ecliptic J2000 convention:
//!
//! - `x` points towards the vernal equinox,
//! - `y` points towards the north ecliptic pole,
//! - `z = x × y`.
//!
//! A vector `(X, Y, Z)` in the usual astronomical ecliptic frame (Z towards the pole) maps to
//! `(X, Z, -Y)` here. See [`ecliptic_to_internal`].
//!
//! ## Overview
//!
//! - Astronomical constants (light year, J2000 epoch and obliquity)
//! - Unit conversions (arcseconds → radians, JD ↔ MJD)
//! - Evaluation limits used by the frame graph
//! - Core type aliases used across the crate

use nalgebra::Vector3;

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Light year in kilometers
pub const KM_PER_LY: f64 = 9_460_730_472_580.8;

/// Julian date (TDB) of the J2000.0 epoch
pub const J2000: JulianDay = 2_451_545.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

// -------------------------------------------------------------------------------------------------
// Evaluation limits
// -------------------------------------------------------------------------------------------------

/// Time step used to differentiate orientations and positions numerically (one minute).
pub const DIFF_DELTA_DAYS: f64 = 1.0 / 1440.0;

/// Hard cap on the recursion depth of a single frame/body evaluation.
///
/// Exceeding it turns into [`crate::starframe_errors::StarframeError::FrameRecursionLimit`]
/// instead of exhausting the stack on a cyclic frame graph.
pub const MAX_EVALUATION_DEPTH: usize = 64;

/// Advisory depth above which a frame configuration is considered pathological.
pub const MAX_FRAME_NESTING_DEPTH: usize = 50;

/// Cross product length under which the two vectors of a two-vector frame are collinear.
pub const TWO_VECTOR_TOLERANCE: f64 = 1.0e-6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Julian date in the TDB time scale (days)
pub type JulianDay = f64;
/// Duration in days
pub type Days = f64;

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// Arguments
/// ---------
/// * `jd`: Julian date (TDB).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// The polynomial in Julian centuries since J2000 is evaluated with Horner's method:
///
/// ```text
/// ε = ((ob3 * t + ob2) * t + ob1) * t + ob0;
/// ```
pub fn obleq(jd: JulianDay) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (jd - J2000) / 36525.0;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Mean obliquity of the ecliptic at J2000 (radians).
pub fn j2000_obliquity() -> Radian {
    obleq(J2000)
}

/// Map a vector from the astronomical ecliptic frame (Z to the pole) to the internal
/// convention (Y to the pole).
pub fn ecliptic_to_internal(v: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, v.z, -v.y)
}

/// Inverse of [`ecliptic_to_internal`].
pub fn internal_to_ecliptic(v: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, -v.z, v.y)
}
