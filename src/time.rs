//! Time conversions between [`hifitime::Epoch`] and the TDB Julian days used by every
//! evaluation entry point of the crate.
//!
//! All orbit, rotation and frame queries take a plain `f64` Julian date in the TDB scale
//! ([`JulianDay`]): it is cheap to pass around, compares bit-exactly for the caches, and
//! matches the time argument stored in JPL ephemeris records. Callers holding a hifitime
//! `Epoch` convert once at the boundary with [`epoch_to_tdb`].

use hifitime::{Epoch, TimeScale};

use crate::constants::{JulianDay, JDTOMJD, J2000};

/// Convert a hifitime epoch to a TDB Julian date.
///
/// Argument
/// --------
/// * `epoch`: any hifitime epoch, whatever its time scale
///
/// Return
/// ------
/// * the Julian date of `epoch` expressed in TDB
pub fn epoch_to_tdb(epoch: &Epoch) -> JulianDay {
    epoch.to_jde_tdb_days()
}

/// Convert a TDB Julian date to a hifitime epoch (TDB time scale).
pub fn tdb_to_epoch(jd: JulianDay) -> Epoch {
    Epoch::from_jde_tdb(jd)
}

/// Build a TDB Julian date from a UTC gregorian date.
///
/// Argument
/// --------
/// * `year`, `month`, `day`, `hour`, `minute`, `second`: UTC calendar date
///
/// Return
/// ------
/// * the corresponding TDB Julian date
pub fn utc_gregorian_to_tdb(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> JulianDay {
    let epoch = Epoch::from_gregorian(year, month, day, hour, minute, second, 0, TimeScale::UTC);
    epoch_to_tdb(&epoch)
}

/// Transformation from Julian date in modified julian date (MJD)
pub fn jd_to_mjd(jd: JulianDay) -> f64 {
    jd - JDTOMJD
}

/// Transformation from modified julian date (MJD) to Julian date
pub fn mjd_to_jd(mjd: f64) -> JulianDay {
    mjd + JDTOMJD
}

/// Number of Julian centuries elapsed since J2000.
pub fn centuries_since_j2000(jd: JulianDay) -> f64 {
    (jd - J2000) / 36525.0
}
