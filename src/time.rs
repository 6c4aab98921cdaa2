//! Julian dates and Greenwich Mean Sidereal Time.

use std::f64::consts::TAU;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{Error, Result};

pub const J2000_JD: f64 = 2_451_545.0;
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

// IAU 1982 GMST polynomial, degrees
pub const GMST_BASE_DEG: f64 = 280.460_618_37;
pub const GMST_ROTATION_PER_DAY: f64 = 360.985_647_366_29;
pub const GMST_T2: f64 = 0.000_387_933;
pub const GMST_T3_DIVISOR: f64 = 38_710_000.0;

/// Julian date of a UTC instant (millisecond resolution).
pub fn julian_day(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Julian date from calendar fields. Fails on dates chrono rejects
/// (e.g. Feb 30, hour 24).
pub fn julian_day_from_calendar(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
) -> Result<f64> {
    if !(0.0..60.0).contains(&second) {
        return Err(Error::InvalidDate(format!("second out of range: {second}")));
    }
    let whole = second.trunc() as u32;
    let nanos = ((second - second.trunc()) * 1e9).round() as u32;
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_nano_opt(hour, minute, whole, nanos.min(999_999_999)))
        .ok_or_else(|| {
            Error::InvalidDate(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second}"
            ))
        })?;
    Ok(julian_day(naive.and_utc()))
}

/// Julian centuries elapsed since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Greenwich Mean Sidereal Time (rad) in [0, 2π).
pub fn gmst_from_julian_day(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let gmst_deg = GMST_BASE_DEG
        + GMST_ROTATION_PER_DAY * (jd - J2000_JD)
        + GMST_T2 * t * t
        - t * t * t / GMST_T3_DIVISOR;
    let rad = gmst_deg.rem_euclid(360.0).to_radians();
    // to_radians(359.999...) can round up to exactly TAU
    if rad >= TAU { 0.0 } else { rad }
}

/// GMST (rad) for a UTC instant.
pub fn gmst(t: DateTime<Utc>) -> f64 {
    gmst_from_julian_day(julian_day(t))
}
