//! Apparent solar direction and sub-solar point.
//!
//! Medium-accuracy Meeus/NOAA series (≈0.01°), ample for lighting and
//! the day/night overlay. Everything here is a pure function of the
//! Julian date.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::frames::eci_to_ecf;
use crate::time::{centuries_since_j2000, gmst_from_julian_day};

/// Angular terms of the solar position at one instant, degrees.
#[derive(Debug, Clone, Copy)]
pub struct SolarAngles {
    pub mean_longitude: f64,  // L0
    pub mean_anomaly: f64,    // M
    pub equation_of_center: f64,
    pub true_longitude: f64,
    pub omega: f64,           // longitude of the Moon's node, nutation term
    pub apparent_longitude: f64,
    pub obliquity: f64,       // corrected obliquity of the ecliptic
}

impl SolarAngles {
    pub fn at(jd: f64) -> Self {
        let t = centuries_since_j2000(jd);

        let l0 = (280.466_46 + t * (36_000.769_83 + 0.000_303_2 * t)).rem_euclid(360.0);
        let m = 357.529_11 + t * (35_999.050_29 - 0.000_153_7 * t);
        let m_rad = m.to_radians();

        let c = m_rad.sin() * (1.914_602 - t * (0.004_817 + 0.000_014 * t))
            + (2.0 * m_rad).sin() * (0.019_993 - 0.000_101 * t)
            + (3.0 * m_rad).sin() * 0.000_289;

        let true_longitude = l0 + c;
        let omega = 125.04 - 1934.136 * t;
        let apparent_longitude = true_longitude - 0.005_69 - 0.004_78 * omega.to_radians().sin();

        let seconds = 21.448 - t * (46.815 + t * (0.000_59 - t * 0.001_813));
        let mean_obliquity = 23.0 + (26.0 + seconds / 60.0) / 60.0;
        let obliquity = mean_obliquity + 0.002_56 * omega.to_radians().cos();

        SolarAngles {
            mean_longitude: l0,
            mean_anomaly: m,
            equation_of_center: c,
            true_longitude,
            omega,
            apparent_longitude,
            obliquity,
        }
    }

    /// Unit vector toward the sun, equatorial inertial frame.
    pub fn direction(&self) -> Vector3<f64> {
        let lambda = self.apparent_longitude.to_radians();
        let epsilon = self.obliquity.to_radians();
        Vector3::new(
            lambda.cos(),
            epsilon.cos() * lambda.sin(),
            epsilon.sin() * lambda.sin(),
        )
    }
}

/// Unit sun direction in ECI for Julian date `jd`.
pub fn sun_direction_eci(jd: f64) -> Vector3<f64> {
    SolarAngles::at(jd).direction()
}

/// Unit sun direction in ECEF for Julian date `jd`.
pub fn sun_direction_ecef(jd: f64) -> Vector3<f64> {
    eci_to_ecf(&sun_direction_eci(jd), gmst_from_julian_day(jd)).normalize()
}

// ---------------------------------------------------------------------------
// Sub-solar point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubSolarPoint {
    pub lat_rad: f64,
    pub lon_rad: f64,
}

impl SubSolarPoint {
    /// From a unit sun vector in ECEF: lat = asin(z), lon = atan2(-y, x).
    pub fn from_sun_ecef(sun: &Vector3<f64>) -> Self {
        SubSolarPoint {
            lat_rad: sun.z.clamp(-1.0, 1.0).asin(),
            lon_rad: (-sun.y).atan2(sun.x),
        }
    }

    pub fn at(jd: f64) -> Self {
        Self::from_sun_ecef(&sun_direction_ecef(jd))
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_rad.to_degrees()
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon_rad.to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{julian_day_from_calendar, J2000_JD};
    use approx::assert_relative_eq;

    #[test]
    fn unit_length_across_centuries() {
        let mut jd = 2_415_020.0;
        while jd < 2_488_070.0 {
            let s = sun_direction_eci(jd);
            assert!((s.norm() - 1.0).abs() < 1e-6, "|sun| = {} at {jd}", s.norm());
            for c in s.iter() {
                assert!((-1.0..=1.0).contains(c));
            }
            jd += 97.31;
        }
    }

    #[test]
    fn ecef_direction_is_unit() {
        let s = sun_direction_ecef(J2000_JD + 1234.5);
        assert_relative_eq!(s.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn j2000_apparent_longitude() {
        // Meeus: L0 = 280.46646, apparent longitude ≈ 280.37 deg at J2000
        let a = SolarAngles::at(J2000_JD);
        assert_relative_eq!(a.mean_longitude, 280.466_46, epsilon = 1e-9);
        assert!((a.apparent_longitude - 280.37).abs() < 0.02, "{}", a.apparent_longitude);
        assert!((a.obliquity - 23.44).abs() < 0.01);
    }

    #[test]
    fn declination_near_zero_at_march_equinox() {
        let jd = julian_day_from_calendar(2024, 3, 20, 3, 6, 0.0).unwrap();
        let s = sun_direction_eci(jd);
        assert!(s.z.abs() < 0.002, "declination sin = {}", s.z);
        assert!(s.x > 0.99);
    }

    #[test]
    fn subsolar_latitude_tracks_season() {
        let june = SubSolarPoint::at(julian_day_from_calendar(2024, 6, 20, 12, 0, 0.0).unwrap());
        let december = SubSolarPoint::at(julian_day_from_calendar(2024, 12, 21, 12, 0, 0.0).unwrap());
        assert!((june.lat_deg() - 23.44).abs() < 0.1, "{}", june.lat_deg());
        assert!((december.lat_deg() + 23.44).abs() < 0.1, "{}", december.lat_deg());
    }

    #[test]
    fn subsolar_from_vector() {
        let p = SubSolarPoint::from_sun_ecef(&Vector3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(p.lat_rad, 0.0);
        assert_relative_eq!(p.lon_deg(), 90.0, epsilon = 1e-12);
    }
}
