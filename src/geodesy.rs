//! Reference ellipsoid and geodetic <-> Cartesian conversion.
//!
//! Cartesian outputs are Earth-fixed and in km. Scaling into scene units
//! and any axis swap belong to [`crate::projection::SceneAxes`].

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ellipsoid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    pub a: f64, // semi-major axis, km
    pub f: f64, // flattening
}

pub const WGS84: Ellipsoid = Ellipsoid {
    a: 6378.137,
    f: 1.0 / 298.257_223_563,
};

impl Ellipsoid {
    /// First eccentricity squared, f(2 - f).
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Semi-minor (polar) axis, km.
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// Prime-vertical radius of curvature at geodetic latitude `lat` (rad).
    pub fn prime_vertical_radius(&self, lat: f64) -> f64 {
        let s = lat.sin();
        self.a / (1.0 - self.e2() * s * s).sqrt()
    }

    /// Geodetic (lat, lon, height) to Earth-fixed Cartesian, km.
    pub fn geodetic_to_cartesian(&self, geo: &GeodeticCoordinate) -> Vector3<f64> {
        let lat = geo.lat_deg.to_radians();
        let lon = geo.lon_deg.to_radians();
        let n = self.prime_vertical_radius(lat);
        let h = geo.height_km;
        Vector3::new(
            (n + h) * lat.cos() * lon.cos(),
            (n + h) * lat.cos() * lon.sin(),
            ((1.0 - self.e2()) * n + h) * lat.sin(),
        )
    }

    /// Earth-fixed Cartesian (km) to geodetic, Bowring's formula applied
    /// twice. Round-trips to ~1e-12 km from the surface out past GEO.
    pub fn cartesian_to_geodetic(&self, p: &Vector3<f64>) -> GeodeticCoordinate {
        let a = self.a;
        let b = self.b();
        let e2 = self.e2();
        let ep2 = (a * a - b * b) / (b * b); // second eccentricity squared

        let lon = p.y.atan2(p.x);
        let rho = (p.x * p.x + p.y * p.y).sqrt();

        if rho < 1e-9 {
            let lat = if p.z >= 0.0 { 90.0 } else { -90.0 };
            return GeodeticCoordinate::new(lat, lon.to_degrees(), p.z.abs() - b);
        }

        // geodetic latitude from a parametric latitude guess
        let bowring = |beta: f64| {
            let (sb, cb) = beta.sin_cos();
            (p.z + ep2 * b * sb.powi(3)).atan2(rho - e2 * a * cb.powi(3))
        };
        let first = bowring((p.z * a).atan2(rho * b));
        // second pass from the refined parametric latitude
        let lat = bowring(((1.0 - self.f) * first.sin()).atan2(first.cos()));

        let n = self.prime_vertical_radius(lat);
        let height = if lat.cos().abs() > 1e-10 {
            rho / lat.cos() - n
        } else {
            p.z.abs() / lat.sin().abs() - n * (1.0 - e2)
        };

        GeodeticCoordinate::new(lat.to_degrees(), lon.to_degrees(), height)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        WGS84
    }
}

// ---------------------------------------------------------------------------
// Geodetic coordinate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticCoordinate {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub height_km: f64,
}

impl GeodeticCoordinate {
    pub fn new(lat_deg: f64, lon_deg: f64, height_km: f64) -> Self {
        Self { lat_deg, lon_deg, height_km }
    }
}

/// WGS84 geodetic to Earth-fixed Cartesian, km.
pub fn geodetic_to_cartesian(lat_deg: f64, lon_deg: f64, height_km: f64) -> Vector3<f64> {
    WGS84.geodetic_to_cartesian(&GeodeticCoordinate::new(lat_deg, lon_deg, height_km))
}

/// Spherical body: geocentric latitude on a sphere of `radius_km`.
pub fn geocentric_to_cartesian(lat_centric_deg: f64, lon_deg: f64, radius_km: f64) -> Vector3<f64> {
    let lat = lat_centric_deg.to_radians();
    let lon = lon_deg.to_radians();
    Vector3::new(
        radius_km * lat.cos() * lon.cos(),
        radius_km * lat.cos() * lon.sin(),
        radius_km * lat.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn derived_constants() {
        assert_relative_eq!(WGS84.b(), 6356.752_314_245, epsilon = 1e-6);
        assert_relative_eq!(WGS84.e2(), 0.006_694_379_990_14, epsilon = 1e-12);
    }

    #[test]
    fn equator_prime_meridian_on_equatorial_radius() {
        let p = geodetic_to_cartesian(0.0, 0.0, 0.0);
        assert!(p.z.abs() < 1e-9);
        assert_relative_eq!((p.x * p.x + p.y * p.y).sqrt(), WGS84.a, epsilon = 1e-9);
    }

    #[test]
    fn north_pole_on_polar_radius_for_any_longitude() {
        for lon in [-180.0, -73.0, 0.0, 45.0, 179.9] {
            let p = geodetic_to_cartesian(90.0, lon, 0.0);
            assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9, "lon {lon}: {p:?}");
            assert_relative_eq!(p.z, WGS84.b(), epsilon = 1e-9);
        }
    }

    #[test]
    fn height_adds_along_normal() {
        let p0 = geodetic_to_cartesian(0.0, 90.0, 0.0);
        let p1 = geodetic_to_cartesian(0.0, 90.0, 400.0);
        assert_relative_eq!(p1.y - p0.y, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn geocentric_is_spherical() {
        let p = geocentric_to_cartesian(30.0, 60.0, 7000.0);
        assert_relative_eq!(p.norm(), 7000.0, epsilon = 1e-9);
        assert_relative_eq!(p.z, 3500.0, epsilon = 1e-9);
    }

    #[test]
    fn cartesian_to_geodetic_inverts() {
        for &(lat, lon, h) in &[
            (0.0, 0.0, 0.0),
            (51.6, -0.1, 420.0),
            (-33.9, 151.2, 0.05),
            (89.0, 10.0, 35_786.0),
            (-70.0, -120.0, 800.0),
        ] {
            let p = geodetic_to_cartesian(lat, lon, h);
            let g = WGS84.cartesian_to_geodetic(&p);
            assert_relative_eq!(g.lat_deg, lat, epsilon = 1e-8);
            assert_relative_eq!(g.lon_deg, lon, epsilon = 1e-8);
            assert_relative_eq!(g.height_km, h, epsilon = 1e-6);
        }
    }

    #[test]
    fn cartesian_to_geodetic_on_axis() {
        let g = WGS84.cartesian_to_geodetic(&Vector3::new(0.0, 0.0, -WGS84.b() - 10.0));
        assert_eq!(g.lat_deg, -90.0);
        assert_relative_eq!(g.height_km, 10.0, epsilon = 1e-9);
    }
}
