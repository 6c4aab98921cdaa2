use std::f64::consts::{FRAC_PI_4, PI, TAU};

use serde::{Deserialize, Serialize};

/// Web-Mercator latitude limit; the map is square at this bound.
pub const MAX_MERCATOR_LAT_DEG: f64 = 85.051_128_78;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MercatorPoint {
    pub x: f64,
    pub y: f64,
}

/// Canvas the Mercator map is drawn on, pixels. Longitude -180 is x = 0,
/// the equator is y = height / 2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MercatorCanvas {
    pub width: f64,
    pub height: f64,
}

impl Default for MercatorCanvas {
    fn default() -> Self {
        Self { width: 400.0, height: 200.0 }
    }
}

pub fn clamp_latitude(lat_deg: f64) -> f64 {
    lat_deg.clamp(-MAX_MERCATOR_LAT_DEG, MAX_MERCATOR_LAT_DEG)
}

impl MercatorCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Geographic degrees to canvas pixels. Latitudes past the Mercator
    /// limit are folded onto it.
    pub fn project(&self, lat_deg: f64, lon_deg: f64) -> MercatorPoint {
        let x = (lon_deg + 180.0) * (self.width / 360.0);
        let lat = clamp_latitude(lat_deg).to_radians();
        let merc_n = (FRAC_PI_4 + lat / 2.0).tan().ln();
        let y = self.height / 2.0 - self.width * merc_n / TAU;
        MercatorPoint { x, y }
    }

    /// Inverse of [`project`](Self::project): pixels to (lat, lon) degrees.
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = x * 360.0 / self.width - 180.0;
        let merc_n = (self.height / 2.0 - y) * TAU / self.width;
        let lat = 2.0 * merc_n.exp().atan() - PI / 2.0;
        (lat.to_degrees(), lon)
    }

    /// y of the clamp bound at the top (north) edge of the valid area.
    pub fn north_limit_y(&self) -> f64 {
        self.project(MAX_MERCATOR_LAT_DEG, 0.0).y
    }

    pub fn south_limit_y(&self) -> f64 {
        self.project(-MAX_MERCATOR_LAT_DEG, 0.0).y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn origin_is_canvas_centre() {
        let c = MercatorCanvas::new(400.0, 200.0);
        let p = c.project(0.0, 0.0);
        assert_relative_eq!(p.x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn longitude_edges() {
        let c = MercatorCanvas::new(720.0, 360.0);
        assert_relative_eq!(c.project(10.0, -180.0).x, 0.0);
        assert_relative_eq!(c.project(10.0, 180.0).x, 720.0);
    }

    #[test]
    fn square_world_at_latitude_limit() {
        let c = MercatorCanvas::new(512.0, 512.0);
        assert_relative_eq!(c.north_limit_y(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.south_limit_y(), 512.0, epsilon = 1e-6);
    }

    #[test]
    fn poles_fold_onto_limit() {
        let c = MercatorCanvas::default();
        assert_eq!(c.project(90.0, 0.0), c.project(MAX_MERCATOR_LAT_DEG, 0.0));
        assert_eq!(c.project(-120.0, 0.0), c.project(-MAX_MERCATOR_LAT_DEG, 0.0));
        assert!(c.project(90.0, 0.0).y.is_finite());
    }

    #[test]
    fn monotonic_in_longitude_and_latitude() {
        let c = MercatorCanvas::new(1000.0, 500.0);
        for lat in (-85..=85).step_by(17) {
            let mut prev = f64::NEG_INFINITY;
            for lon in (-180..=180).step_by(15) {
                let x = c.project(lat as f64, lon as f64).x;
                assert!(x > prev);
                prev = x;
            }
        }
        for lon in (-180..=180).step_by(45) {
            let mut prev = f64::INFINITY;
            for lat in -85..=85 {
                let y = c.project(lat as f64, lon as f64).y;
                assert!(y < prev, "y not decreasing at lat {lat}");
                prev = y;
            }
        }
    }

    #[test]
    fn unproject_inverts_project() {
        let c = MercatorCanvas::new(800.0, 600.0);
        for &(lat, lon) in &[(0.0, 0.0), (51.5, -0.12), (-33.9, 151.2), (84.0, 179.0)] {
            let p = c.project(lat, lon);
            let (la, lo) = c.unproject(p.x, p.y);
            assert_relative_eq!(la, lat, epsilon = 1e-9);
            assert_relative_eq!(lo, lon, epsilon = 1e-9);
        }
    }
}
