//! Day/night terminator on the Mercator map.

use std::f64::consts::PI;

use super::mercator::{clamp_latitude, MercatorCanvas, MercatorPoint};
use crate::ephemeris::SubSolarPoint;

// Keeps tan(subLat) away from zero at the equinoxes
const MIN_TAN_SUBSOLAR_LAT: f64 = 1e-12;

/// Terminator latitude (rad, unclamped) at longitude `lon` (rad).
pub fn terminator_latitude(lon: f64, subsolar: &SubSolarPoint) -> f64 {
    let mut t = subsolar.lat_rad.tan();
    if t.abs() < MIN_TAN_SUBSOLAR_LAT {
        // sign matches the edge night_polygon closes along
        t = if subsolar.lat_rad > 0.0 { MIN_TAN_SUBSOLAR_LAT } else { -MIN_TAN_SUBSOLAR_LAT };
    }
    (-(lon - subsolar.lon_rad).cos() / t).atan()
}

/// Terminator polyline, `columns + 1` samples from lon -180 to +180,
/// latitudes clamped to the Mercator limit.
pub fn terminator_curve(
    canvas: &MercatorCanvas,
    subsolar: &SubSolarPoint,
    columns: usize,
) -> Vec<MercatorPoint> {
    let columns = columns.max(1);
    (0..=columns)
        .map(|i| {
            let lon = (i as f64 / columns as f64) * 2.0 * PI - PI;
            let lat = clamp_latitude(terminator_latitude(lon, subsolar).to_degrees());
            canvas.project(lat, lon.to_degrees())
        })
        .collect()
}

/// Closed night-side polygon: the terminator curve, then back along the
/// bottom edge when the sun is north of the equator, else the top edge.
pub fn night_polygon(
    canvas: &MercatorCanvas,
    subsolar: &SubSolarPoint,
    columns: usize,
) -> Vec<MercatorPoint> {
    let mut pts = terminator_curve(canvas, subsolar, columns);
    let edge_y = if subsolar.lat_rad > 0.0 { canvas.height } else { 0.0 };
    // curve always has at least two points
    let first_x = pts[0].x;
    let last_x = pts[pts.len() - 1].x;
    pts.push(MercatorPoint { x: last_x, y: edge_y });
    pts.push(MercatorPoint { x: first_x, y: edge_y });
    pts
}

/// One column per canvas pixel, as drawn on a raster canvas.
pub fn pixel_columns(canvas: &MercatorCanvas) -> usize {
    (canvas.width.round() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sub(lat_deg: f64, lon_deg: f64) -> SubSolarPoint {
        SubSolarPoint { lat_rad: lat_deg.to_radians(), lon_rad: lon_deg.to_radians() }
    }

    #[test]
    fn curve_spans_full_width() {
        let c = MercatorCanvas::new(360.0, 180.0);
        let pts = terminator_curve(&c, &sub(20.0, 30.0), pixel_columns(&c));
        assert_eq!(pts.len(), 361);
        assert_relative_eq!(pts[0].x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pts[360].x, 360.0, epsilon = 1e-9);
        assert!(pts.iter().all(|p| p.y.is_finite()));
    }

    #[test]
    fn terminator_is_90_degrees_from_subsolar_point() {
        let s = sub(23.0, 45.0);
        // under the sun the terminator sits at subLat - 90
        assert_relative_eq!(terminator_latitude(45_f64.to_radians(), &s).to_degrees(), -67.0, epsilon = 1e-9);
        // opposite meridian: 90 - subLat
        assert_relative_eq!(terminator_latitude((-135_f64).to_radians(), &s).to_degrees(), 67.0, epsilon = 1e-9);
        // quarter turn away: crosses the equator
        assert_relative_eq!(terminator_latitude(135_f64.to_radians(), &s), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn night_closes_along_bottom_in_northern_summer() {
        let c = MercatorCanvas::new(400.0, 200.0);
        let poly = night_polygon(&c, &sub(23.0, 0.0), 40);
        assert_eq!(poly.len(), 43);
        let n = poly.len();
        assert_eq!(poly[n - 2].y, 200.0);
        assert_eq!(poly[n - 1].y, 200.0);
        assert_relative_eq!(poly[n - 2].x, 400.0, epsilon = 1e-9);
        assert_relative_eq!(poly[n - 1].x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn night_closes_along_top_in_southern_summer() {
        let c = MercatorCanvas::new(400.0, 200.0);
        let poly = night_polygon(&c, &sub(-23.0, 0.0), 40);
        let n = poly.len();
        assert_eq!(poly[n - 1].y, 0.0);
        assert_eq!(poly[n - 2].y, 0.0);
    }

    #[test]
    fn equinox_stays_finite() {
        let c = MercatorCanvas::new(400.0, 200.0);
        for lat in [0.0, -0.0] {
            let pts = night_polygon(&c, &sub(lat, 10.0), 400);
            assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }
}
