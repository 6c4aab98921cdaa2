//! Ground-track sampling and its Mercator polyline.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::mercator::{MercatorCanvas, MercatorPoint};
use crate::frames::eci_to_ecf;
use crate::geodesy::{GeodeticCoordinate, WGS84};
use crate::orbital::{OrbitalState, Propagator};
use crate::time::gmst;

/// All samples within this spread (deg) count as a stationary track.
pub const STATIONARY_SPREAD_DEG: f64 = 0.01;
/// Half width (deg longitude) of the marker drawn for a stationary track.
pub const STATIONARY_MARKER_HALF_WIDTH_DEG: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    pub time: DateTime<Utc>,
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub pixel: MercatorPoint,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroundTrack {
    points: Vec<TrackPoint>,
    collapsed: bool,
}

impl GroundTrack {
    /// Build from geodetic samples already in time order.
    ///
    /// A near-stationary track (latitude and longitude each spanning at
    /// most 0.01°) becomes a two-point marker 0.1° wide so it still draws.
    /// The marker is shifted inward when it would cross ±180°.
    pub fn from_samples(samples: &[(DateTime<Utc>, GeodeticCoordinate)], canvas: &MercatorCanvas) -> Self {
        let Some(&(t0, first)) = samples.first() else {
            return GroundTrack::default();
        };

        if is_stationary(samples) {
            let t1 = samples.last().map_or(t0, |s| s.0);
            let lat = first.lat_deg;
            let edge = 180.0 - STATIONARY_MARKER_HALF_WIDTH_DEG;
            let centre = wrapped_lon_diff(first.lon_deg, 0.0).clamp(-edge, edge);
            let points = [
                (t0, centre - STATIONARY_MARKER_HALF_WIDTH_DEG),
                (t1, centre + STATIONARY_MARKER_HALF_WIDTH_DEG),
            ]
            .into_iter()
            .map(|(time, lon_deg)| TrackPoint { time, lat_deg: lat, lon_deg, pixel: canvas.project(lat, lon_deg) })
            .collect();
            return GroundTrack { points, collapsed: true };
        }

        let points = samples
            .iter()
            .map(|&(time, g)| TrackPoint {
                time,
                lat_deg: g.lat_deg,
                lon_deg: g.lon_deg,
                pixel: canvas.project(g.lat_deg, g.lon_deg),
            })
            .collect();
        GroundTrack { points, collapsed: false }
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the stationary-track marker replaced the samples.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Polyline pieces split where the track wraps across ±180°, so a
    /// canvas does not draw a line across the whole map.
    pub fn segments(&self) -> Vec<&[TrackPoint]> {
        let mut out = Vec::new();
        let mut start = 0;
        for i in 1..self.points.len() {
            if (self.points[i].lon_deg - self.points[i - 1].lon_deg).abs() > 180.0 {
                out.push(&self.points[start..i]);
                start = i;
            }
        }
        if start < self.points.len() {
            out.push(&self.points[start..]);
        }
        out
    }
}

fn wrapped_lon_diff(a: f64, b: f64) -> f64 {
    (a - b + 540.0).rem_euclid(360.0) - 180.0
}

fn spread(values: impl Iterator<Item = f64>) -> f64 {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    hi - lo
}

// longitude offsets are taken against the first sample so ±180° does not
// count as a full-width spread
fn is_stationary(samples: &[(DateTime<Utc>, GeodeticCoordinate)]) -> bool {
    let first = samples[0].1;
    spread(samples.iter().map(|(_, g)| g.lat_deg)) <= STATIONARY_SPREAD_DEG
        && spread(samples.iter().map(|(_, g)| wrapped_lon_diff(g.lon_deg, first.lon_deg))) <= STATIONARY_SPREAD_DEG
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// Sample instants start, start + step, ... up to start + duration inclusive.
/// Empty when `step` is not positive.
pub fn sample_times(start: DateTime<Utc>, step: Duration, duration: Duration) -> Vec<DateTime<Utc>> {
    let step_ms = step.num_milliseconds();
    if step_ms <= 0 {
        log::warn!("ground track step must be positive, got {} ms", step_ms);
        return Vec::new();
    }
    let n = duration.num_milliseconds().max(0) / step_ms;
    (0..=n).map(|i| start + Duration::milliseconds(i * step_ms)).collect()
}

/// Collect geodetic samples from `locate`; instants where it returns
/// `None` are skipped, not interpolated.
pub fn sample_geodetic<F>(
    start: DateTime<Utc>,
    step: Duration,
    duration: Duration,
    mut locate: F,
) -> Vec<(DateTime<Utc>, GeodeticCoordinate)>
where
    F: FnMut(DateTime<Utc>) -> Option<GeodeticCoordinate>,
{
    sample_times(start, step, duration)
        .into_iter()
        .filter_map(|t| match locate(t) {
            Some(g) => Some((t, g)),
            None => {
                log::trace!("no ground-track sample at {}", t);
                None
            }
        })
        .collect()
}

/// Geodetic point beneath an ECI state at `t` (WGS84).
pub fn subsatellite_point(state: &OrbitalState, t: DateTime<Utc>) -> GeodeticCoordinate {
    let ecef = eci_to_ecf(&state.position_km, gmst(t));
    WGS84.cartesian_to_geodetic(&ecef)
}

/// Sample `propagator` and build the Mercator ground track.
pub fn ground_track<P: Propagator + ?Sized>(
    propagator: &P,
    start: DateTime<Utc>,
    step: Duration,
    duration: Duration,
    canvas: &MercatorCanvas,
) -> GroundTrack {
    let samples = sample_geodetic(start, step, duration, |t| {
        propagator.propagate(t).map(|s| subsatellite_point(&s, t))
    });
    log::debug!("{}: {} ground-track samples", propagator.name(), samples.len());
    GroundTrack::from_samples(&samples, canvas)
}
