use chrono::{DateTime, Utc};
use nalgebra::{Point3, Vector3};
use serde::Serialize;

use crate::config::SceneConfig;
use crate::ephemeris::{sun_direction_eci, SubSolarPoint};
use crate::frames::{eci_to_ecf, OrbitFrame, ReferenceFrame, YprBias};
use crate::geodesy::{GeodeticCoordinate, WGS84};
use crate::orbital::{OrbitClass, OrbitalState, Propagator};
use crate::projection::{
    axis_label_anchors, ground_track, night_polygon, pixel_columns, GroundTrack, MercatorPoint,
    ScreenPoint, ViewProjection, Viewport,
};
use crate::time::{gmst_from_julian_day, julian_day};

// ---------------------------------------------------------------------------
// Per-tick output
// ---------------------------------------------------------------------------

/// Satellite geometry at one instant. Vectors are ECI km unless named ECEF.
#[derive(Debug, Clone, Serialize)]
pub struct SatelliteView {
    pub state: OrbitalState,
    pub position_ecef_km: Vector3<f64>,
    pub geodetic: GeodeticCoordinate,
    pub mercator: MercatorPoint,
    pub orbit_frame: Option<ReferenceFrame>,
    pub body_frame: Option<ReferenceFrame>,
    pub class: OrbitClass,
    /// Orbit frame orientation is from an earlier tick.
    pub stale: bool,
}

/// Everything the renderer needs for one displayed time step. Sun and
/// satellite always refer to the same instant.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time: DateTime<Utc>,
    pub julian_day: f64,
    pub gmst_rad: f64,
    pub sun_eci: Vector3<f64>,
    pub sun_ecef: Vector3<f64>,
    pub subsolar: SubSolarPoint,
    pub satellite: Option<SatelliteView>,
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Owns the state that survives between ticks: the last good orbit frame
/// and the current attitude bias.
#[derive(Debug, Clone)]
pub struct Tracker {
    config: SceneConfig,
    orbit_frame: OrbitFrame,
    bias: YprBias,
}

impl Tracker {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            orbit_frame: OrbitFrame::new(config.orbit_axis_length_km),
            bias: config.bias,
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn bias(&self) -> YprBias {
        self.bias
    }

    pub fn set_bias(&mut self, bias: YprBias) {
        self.bias = bias;
    }

    /// Drop the cached orbit frame. Call when the tracked satellite changes
    /// so a degenerate state cannot fall back to another satellite's triad.
    pub fn reset_frame(&mut self) {
        self.orbit_frame.reset();
    }

    /// Compute one snapshot at `t`. A failed propagation only clears
    /// `satellite`; sun and sidereal time are always filled in.
    pub fn tick<P: Propagator + ?Sized>(&mut self, propagator: &P, t: DateTime<Utc>) -> Snapshot {
        let jd = julian_day(t);
        let gmst = gmst_from_julian_day(jd);
        let sun_eci = sun_direction_eci(jd);
        let sun_ecef = eci_to_ecf(&sun_eci, gmst).normalize();
        let subsolar = SubSolarPoint::from_sun_ecef(&sun_ecef);

        let satellite = match propagator.propagate(t) {
            Some(state) => Some(self.view(&state, gmst)),
            None => {
                log::debug!("{}: no state at {}, skipping satellite update", propagator.name(), t);
                None
            }
        };

        Snapshot { time: t, julian_day: jd, gmst_rad: gmst, sun_eci, sun_ecef, subsolar, satellite }
    }

    fn view(&mut self, state: &OrbitalState, gmst: f64) -> SatelliteView {
        self.orbit_frame.update(state);
        let origin = state.position_km;

        let orbit_frame = self
            .orbit_frame
            .has_frame()
            .then(|| self.orbit_frame.frame().with_origin(origin));
        let body_frame = orbit_frame
            .as_ref()
            .map(|lvlh| ReferenceFrame::body_in(lvlh, &self.bias, self.config.body_axis_length_km));

        let position_ecef_km = eci_to_ecf(&origin, gmst);
        let geodetic = WGS84.cartesian_to_geodetic(&position_ecef_km);

        SatelliteView {
            state: *state,
            position_ecef_km,
            geodetic,
            mercator: self.config.mercator.project(geodetic.lat_deg, geodetic.lon_deg),
            orbit_frame,
            body_frame,
            class: self.config.orbit_classes.classify(state),
            stale: self.orbit_frame.is_stale(),
        }
    }

    /// Ground track over the configured window from `start`.
    pub fn ground_track<P: Propagator + ?Sized>(&self, propagator: &P, start: DateTime<Utc>) -> GroundTrack {
        let gt = &self.config.ground_track;
        ground_track(propagator, start, gt.step(), gt.duration(), &self.config.mercator)
    }

    /// Night-side polygon for `snapshot`, one column per canvas pixel.
    pub fn night_polygon(&self, snapshot: &Snapshot) -> Vec<MercatorPoint> {
        let canvas = &self.config.mercator;
        night_polygon(canvas, &snapshot.subsolar, pixel_columns(canvas))
    }

    /// `frame` (km, core axes) expressed in scene units and axes.
    pub fn scene_frame(&self, frame: &ReferenceFrame) -> ReferenceFrame {
        let axes = self.config.scene_axes;
        let k = self.config.km_to_scene_units;
        ReferenceFrame {
            origin: axes.to_scene(&frame.origin, k),
            x_hat: axes.direction_to_scene(&frame.x_hat),
            y_hat: axes.direction_to_scene(&frame.y_hat),
            z_hat: axes.direction_to_scene(&frame.z_hat),
            axis_length: frame.axis_length * k,
        }
    }

    /// Screen anchors for the x/y/z labels of a core-space frame.
    pub fn axis_labels(
        &self,
        frame: &ReferenceFrame,
        view: &ViewProjection,
        viewport: &Viewport,
    ) -> [Option<ScreenPoint>; 3] {
        axis_label_anchors(&self.scene_frame(frame), view, viewport, self.config.label_offset)
    }

    /// Satellite marker position on screen.
    pub fn satellite_on_screen(
        &self,
        sat: &SatelliteView,
        view: &ViewProjection,
        viewport: &Viewport,
    ) -> Option<ScreenPoint> {
        let p = self.config.scene_axes.to_scene(&sat.state.position_km, self.config.km_to_scene_units);
        view.world_to_screen(&Point3::from(p), viewport)
    }
}
