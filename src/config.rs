use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{io_err, Error, Result};
use crate::frames::YprBias;
use crate::orbital::OrbitClassThresholds;
use crate::projection::{MercatorCanvas, SceneAxes};

/// Ground-track sampling window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTrackConfig {
    pub step_s: f64,
    pub duration_s: f64,
}

impl Default for GroundTrackConfig {
    fn default() -> Self {
        Self {
            step_s: 60.0,
            duration_s: 5400.0, // ~one LEO revolution
        }
    }
}

impl GroundTrackConfig {
    pub fn step(&self) -> Duration {
        Duration::milliseconds((self.step_s * 1000.0).round() as i64)
    }

    pub fn duration(&self) -> Duration {
        Duration::milliseconds((self.duration_s * 1000.0).round() as i64)
    }
}

/// Display and geometry settings. Every field has a default, so a JSON
/// file only needs the keys it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub km_to_scene_units: f64,
    pub scene_axes: SceneAxes,
    pub orbit_axis_length_km: f64,
    pub body_axis_length_km: f64,
    pub label_offset: f64, // scene units past the arrow tip
    pub mercator: MercatorCanvas,
    pub ground_track: GroundTrackConfig,
    pub orbit_classes: OrbitClassThresholds,
    pub bias: YprBias,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            km_to_scene_units: 0.001,
            scene_axes: SceneAxes::ZUp,
            orbit_axis_length_km: 10_000.0,
            body_axis_length_km: 3_000.0,
            label_offset: 1.0,
            mercator: MercatorCanvas::default(),
            ground_track: GroundTrackConfig::default(),
            orbit_classes: OrbitClassThresholds::default(),
            bias: YprBias::default(),
        }
    }
}

fn positive(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{} must be positive, got {}", name, v)))
    }
}

impl SceneConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: SceneConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let cfg = Self::from_json_str(&text)?;
        log::info!("loaded scene config from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        positive("km_to_scene_units", self.km_to_scene_units)?;
        positive("orbit_axis_length_km", self.orbit_axis_length_km)?;
        positive("body_axis_length_km", self.body_axis_length_km)?;
        positive("mercator.width", self.mercator.width)?;
        positive("mercator.height", self.mercator.height)?;
        positive("ground_track.step_s", self.ground_track.step_s)?;
        if !(self.ground_track.duration_s >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "ground_track.duration_s must be non-negative, got {}",
                self.ground_track.duration_s
            )));
        }
        if !self.label_offset.is_finite() {
            return Err(Error::InvalidConfig("label_offset must be finite".into()));
        }
        let c = &self.orbit_classes;
        if c.leo_max_period_min >= c.geo_period_min - c.geo_tolerance_min {
            return Err(Error::InvalidConfig(format!(
                "LEO bound {} min overlaps the GEO window {}±{} min",
                c.leo_max_period_min, c.geo_period_min, c.geo_tolerance_min
            )));
        }
        Ok(())
    }

    /// Orbit-frame arrow length in scene units.
    pub fn orbit_axis_length(&self) -> f64 {
        self.orbit_axis_length_km * self.km_to_scene_units
    }

    /// Body-frame arrow length in scene units.
    pub fn body_axis_length(&self) -> f64 {
        self.body_axis_length_km * self.km_to_scene_units
    }
}
