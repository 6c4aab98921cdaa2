use serde::{Deserialize, Serialize};

use super::elements::KeplerianElements;
use super::propagator::OrbitalState;

/// Coarse orbit regime, used for menu grouping and display defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbitClass {
    Leo,
    Meo,
    Geo,
    Heo,
}

impl OrbitClass {
    pub fn label(&self) -> &'static str {
        match self {
            OrbitClass::Leo => "LEO",
            OrbitClass::Meo => "MEO",
            OrbitClass::Geo => "GEO",
            OrbitClass::Heo => "HEO",
        }
    }
}

/// Period bounds in minutes. These are display heuristics, not physics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitClassThresholds {
    pub leo_max_period_min: f64,
    pub geo_period_min: f64,
    pub geo_tolerance_min: f64,
}

impl Default for OrbitClassThresholds {
    fn default() -> Self {
        Self {
            leo_max_period_min: 128.0,
            geo_period_min: 1436.0,   // one sidereal day
            geo_tolerance_min: 30.0,
        }
    }
}

impl OrbitClassThresholds {
    pub fn classify_period(&self, period_s: f64) -> OrbitClass {
        let minutes = period_s / 60.0;
        if !minutes.is_finite() {
            OrbitClass::Heo
        } else if minutes <= self.leo_max_period_min {
            OrbitClass::Leo
        } else if (minutes - self.geo_period_min).abs() <= self.geo_tolerance_min {
            OrbitClass::Geo
        } else if minutes < self.geo_period_min {
            OrbitClass::Meo
        } else {
            OrbitClass::Heo
        }
    }

    /// Classify from an ECI state. Unbound trajectories count as HEO.
    pub fn classify(&self, state: &OrbitalState) -> OrbitClass {
        let el = KeplerianElements::from_state(state);
        if el.ecc >= 1.0 || el.sma <= 0.0 {
            return OrbitClass::Heo;
        }
        self.classify_period(el.period())
    }
}
