use chrono::{DateTime, Utc};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::elements::{KeplerianElements, MU_EARTH_KM};

/// Position/velocity pair as handed over by a propagator.
/// Both vectors are in the same frame (normally ECI).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalState {
    pub position_km: Vector3<f64>,
    pub velocity_km_s: Vector3<f64>,
}

impl OrbitalState {
    pub fn new(position_km: Vector3<f64>, velocity_km_s: Vector3<f64>) -> Self {
        Self { position_km, velocity_km_s }
    }

    pub fn radius(&self) -> f64 {
        self.position_km.norm()
    }

    pub fn speed(&self) -> f64 {
        self.velocity_km_s.norm()
    }

    /// Specific angular momentum h = r × v, km^2/s.
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position_km.cross(&self.velocity_km_s)
    }
}

/// Source of orbital states over time.
///
/// Implement this around an SGP4-class propagator to plug it into ground
/// track sampling and the [`crate::tracker::Tracker`]. `None` means
/// "no state for this instant"; callers skip the sample, they never fail.
pub trait Propagator {
    /// ECI state (km, km/s) at `t`.
    fn propagate(&self, t: DateTime<Utc>) -> Option<OrbitalState>;

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

impl<F> Propagator for F
where
    F: Fn(DateTime<Utc>) -> Option<OrbitalState>,
{
    fn propagate(&self, t: DateTime<Utc>) -> Option<OrbitalState> {
        self(t)
    }
}

// ---------------------------------------------------------------------------
// Two-body reference propagator
// ---------------------------------------------------------------------------

/// Unperturbed Keplerian motion from osculating elements at `epoch`.
#[derive(Debug, Clone)]
pub struct KeplerPropagator {
    pub name: String,
    pub epoch: DateTime<Utc>,
    pub elements: KeplerianElements,
    pub mu: f64,
}

impl KeplerPropagator {
    pub fn new(name: impl Into<String>, epoch: DateTime<Utc>, elements: KeplerianElements) -> Self {
        Self { name: name.into(), epoch, elements, mu: MU_EARTH_KM }
    }
}

impl Propagator for KeplerPropagator {
    fn propagate(&self, t: DateTime<Utc>) -> Option<OrbitalState> {
        // Parabolic/hyperbolic element sets have no periodic mean motion
        if !(0.0..1.0).contains(&self.elements.ecc) || self.elements.sma <= 0.0 {
            return None;
        }
        let dt = (t - self.epoch).num_milliseconds() as f64 / 1000.0;
        let advanced = self.elements.advanced_by_mu(dt, self.mu);
        let (pos, vel) = advanced.to_state_vector_mu(self.mu);
        Some(OrbitalState::new(pos, vel))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
