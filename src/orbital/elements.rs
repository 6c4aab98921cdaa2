use std::f64::consts::TAU;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::propagator::OrbitalState;

pub const MU_EARTH_KM: f64 = 398_600.441_8; // km^3/s^2

/// Classical Keplerian orbital elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerianElements {
    pub sma: f64,       // semi-major axis, km
    pub ecc: f64,       // eccentricity (0 = circular)
    pub inc: f64,       // inclination, rad
    pub raan: f64,      // right ascension of ascending node, rad
    pub argp: f64,      // argument of periapsis, rad
    pub true_anom: f64, // true anomaly, rad
}

impl KeplerianElements {
    /// Convert Keplerian elements to ECI state vector (km, km/s).
    pub fn to_state_vector(&self) -> (Vector3<f64>, Vector3<f64>) {
        self.to_state_vector_mu(MU_EARTH_KM)
    }

    /// Convert with explicit gravitational parameter.
    pub fn to_state_vector_mu(&self, mu: f64) -> (Vector3<f64>, Vector3<f64>) {
        let p = self.sma * (1.0 - self.ecc * self.ecc); // semi-latus rectum
        let (sin_nu, cos_nu) = self.true_anom.sin_cos();
        let r = p / (1.0 + self.ecc * cos_nu);

        // Perifocal frame (PQW)
        let r_pqw = Vector3::new(r * cos_nu, r * sin_nu, 0.0);
        let sqrt_mu_p = (mu / p).sqrt();
        let v_pqw = Vector3::new(-sqrt_mu_p * sin_nu, sqrt_mu_p * (self.ecc + cos_nu), 0.0);

        let (sin_raan, cos_raan) = self.raan.sin_cos();
        let (sin_argp, cos_argp) = self.argp.sin_cos();
        let (sin_inc, cos_inc) = self.inc.sin_cos();

        let rot = |v: &Vector3<f64>| -> Vector3<f64> {
            Vector3::new(
                (cos_raan * cos_argp - sin_raan * sin_argp * cos_inc) * v.x
                    + (-cos_raan * sin_argp - sin_raan * cos_argp * cos_inc) * v.y,
                (sin_raan * cos_argp + cos_raan * sin_argp * cos_inc) * v.x
                    + (-sin_raan * sin_argp + cos_raan * cos_argp * cos_inc) * v.y,
                (sin_argp * sin_inc) * v.x + (cos_argp * sin_inc) * v.y,
            )
        };

        (rot(&r_pqw), rot(&v_pqw))
    }

    /// Convert ECI state vector to Keplerian elements.
    pub fn from_state(state: &OrbitalState) -> Self {
        Self::from_state_vector_mu(&state.position_km, &state.velocity_km_s, MU_EARTH_KM)
    }

    /// Convert with explicit gravitational parameter.
    pub fn from_state_vector_mu(pos: &Vector3<f64>, vel: &Vector3<f64>, mu: f64) -> Self {
        let r = pos.norm();
        let v = vel.norm();

        let h = pos.cross(vel);
        let h_mag = h.norm();

        // Node vector
        let n = Vector3::new(-h.y, h.x, 0.0);
        let n_mag = n.norm();

        let e_vec = ((v * v - mu / r) * pos - pos.dot(vel) * vel) / mu;
        let ecc = e_vec.norm();

        let energy = 0.5 * v * v - mu / r;
        let sma = if ecc < 1.0 - 1e-10 {
            -mu / (2.0 * energy)
        } else {
            h_mag * h_mag / (mu * (1.0 - ecc * ecc).abs())
        };

        let inc = (h.z / h_mag).clamp(-1.0, 1.0).acos();

        let raan = if n_mag > 1e-10 {
            let w = (n.x / n_mag).clamp(-1.0, 1.0).acos();
            if n.y < 0.0 { TAU - w } else { w }
        } else {
            0.0
        };

        let argp = if n_mag > 1e-10 && ecc > 1e-10 {
            let w = (n.dot(&e_vec) / (n_mag * ecc)).clamp(-1.0, 1.0).acos();
            if e_vec.z < 0.0 { TAU - w } else { w }
        } else {
            0.0
        };

        // Circular orbits: measure from the node (or the x axis if equatorial)
        let true_anom = if ecc > 1e-10 {
            let nu = (e_vec.dot(pos) / (ecc * r)).clamp(-1.0, 1.0).acos();
            if pos.dot(vel) < 0.0 { TAU - nu } else { nu }
        } else if n_mag > 1e-10 {
            let u = (n.dot(pos) / (n_mag * r)).clamp(-1.0, 1.0).acos();
            if pos.z < 0.0 { TAU - u } else { u }
        } else {
            let l = pos.y.atan2(pos.x).rem_euclid(TAU);
            if h.z < 0.0 { (TAU - l).rem_euclid(TAU) } else { l }
        };

        KeplerianElements { sma, ecc, inc, raan, argp, true_anom }
    }

    /// Orbital period for elliptical orbit (s).
    pub fn period(&self) -> f64 {
        self.period_mu(MU_EARTH_KM)
    }

    pub fn period_mu(&self, mu: f64) -> f64 {
        TAU * (self.sma.powi(3) / mu).sqrt()
    }

    /// Mean motion, rad/s.
    pub fn mean_motion_mu(&self, mu: f64) -> f64 {
        (mu / self.sma.powi(3)).sqrt()
    }

    pub fn mean_anomaly(&self) -> f64 {
        let e = self.ecc;
        let (s, c) = self.true_anom.sin_cos();
        let ecc_anom = ((1.0 - e * e).sqrt() * s).atan2(e + c);
        (ecc_anom - e * ecc_anom.sin()).rem_euclid(TAU)
    }

    /// Elements with the true anomaly moved `dt` seconds along the orbit.
    pub fn advanced_by_mu(&self, dt: f64, mu: f64) -> Self {
        let m = (self.mean_anomaly() + self.mean_motion_mu(mu) * dt).rem_euclid(TAU);
        let ecc_anom = solve_kepler(m, self.ecc);
        let e = self.ecc;
        let (s, c) = ecc_anom.sin_cos();
        let true_anom = ((1.0 - e * e).sqrt() * s).atan2(c - e).rem_euclid(TAU);
        KeplerianElements { true_anom, ..*self }
    }

    /// Create a circular orbit with radius `sma` (km) and inclination.
    pub fn circular(sma: f64, inc: f64) -> Self {
        KeplerianElements {
            sma,
            ecc: 0.0,
            inc,
            raan: 0.0,
            argp: 0.0,
            true_anom: 0.0,
        }
    }
}

/// Newton iteration on Kepler's equation M = E - e sin E (elliptic only).
fn solve_kepler(mean_anom: f64, ecc: f64) -> f64 {
    let mut e_anom = if ecc < 0.8 { mean_anom } else { std::f64::consts::PI };
    for _ in 0..50 {
        let f = e_anom - ecc * e_anom.sin() - mean_anom;
        let step = f / (1.0 - ecc * e_anom.cos());
        e_anom -= step;
        if step.abs() < 1e-14 {
            break;
        }
    }
    e_anom
}
