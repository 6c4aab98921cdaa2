use nalgebra::Vector3;

use super::ReferenceFrame;
use crate::orbital::OrbitalState;

/// Below this |r| or |h| (working units) the LVLH triad is undefined.
pub const DEGENERATE_EPS: f64 = 1e-6;

// LVLH conventions
//   +Z  nadir (toward geocentre)
//   +Y  -h, opposite the orbital angular momentum
//   +X  y × z, completes the right-handed triad (~velocity)

impl ReferenceFrame {
    /// LVLH triad at the satellite. `None` when r or h is degenerate.
    pub fn orbit(state: &OrbitalState, axis_length: f64) -> Option<Self> {
        let r = state.position_km;
        let h = state.angular_momentum();
        let r_len = r.norm();
        let h_len = h.norm();
        if !(r_len >= DEGENERATE_EPS && h_len >= DEGENERATE_EPS) {
            return None;
        }

        let z_hat = -r / r_len;
        let y_hat = -h / h_len;
        let x_hat = y_hat.cross(&z_hat).normalize();

        Some(ReferenceFrame { origin: r, x_hat, y_hat, z_hat, axis_length })
    }
}

/// Owned LVLH frame reused across render ticks.
///
/// A degenerate update leaves the previous orientation in place and marks
/// the frame stale; the next good update clears the flag.
#[derive(Debug, Clone)]
pub struct OrbitFrame {
    frame: ReferenceFrame,
    stale: bool,
    updated: bool,
}

impl OrbitFrame {
    pub fn new(axis_length: f64) -> Self {
        Self {
            frame: ReferenceFrame::identity(Vector3::zeros(), axis_length),
            stale: false,
            updated: false,
        }
    }

    /// Rebuild from `state`. Returns false (and keeps the old triad) when
    /// the geometry is degenerate.
    pub fn update(&mut self, state: &OrbitalState) -> bool {
        match ReferenceFrame::orbit(state, self.frame.axis_length) {
            Some(frame) => {
                self.frame = frame;
                self.stale = false;
                self.updated = true;
                true
            }
            None => {
                log::debug!(
                    "orbit frame update skipped: |r|={:.3e}, |h|={:.3e}",
                    state.radius(),
                    state.angular_momentum().norm()
                );
                self.stale = true;
                false
            }
        }
    }

    pub fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }

    /// True after a skipped update until the next successful one.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// True once any update has succeeded.
    pub fn has_frame(&self) -> bool {
        self.updated
    }

    pub fn set_axis_length(&mut self, axis_length: f64) {
        self.frame.axis_length = axis_length;
    }

    /// Forget the cached triad, as if no update had happened.
    pub fn reset(&mut self) {
        *self = Self::new(self.frame.axis_length);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn state(r: [f64; 3], v: [f64; 3]) -> OrbitalState {
        OrbitalState::new(Vector3::from(r), Vector3::from(v))
    }

    #[test]
    fn equatorial_prograde_reference_case() {
        let f = ReferenceFrame::orbit(&state([7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]), 1.0).unwrap();
        assert_relative_eq!(f.z_hat, Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-15);
        assert_relative_eq!(f.y_hat, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-15);
        assert_relative_eq!(f.x_hat, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-15);
        assert_eq!(f.origin, Vector3::new(7000.0, 0.0, 0.0));
    }

    #[test]
    fn x_axis_follows_velocity_for_circular_orbit() {
        let s = state([0.0, 4949.7, 4949.7], [-7.5, 0.0, 0.0]);
        let f = ReferenceFrame::orbit(&s, 1.0).unwrap();
        assert_relative_eq!(f.x_hat, s.velocity_km_s.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_inputs_yield_none() {
        assert!(ReferenceFrame::orbit(&state([0.0; 3], [0.0, 7.5, 0.0]), 1.0).is_none());
        // radial velocity only: h = 0
        assert!(ReferenceFrame::orbit(&state([7000.0, 0.0, 0.0], [3.0, 0.0, 0.0]), 1.0).is_none());
        assert!(ReferenceFrame::orbit(&state([f64::NAN, 0.0, 0.0], [0.0, 7.5, 0.0]), 1.0).is_none());
    }

    #[test]
    fn degenerate_update_keeps_previous_triad() {
        let mut of = OrbitFrame::new(10.0);
        assert!(!of.has_frame());
        assert!(of.update(&state([7000.0, 0.0, 0.0], [0.0, 7.5, 0.0])));
        let before = *of.frame();

        assert!(!of.update(&state([0.0; 3], [0.0; 3])));
        assert!(of.is_stale());
        assert_eq!(*of.frame(), before);

        assert!(of.update(&state([0.0, 7000.0, 0.0], [-7.5, 0.0, 0.0])));
        assert!(!of.is_stale());
        assert_relative_eq!(of.frame().z_hat, Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-15);
        assert_eq!(of.frame().axis_length, 10.0);
    }

    fn component() -> impl Strategy<Value = f64> {
        -50_000.0..50_000.0f64
    }

    proptest! {
        #[test]
        fn triad_is_orthonormal_and_right_handed(
            rx in component(), ry in component(), rz in component(),
            vx in -10.0..10.0f64, vy in -10.0..10.0f64, vz in -10.0..10.0f64,
        ) {
            let s = state([rx, ry, rz], [vx, vy, vz]);
            let r = s.position_km.norm();
            let h = s.angular_momentum().norm();
            // keep r and v clearly non-parallel
            prop_assume!(r > 100.0 && h > 1e-3 * r * s.velocity_km_s.norm().max(1e-3));

            let f = ReferenceFrame::orbit(&s, 1.0).unwrap();
            prop_assert!(f.x_hat.dot(&f.y_hat).abs() < 1e-9);
            prop_assert!(f.y_hat.dot(&f.z_hat).abs() < 1e-9);
            prop_assert!(f.x_hat.dot(&f.z_hat).abs() < 1e-9);
            prop_assert!((f.x_hat.cross(&f.y_hat) - f.z_hat).norm() < 1e-9);
            prop_assert!(f.is_orthonormal(1e-9));
        }
    }
}
