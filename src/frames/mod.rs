//! Reference frames: Earth rotation, orbit (LVLH) and body (yaw-pitch-roll).
//!
//! Frames are rebuilt from scratch on every update. The only retained
//! state is the last good orbit triad held by [`OrbitFrame`].

pub mod body;
pub mod orbit;
pub mod rotation;

pub use body::YprBias;
pub use orbit::{OrbitFrame, DEGENERATE_EPS};
pub use rotation::{ecf_to_eci, eci_to_ecf, eci_to_ecf_matrix};

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Reference frame triad
// ---------------------------------------------------------------------------

/// Orthonormal right-handed triad anchored at `origin`.
///
/// `axis_length` only scales the drawn arrows. The frame the vectors are
/// expressed in (ECI, ECEF, scene) is tracked by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    pub origin: Vector3<f64>,
    pub x_hat: Vector3<f64>,
    pub y_hat: Vector3<f64>,
    pub z_hat: Vector3<f64>,
    pub axis_length: f64,
}

impl ReferenceFrame {
    /// Canonical axes at `origin`.
    pub fn identity(origin: Vector3<f64>, axis_length: f64) -> Self {
        ReferenceFrame {
            origin,
            x_hat: Vector3::x(),
            y_hat: Vector3::y(),
            z_hat: Vector3::z(),
            axis_length,
        }
    }

    /// Columns are x_hat, y_hat, z_hat: maps frame components to parent.
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[self.x_hat, self.y_hat, self.z_hat])
    }

    pub fn axes(&self) -> [Vector3<f64>; 3] {
        [self.x_hat, self.y_hat, self.z_hat]
    }

    /// Arrow tip positions pushed `offset` past the axis length (label anchors).
    pub fn tips(&self, offset: f64) -> [Vector3<f64>; 3] {
        let reach = self.axis_length + offset;
        self.axes().map(|a| self.origin + a * reach)
    }

    /// Unit length, mutual orthogonality and z = x × y, all within `tol`.
    pub fn is_orthonormal(&self, tol: f64) -> bool {
        let [x, y, z] = self.axes();
        let unit = [x, y, z].iter().all(|a| (a.norm() - 1.0).abs() <= tol);
        let ortho = x.dot(&y).abs() <= tol && y.dot(&z).abs() <= tol && x.dot(&z).abs() <= tol;
        let right_handed = (x.cross(&y) - z).norm() <= tol;
        unit && ortho && right_handed
    }

    pub fn with_origin(mut self, origin: Vector3<f64>) -> Self {
        self.origin = origin;
        self
    }
}
