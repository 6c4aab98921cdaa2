use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use super::ReferenceFrame;

/// Attitude bias of the body frame relative to its parent frame, degrees.
///
/// Yaw is about +Z, pitch about +Y, roll about +X, composed in Z-Y-X
/// order: R = Rz(yaw) · Ry(pitch) · Rx(roll).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YprBias {
    pub yaw_deg: f64,
    pub pitch_deg: f64,
    pub roll_deg: f64,
}

impl YprBias {
    pub fn new(yaw_deg: f64, pitch_deg: f64, roll_deg: f64) -> Self {
        Self { yaw_deg, pitch_deg, roll_deg }
    }

    /// Body -> parent rotation.
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        // nalgebra's from_euler_angles(roll, pitch, yaw) is Rz * Ry * Rx
        UnitQuaternion::from_euler_angles(
            self.roll_deg.to_radians(),
            self.pitch_deg.to_radians(),
            self.yaw_deg.to_radians(),
        )
    }

    pub fn is_zero(&self) -> bool {
        self.yaw_deg == 0.0 && self.pitch_deg == 0.0 && self.roll_deg == 0.0
    }
}

impl ReferenceFrame {
    /// Body axes (x = roll, y = pitch, z = yaw) from the canonical basis.
    pub fn body(origin: Vector3<f64>, bias: &YprBias, axis_length: f64) -> Self {
        let q = bias.rotation();
        ReferenceFrame {
            origin,
            x_hat: q * Vector3::x(),
            y_hat: q * Vector3::y(),
            z_hat: q * Vector3::z(),
            axis_length,
        }
    }

    /// Body axes biased from `parent` (normally the LVLH frame), anchored at
    /// the parent's origin.
    pub fn body_in(parent: &ReferenceFrame, bias: &YprBias, axis_length: f64) -> Self {
        let basis = parent.matrix();
        let q = bias.rotation();
        ReferenceFrame {
            origin: parent.origin,
            x_hat: basis * (q * Vector3::x()),
            y_hat: basis * (q * Vector3::y()),
            z_hat: basis * (q * Vector3::z()),
            axis_length,
        }
    }
}
