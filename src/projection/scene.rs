use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Axis convention of the renderer's scene graph.
///
/// Core vectors are Z-up (ECEF/ECI). `YUp` scenes put the polar axis on
/// scene Y and the 90°E axis on scene Z. The swap is applied here and
/// nowhere else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneAxes {
    #[default]
    ZUp,
    YUp,
}

impl SceneAxes {
    /// Core vector (km) to scene coordinates.
    pub fn to_scene(&self, v_km: &Vector3<f64>, km_to_units: f64) -> Vector3<f64> {
        self.swap(v_km) * km_to_units
    }

    /// Scene coordinates back to a core vector (km).
    pub fn from_scene(&self, v: &Vector3<f64>, km_to_units: f64) -> Vector3<f64> {
        self.swap(v) / km_to_units
    }

    /// Directions: axis swap only, no scaling.
    pub fn direction_to_scene(&self, dir: &Vector3<f64>) -> Vector3<f64> {
        self.swap(dir)
    }

    fn swap(&self, v: &Vector3<f64>) -> Vector3<f64> {
        match self {
            SceneAxes::ZUp => *v,
            SceneAxes::YUp => Vector3::new(v.x, v.z, v.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_up_puts_pole_on_scene_y() {
        let pole = Vector3::new(0.0, 0.0, 6356.0);
        assert_eq!(SceneAxes::YUp.to_scene(&pole, 0.001), Vector3::new(0.0, 6.356, 0.0));
        assert_eq!(SceneAxes::ZUp.to_scene(&pole, 1.0), pole);
    }

    #[test]
    fn scene_roundtrip() {
        let v = Vector3::new(1000.0, -2000.0, 3000.0);
        for axes in [SceneAxes::ZUp, SceneAxes::YUp] {
            let back = axes.from_scene(&axes.to_scene(&v, 0.5), 0.5);
            assert_eq!(back, v);
        }
        assert_eq!(SceneAxes::YUp.direction_to_scene(&Vector3::y()), Vector3::z());
    }

    #[test]
    fn serde_names() {
        let a: SceneAxes = serde_json::from_str("\"y_up\"").unwrap();
        assert_eq!(a, SceneAxes::YUp);
    }
}
