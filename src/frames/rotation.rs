use nalgebra::{Matrix3, Vector3};

/// Rotate an ECI vector into the Earth-fixed frame by GMST `gmst` (rad).
///
/// Magnitude is preserved; normalize afterwards only for directions.
pub fn eci_to_ecf(v: &Vector3<f64>, gmst: f64) -> Vector3<f64> {
    let (s, c) = gmst.sin_cos();
    Vector3::new(v.x * c + v.y * s, -v.x * s + v.y * c, v.z)
}

/// Inverse of [`eci_to_ecf`].
pub fn ecf_to_eci(v: &Vector3<f64>, gmst: f64) -> Vector3<f64> {
    let (s, c) = gmst.sin_cos();
    Vector3::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z)
}

/// Matrix form of [`eci_to_ecf`], for batch use.
pub fn eci_to_ecf_matrix(gmst: f64) -> Matrix3<f64> {
    let (s, c) = gmst.sin_cos();
    Matrix3::new(
        c, s, 0.0,
        -s, c, 0.0,
        0.0, 0.0, 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn() {
        let v = eci_to_ecf(&Vector3::new(1.0, 0.0, 0.5), FRAC_PI_2);
        assert_relative_eq!(v, Vector3::new(0.0, -1.0, 0.5), epsilon = 1e-15);
    }

    #[test]
    fn inverse_roundtrip_and_matrix_agree() {
        let v = Vector3::new(7000.0, -1200.0, 300.0);
        let g = 4.2;
        let f = eci_to_ecf(&v, g);
        assert_relative_eq!(f.norm(), v.norm(), epsilon = 1e-9);
        assert_relative_eq!(ecf_to_eci(&f, g), v, epsilon = 1e-9);
        assert_relative_eq!(eci_to_ecf_matrix(g) * v, f, epsilon = 1e-9);
    }
}
