use nalgebra::{Matrix4, Perspective3, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};

use crate::frames::ReferenceFrame;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,  // px
    pub height: f64, // px
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Pixel position, screen Y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,    // NDC z
    pub visible: bool, // in front of the camera and inside the clip volume
}

/// Combined projection × view transform of some camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection(pub Matrix4<f64>);

impl ViewProjection {
    /// Normalized device coordinates of `p`. `None` when the point sits on
    /// the camera plane (w = 0).
    pub fn project(&self, p: &Point3<f64>) -> Option<(Vector3<f64>, f64)> {
        let clip: Vector4<f64> = self.0 * p.to_homogeneous();
        if clip.w == 0.0 {
            return None;
        }
        Some((clip.xyz() / clip.w, clip.w))
    }

    /// World point to pixel coordinates in `viewport`.
    pub fn world_to_screen(&self, p: &Point3<f64>, viewport: &Viewport) -> Option<ScreenPoint> {
        let (ndc, w) = self.project(p)?;
        let inside = ndc.iter().all(|c| (-1.0..=1.0).contains(c));
        Some(ScreenPoint {
            x: (ndc.x * 0.5 + 0.5) * viewport.width,
            y: (-ndc.y * 0.5 + 0.5) * viewport.height,
            depth: ndc.z,
            visible: w > 0.0 && inside,
        })
    }
}

/// Screen anchors for the x/y/z axis labels of `frame`, `offset` beyond the
/// arrow tips. Same order as [`ReferenceFrame::axes`].
pub fn axis_label_anchors(
    frame: &ReferenceFrame,
    view: &ViewProjection,
    viewport: &Viewport,
    offset: f64,
) -> [Option<ScreenPoint>; 3] {
    frame
        .tips(offset)
        .map(|tip| view.world_to_screen(&Point3::from(tip), viewport))
}

// ---------------------------------------------------------------------------
// Perspective camera
// ---------------------------------------------------------------------------

/// Right-handed perspective camera looking from `eye` at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    pub fov_y: f64, // rad
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.eye, &self.target, &self.up)
    }

    pub fn projection_matrix(&self, aspect: f64) -> Matrix4<f64> {
        Perspective3::new(aspect, self.fov_y, self.near, self.far).to_homogeneous()
    }

    pub fn view_projection(&self, viewport: &Viewport) -> ViewProjection {
        ViewProjection(self.projection_matrix(viewport.aspect()) * self.view_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera {
            eye: Point3::new(0.0, 0.0, 30.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov_y: 45_f64.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    #[test]
    fn identity_transform_maps_ndc_corners() {
        let vp = Viewport::new(800.0, 600.0);
        let view = ViewProjection(Matrix4::identity());
        let tl = view.world_to_screen(&Point3::new(-1.0, 1.0, 0.0), &vp).unwrap();
        assert_eq!((tl.x, tl.y), (0.0, 0.0));
        let br = view.world_to_screen(&Point3::new(1.0, -1.0, 0.0), &vp).unwrap();
        assert_eq!((br.x, br.y), (800.0, 600.0));
        let c = view.world_to_screen(&Point3::origin(), &vp).unwrap();
        assert_eq!((c.x, c.y), (400.0, 300.0));
        assert!(c.visible);
    }

    #[test]
    fn target_projects_to_viewport_centre() {
        let vp = Viewport::new(1024.0, 768.0);
        let s = camera().view_projection(&vp).world_to_screen(&Point3::origin(), &vp).unwrap();
        assert_relative_eq!(s.x, 512.0, epsilon = 1e-9);
        assert_relative_eq!(s.y, 384.0, epsilon = 1e-9);
        assert!(s.visible);
    }

    #[test]
    fn up_is_up_on_screen() {
        let vp = Viewport::new(640.0, 480.0);
        let view = camera().view_projection(&vp);
        let above = view.world_to_screen(&Point3::new(0.0, 5.0, 0.0), &vp).unwrap();
        let right = view.world_to_screen(&Point3::new(5.0, 0.0, 0.0), &vp).unwrap();
        assert!(above.y < 240.0);
        assert!(right.x > 320.0);
    }

    #[test]
    fn behind_camera_is_not_visible() {
        let vp = Viewport::new(640.0, 480.0);
        let s = camera()
            .view_projection(&vp)
            .world_to_screen(&Point3::new(0.0, 0.0, 60.0), &vp)
            .unwrap();
        assert!(!s.visible);
    }

    #[test]
    fn label_anchors_follow_tips() {
        let vp = Viewport::new(200.0, 200.0);
        let view = ViewProjection(Matrix4::identity());
        let frame = ReferenceFrame::identity(nalgebra::Vector3::zeros(), 0.5);
        let [x, y, _] = axis_label_anchors(&frame, &view, &vp, 0.25);
        let x = x.unwrap();
        let y = y.unwrap();
        assert_relative_eq!(x.x, 175.0);
        assert_relative_eq!(x.y, 100.0);
        assert_relative_eq!(y.x, 100.0);
        assert_relative_eq!(y.y, 25.0);
    }
}
