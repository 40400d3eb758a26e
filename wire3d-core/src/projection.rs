/// Camera and projection
use crate::geometry::Point3D;
use crate::surface::ScreenPoint;
use crate::transform::Matrix4x4;

/// Focal constant controlling how strongly depth shrinks geometry.
pub const DEFAULT_FOCAL_LENGTH: f64 = 500.0;

/// Viewer camera.
///
/// Rotation is applied to world points before the depth test, and the eye
/// position is only subtracted afterwards. Rotating the camera therefore
/// spins the world about the origin rather than about the eye.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3D,
    pub zoom: f64,
    /// Accumulated rotation, left-multiplied by each new delta.
    pub transform: Matrix4x4,
    pub focal_length: f64,
}

impl Camera {
    pub fn new(position: Point3D, zoom: f64) -> Self {
        Self {
            position,
            zoom,
            transform: Matrix4x4::identity(),
            focal_length: DEFAULT_FOCAL_LENGTH,
        }
    }

    pub fn with_focal_length(mut self, focal_length: f64) -> Self {
        self.focal_length = focal_length;
        self
    }

    /// Project a world point onto a square surface of side `surface_size`.
    ///
    /// Returns `None` when the rotated point sits at or behind the camera's
    /// z plane; such a point must not be drawn.
    pub fn project(&self, point: &Point3D, surface_size: f64) -> Option<ScreenPoint> {
        let pt = self.transform.transform(point);

        let dz = pt.z - self.position.z;
        if dz <= 0.0 {
            return None;
        }

        let scale = self.zoom * self.focal_length / dz;
        let half = surface_size / 2.0;

        let x = (pt.x - self.position.x) * scale + half;
        // Screen y grows downward, world y grows upward
        let y = -(pt.y - self.position.y) * scale + half;

        Some(ScreenPoint::new(x, y))
    }

    /// Move the eye by a world-space offset.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.position.x += dx;
        self.position.y += dy;
        self.position.z += dz;
    }

    /// Compose a rotation delta onto the accumulated transform: `Δ · old`.
    pub fn rotate(&mut self, delta: &Matrix4x4) {
        self.transform = delta.multiply(&self.transform);
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.zoom *= factor;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3D::origin(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!(camera.zoom, 1.0);
        assert_eq!(camera.focal_length, 500.0);
        assert_eq!(camera.transform, Matrix4x4::identity());
    }

    #[test]
    fn test_point_ahead_projects_to_center() {
        let camera = Camera::default();
        let p = camera.project(&Point3D::new(0.0, 0.0, 500.0), 600.0).unwrap();
        assert!((p.x - 300.0).abs() < EPS);
        assert!((p.y - 300.0).abs() < EPS);
    }

    #[test]
    fn test_behind_is_decided_by_depth_only() {
        let mut camera = Camera::default();
        camera.position = Point3D::new(40.0, -20.0, 100.0);

        assert!(camera.project(&Point3D::new(0.0, 0.0, 100.0), 600.0).is_none());
        assert!(camera.project(&Point3D::new(999.0, 999.0, 50.0), 600.0).is_none());
        assert!(camera.project(&Point3D::new(0.0, 0.0, 100.001), 600.0).is_some());
    }

    #[test]
    fn test_behind_uses_rotated_point() {
        let mut camera = Camera::default();
        camera.rotate(&Matrix4x4::rotation_y(std::f64::consts::PI));
        // (0, 0, 10) rotates to (0, 0, -10)
        assert!(camera.project(&Point3D::new(0.0, 0.0, 10.0), 600.0).is_none());
        assert!(camera.project(&Point3D::new(0.0, 0.0, -10.0), 600.0).is_some());
    }

    #[test]
    fn test_y_is_inverted() {
        let camera = Camera::default();
        let up = camera.project(&Point3D::new(0.0, 50.0, 500.0), 600.0).unwrap();
        assert!((up.y - 250.0).abs() < EPS);
        let right = camera.project(&Point3D::new(50.0, 0.0, 500.0), 600.0).unwrap();
        assert!((right.x - 350.0).abs() < EPS);
    }

    #[test]
    fn test_doubling_zoom_doubles_offset() {
        let mut camera = Camera::new(Point3D::new(10.0, 20.0, -300.0), 1.0);
        let point = Point3D::new(-70.0, 140.0, 250.0);
        let before = camera.project(&point, 600.0).unwrap();
        camera.zoom_by(2.0);
        let after = camera.project(&point, 600.0).unwrap();

        assert!(((after.x - 300.0) - 2.0 * (before.x - 300.0)).abs() < EPS);
        assert!(((after.y - 300.0) - 2.0 * (before.y - 300.0)).abs() < EPS);
    }

    #[test]
    fn test_position_acts_as_parallax_offset() {
        let mut camera = Camera::default();
        camera.translate(100.0, 0.0, 0.0);
        let p = camera.project(&Point3D::new(100.0, 0.0, 500.0), 600.0).unwrap();
        assert!((p.x - 300.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_left_multiplies() {
        let mut camera = Camera::default();
        let a = Matrix4x4::rotation_x(0.3);
        let b = Matrix4x4::rotation_z(0.7);
        camera.rotate(&a);
        camera.rotate(&b);
        assert!(camera.transform.max_difference(&b.multiply(&a)) < EPS);
        assert!(camera.transform.max_difference(&a.multiply(&b)) > 1e-3);
    }
}
