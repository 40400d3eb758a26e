/// Per-frame driver tying the camera, the scene and input together.
///
/// The host owns scheduling: it calls `Viewer::render_frame` once per tick
/// and forwards key presses to `Viewer::handle_key` between ticks.
use crate::config::ViewerConfig;
use crate::controller::command_for_key;
use crate::projection::Camera;
use crate::scene::Scene;
use crate::surface::DrawSurface;

/// Key that restores the starting camera.
pub const RESET_KEY: &str = "Home";

/// Outcome of one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
}

/// Camera, static scene and the settings they were built from.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub camera: Camera,
    scene: Scene,
    config: ViewerConfig,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        let scene = Scene::build(&config);
        let camera = initial_camera(&config);
        Self {
            camera,
            scene,
            config,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Clear the surface and redraw every line: buildings first, then the
    /// floor. There is no depth sorting, so floor lines overdraw buildings.
    pub fn render_frame<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> FrameStats {
        surface.clear();

        let size = self.config.surface_size;
        let mut stats = FrameStats::default();
        for line in self.scene.buildings.iter().chain(&self.scene.floor) {
            if line.render(surface, &self.camera, size) {
                stats.drawn += 1;
            } else {
                stats.culled += 1;
            }
        }

        tracing::trace!(drawn = stats.drawn, culled = stats.culled, "frame");
        stats
    }

    /// Apply the camera mutation bound to `key`. Returns false for keys with
    /// no binding.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == RESET_KEY {
            self.reset_camera();
            return true;
        }

        match command_for_key(key, &self.config) {
            Some(command) => {
                self.camera.apply(command);
                tracing::debug!(
                    key,
                    ?command,
                    position = ?self.camera.position,
                    zoom = self.camera.zoom,
                    "camera updated"
                );
                true
            }
            None => false,
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = initial_camera(&self.config);
        tracing::debug!("camera reset");
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

fn initial_camera(config: &ViewerConfig) -> Camera {
    Camera::new(config.camera_start(), config.zoom).with_focal_length(config.focal_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3D;
    use crate::surface::{RecordingSurface, SurfaceCall};
    use crate::transform::Matrix4x4;

    #[test]
    fn test_frame_clears_then_draws_buildings_before_floor() {
        let viewer = Viewer::default();
        let mut surface = RecordingSurface::default();
        let stats = viewer.render_frame(&mut surface);

        assert_eq!(surface.calls[0], SurfaceCall::Clear);
        assert_eq!(
            surface.calls.iter().filter(|c| **c == SurfaceCall::Clear).count(),
            1
        );

        let colors = surface.line_colors();
        assert_eq!(colors.len(), stats.drawn);
        let first_floor = colors.iter().position(|c| *c != "black").unwrap();
        assert!(colors[first_floor..].iter().all(|c| *c == "#b5d5aaff"));
    }

    #[test]
    fn test_reference_view_draws_everything() {
        // Whole scene lies in front of the starting camera at z = -1200
        let viewer = Viewer::default();
        let mut surface = RecordingSurface::default();
        let stats = viewer.render_frame(&mut surface);
        assert_eq!(stats.drawn, viewer.scene().line_count());
        assert_eq!(stats.culled, 0);
    }

    #[test]
    fn test_camera_inside_scene_culls() {
        let mut viewer = Viewer::default();
        viewer.camera.position = Point3D::new(0.0, 300.0, -400.0);
        let mut surface = RecordingSurface::default();
        let stats = viewer.render_frame(&mut surface);
        assert!(stats.culled > 0);
        assert!(stats.drawn > 0);
        assert_eq!(stats.drawn + stats.culled, viewer.scene().line_count());
    }

    #[test]
    fn test_each_frame_is_a_full_redraw() {
        let viewer = Viewer::default();
        let mut surface = RecordingSurface::default();
        let first = viewer.render_frame(&mut surface);
        let second = viewer.render_frame(&mut surface);
        assert_eq!(first, second);
        assert_eq!(surface.calls.len(), 2 * (first.drawn + 1));
    }

    #[test]
    fn test_handle_key_mutates_camera() {
        let mut viewer = Viewer::default();
        assert!(viewer.handle_key("ArrowLeft"));
        assert_eq!(viewer.camera.position, Point3D::new(-20.0, 300.0, -1200.0));

        assert!(viewer.handle_key("e"));
        assert!(viewer
            .camera
            .transform
            .max_difference(&Matrix4x4::rotation_z(0.05))
            < 1e-12);

        assert!(!viewer.handle_key("Tab"));
    }

    #[test]
    fn test_reset_restores_start() {
        let mut viewer = Viewer::default();
        for key in ["ArrowUp", "s", "z", "PageUp"] {
            viewer.handle_key(key);
        }
        assert!(viewer.handle_key(RESET_KEY));
        assert_eq!(viewer.camera, initial_camera(viewer.config()));
    }

    #[test]
    fn test_rotation_changes_output() {
        let mut viewer = Viewer::default();
        let mut before = RecordingSurface::default();
        viewer.render_frame(&mut before);

        viewer.handle_key("a");
        let mut after = RecordingSurface::default();
        viewer.render_frame(&mut after);
        assert_ne!(before.calls, after.calls);
    }
}
