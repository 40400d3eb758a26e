/// wire3d Core Library - Wireframe scene, camera and projection
///
/// This library holds everything that does not depend on a host: the
/// transform math, the camera, the static scene and the per-frame driver.
/// Hosts supply a drawing surface, key events and frame scheduling.

pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod surface;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use color::Rgba;
pub use config::ViewerConfig;
pub use controller::{command_for_key, Axis, CameraCommand};
pub use error::{Error, Result};
pub use geometry::{Line3D, Point3D};
pub use projection::Camera;
pub use scene::Scene;
pub use surface::{DrawSurface, ScreenPoint};
pub use transform::Matrix4x4;
pub use viewer::{FrameStats, Viewer};
