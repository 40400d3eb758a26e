/// Geometry primitives for wireframe rendering
use nalgebra::Point3;

use crate::projection::Camera;
use crate::surface::DrawSurface;

/// A point in world space. Transforms always produce fresh values.
pub type Point3D = Point3<f64>;

pub const DEFAULT_LINE_COLOR: &str = "black";

/// A drawable edge between two world-space points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line3D {
    pub start: Point3D,
    pub end: Point3D,
    pub color: String,
}

impl Line3D {
    pub fn new(start: Point3D, end: Point3D, color: impl Into<String>) -> Self {
        Self {
            start,
            end,
            color: color.into(),
        }
    }

    /// A line in the default color.
    pub fn plain(start: Point3D, end: Point3D) -> Self {
        Self::new(start, end, DEFAULT_LINE_COLOR)
    }

    /// Project both endpoints and draw the segment.
    ///
    /// If either endpoint is at or behind the camera the whole segment is
    /// skipped; there is no near-plane clipping. Returns whether a draw call
    /// was issued.
    pub fn render<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        camera: &Camera,
        surface_size: f64,
    ) -> bool {
        let start = camera.project(&self.start, surface_size);
        let end = camera.project(&self.end, surface_size);

        match (start, end) {
            (Some(s), Some(e)) => {
                surface.draw_line(s, e, &self.color);
                true
            }
            _ => false,
        }
    }
}
