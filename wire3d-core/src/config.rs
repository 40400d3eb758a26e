/// Viewer configuration.
///
/// Every field is optional in JSON and falls back to the reference scene.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Point3D;

/// Most grid lines allowed along one floor axis.
pub const MAX_GRID_LINES: usize = 10_000;
/// Most building rows allowed in one scene.
pub const MAX_BUILDING_ROWS: u32 = 1_000;

/// Step sizes, focal length and scene dimensions for a viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// World units moved per translation key press.
    pub translation_step: f64,
    /// Radians rotated per rotation key press.
    pub rotation_step: f64,
    /// Fractional zoom change per zoom key press.
    pub zoom_step: f64,
    pub focal_length: f64,

    pub house_size: f64,
    pub house_height: f64,
    /// Distance along z between building rows.
    pub building_spacing: f64,
    /// Distance along x from the center line to each building.
    pub building_side_offset: f64,
    pub building_z_offset: f64,
    pub building_rows: u32,
    pub building_color: String,

    /// Width of the ground grid along x, centered on x = 0.
    pub floor_extent: f64,
    /// Length of the ground grid along z, running back from `floor_z_start`.
    pub floor_depth: f64,
    pub floor_spacing: f64,
    pub floor_z_start: f64,
    pub floor_color: String,

    pub camera_position: [f64; 3],
    pub zoom: f64,
    /// Side of the square logical drawing surface.
    pub surface_size: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            translation_step: 20.0,
            rotation_step: 0.05,
            zoom_step: 0.1,
            focal_length: 500.0,
            house_size: 100.0,
            house_height: 150.0,
            building_spacing: 150.0,
            building_side_offset: 250.0,
            building_z_offset: -350.0,
            building_rows: 3,
            building_color: "black".to_string(),
            floor_extent: 800.0,
            floor_depth: 800.0,
            floor_spacing: 50.0,
            floor_z_start: 100.0,
            floor_color: "#b5d5aaff".to_string(),
            camera_position: [0.0, 300.0, -1200.0],
            zoom: 1.0,
            surface_size: 600.0,
        }
    }
}

impl ViewerConfig {
    /// Parses and validates config from JSON.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("translation_step", self.translation_step),
            ("rotation_step", self.rotation_step),
            ("focal_length", self.focal_length),
            ("house_size", self.house_size),
            ("house_height", self.house_height),
            ("floor_extent", self.floor_extent),
            ("floor_depth", self.floor_depth),
            ("floor_spacing", self.floor_spacing),
            ("zoom", self.zoom),
            ("surface_size", self.surface_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if !(self.zoom_step > 0.0 && self.zoom_step < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "zoom_step must be between 0 and 1, got {}",
                self.zoom_step
            )));
        }

        if self.building_rows == 0 || self.building_rows > MAX_BUILDING_ROWS {
            return Err(Error::InvalidConfig(format!(
                "building_rows must be between 1 and {}, got {}",
                MAX_BUILDING_ROWS, self.building_rows
            )));
        }

        for (name, length) in [
            ("floor_extent", self.floor_extent),
            ("floor_depth", self.floor_depth),
        ] {
            let lines = length / self.floor_spacing;
            if lines >= MAX_GRID_LINES as f64 {
                return Err(Error::InvalidConfig(format!(
                    "{} / floor_spacing gives {} grid lines, at most {} allowed",
                    name, lines, MAX_GRID_LINES
                )));
            }
        }

        Ok(())
    }

    pub fn camera_start(&self) -> Point3D {
        let [x, y, z] = self.camera_position;
        Point3D::new(x, y, z)
    }
}
