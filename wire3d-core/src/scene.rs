/// Static scene construction: box "buildings" and a ground grid
use crate::config::ViewerConfig;
use crate::geometry::{Line3D, Point3D};

/// Edges contributed by one box outline.
pub const EDGES_PER_BOX: usize = 12;

/// The two geometry lists, built once and never resized.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub buildings: Vec<Line3D>,
    pub floor: Vec<Line3D>,
}

impl Scene {
    /// Two columns of buildings either side of x = 0 over a ground grid.
    pub fn build(config: &ViewerConfig) -> Self {
        let rows = config.building_rows as usize;
        let mut buildings = Vec::with_capacity(rows * 2 * EDGES_PER_BOX);

        let first_row = -(rows.saturating_sub(1) as f64) / 2.0;
        for row in 0..rows {
            let z = (first_row + row as f64) * config.building_spacing + config.building_z_offset;
            for x in [-config.building_side_offset, config.building_side_offset] {
                buildings.extend(box_outline(
                    Point3D::new(x, 0.0, z),
                    config.house_size,
                    config.house_height,
                    &config.building_color,
                ));
            }
        }

        let floor = floor_grid(config);

        tracing::debug!(
            buildings = buildings.len(),
            floor = floor.len(),
            "scene built"
        );
        Self { buildings, floor }
    }

    pub fn line_count(&self) -> usize {
        self.buildings.len() + self.floor.len()
    }
}

/// The 12 edges of an axis-aligned box with a square `size` footprint
/// centered on `base.x`/`base.z`, standing on `base.y`.
///
/// Edges come out top ring first, then the verticals, then the bottom ring.
pub fn box_outline(base: Point3D, size: f64, height: f64, color: &str) -> Vec<Line3D> {
    let half = size / 2.0;
    let (x0, x1) = (base.x - half, base.x + half);
    let (z0, z1) = (base.z - half, base.z + half);
    let (y0, y1) = (base.y, base.y + height);

    let bottom = [
        Point3D::new(x0, y0, z0),
        Point3D::new(x1, y0, z0),
        Point3D::new(x1, y0, z1),
        Point3D::new(x0, y0, z1),
    ];
    let top = bottom.map(|p| Point3D::new(p.x, y1, p.z));

    let ring = |corners: &[Point3D; 4]| {
        (0..4)
            .map(|i| Line3D::new(corners[i], corners[(i + 1) % 4], color))
            .collect::<Vec<_>>()
    };

    let mut edges = Vec::with_capacity(EDGES_PER_BOX);
    edges.extend(ring(&top));
    edges.extend((0..4).map(|i| Line3D::new(bottom[i], top[i], color)));
    edges.extend(ring(&bottom));
    edges
}

/// Ground grid on y = 0: lines running along z at each x step, then lines
/// running along x at each z step.
pub fn floor_grid(config: &ViewerConfig) -> Vec<Line3D> {
    let half = config.floor_extent / 2.0;
    let z_near = config.floor_z_start;
    let z_far = config.floor_z_start - config.floor_depth;
    let color = config.floor_color.as_str();

    let across = grid_steps(config.floor_extent, config.floor_spacing);
    let deep = grid_steps(config.floor_depth, config.floor_spacing);
    let mut lines = Vec::with_capacity(across + deep);

    for k in 0..across {
        let x = -half + k as f64 * config.floor_spacing;
        lines.push(Line3D::new(
            Point3D::new(x, 0.0, z_near),
            Point3D::new(x, 0.0, z_far),
            color,
        ));
    }

    for k in 0..deep {
        let z = z_near - k as f64 * config.floor_spacing;
        lines.push(Line3D::new(
            Point3D::new(-half, 0.0, z),
            Point3D::new(half, 0.0, z),
            color,
        ));
    }

    lines
}

/// Number of grid lines covering `length` inclusive of both ends.
fn grid_steps(length: f64, spacing: f64) -> usize {
    // Tolerate spacings that do not divide exactly in binary
    ((length / spacing + 1e-9).floor() as usize).saturating_add(1)
}
