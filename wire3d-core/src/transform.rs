/// 4x4 homogeneous transforms
use nalgebra::{Matrix4, Point3, Vector4};

use crate::error::{Error, Result};
use crate::geometry::Point3D;

/// A 4x4 homogeneous transform acting on column vectors `[x, y, z, 1]`.
///
/// Only rotations about the origin are ever composed into it, so the
/// bottom row stays `[0, 0, 0, 1]` and `w` is dropped after transforming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4x4(Matrix4<f64>);

impl Matrix4x4 {
    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    /// Build a matrix from row-major data.
    ///
    /// Anything other than exactly four rows of four values falls back to
    /// the identity matrix. Use [`Matrix4x4::try_from_rows`] to reject
    /// malformed input instead.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        match Self::try_from_rows(rows) {
            Ok(matrix) => matrix,
            Err(err) => {
                tracing::warn!(%err, "malformed matrix rows, using identity");
                Self::identity()
            }
        }
    }

    /// Build a matrix from row-major data, failing on any shape but 4x4.
    pub fn try_from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.len() != 4 || rows.iter().any(|row| row.len() != 4) {
            return Err(Error::MatrixShape {
                rows: rows.len(),
                cols: rows.first().map_or(0, Vec::len),
            });
        }
        Ok(Self(Matrix4::from_fn(|i, j| rows[i][j])))
    }

    /// Rotation about the x axis: y' = y·cos − z·sin, z' = y·sin + z·cos.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let m = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0,   c,  -s, 0.0,
            0.0,   s,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self(m)
    }

    /// Rotation about the y axis: x' = x·cos + z·sin, z' = −x·sin + z·cos.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let m = Matrix4::new(
              c, 0.0,   s, 0.0,
            0.0, 1.0, 0.0, 0.0,
             -s, 0.0,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self(m)
    }

    /// Rotation about the z axis: x' = x·cos − y·sin, y' = x·sin + y·cos.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let m = Matrix4::new(
              c,  -s, 0.0, 0.0,
              s,   c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self(m)
    }

    /// Matrix product `self · rhs`: `rhs` applies first, then `self`.
    pub fn multiply(&self, rhs: &Matrix4x4) -> Matrix4x4 {
        Self(self.0 * rhs.0)
    }

    /// Apply to `[x, y, z, 1]` and keep the first three components.
    pub fn transform(&self, point: &Point3D) -> Point3D {
        let p: Vector4<f64> = self.0 * point.to_homogeneous();
        Point3::new(p.x, p.y, p.z)
    }

    pub fn transpose(&self) -> Matrix4x4 {
        Self(self.0.transpose())
    }

    /// Element at `row`, `col`. Panics when either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0[(row, col)]
    }

    pub fn as_matrix(&self) -> &Matrix4<f64> {
        &self.0
    }

    /// Largest absolute element-wise difference to `other`.
    pub fn max_difference(&self, other: &Matrix4x4) -> f64 {
        (self.0 - other.0).amax()
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn angles() -> impl Iterator<Item = f64> {
        (-8..=8).map(|i| i as f64 * 0.4)
    }

    fn assert_close(a: &Matrix4x4, b: &Matrix4x4) {
        assert!(
            a.max_difference(b) < EPS,
            "matrices differ:\n{:?}\n{:?}",
            a,
            b
        );
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Matrix4x4::default(), Matrix4x4::identity());
        assert_eq!(Matrix4x4::identity().get(2, 2), 1.0);
        assert_eq!(Matrix4x4::identity().get(2, 3), 0.0);
    }

    #[test]
    fn test_rotations_are_orthonormal() {
        for theta in angles() {
            for r in [
                Matrix4x4::rotation_x(theta),
                Matrix4x4::rotation_y(theta),
                Matrix4x4::rotation_z(theta),
            ] {
                assert_close(&r.multiply(&r.transpose()), &Matrix4x4::identity());
                assert!((r.as_matrix().determinant() - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = Matrix4x4::rotation_x(0.3)
            .multiply(&Matrix4x4::rotation_y(-1.1))
            .multiply(&Matrix4x4::rotation_z(2.0));
        let id = Matrix4x4::identity();
        assert_close(&id.multiply(&m), &m);
        assert_close(&m.multiply(&id), &m);
    }

    #[test]
    fn test_same_axis_rotations_add() {
        for (a, b) in [(0.1, 0.2), (-0.7, 1.3), (2.5, 2.5)] {
            let composed = Matrix4x4::rotation_x(b).multiply(&Matrix4x4::rotation_x(a));
            assert_close(&composed, &Matrix4x4::rotation_x(a + b));
        }
    }

    #[test]
    fn test_rotation_sign_conventions() {
        let quarter = std::f64::consts::FRAC_PI_2;
        let rx = Matrix4x4::rotation_x(quarter).transform(&Point3::new(0.0, 1.0, 0.0));
        assert!((rx - Point3::new(0.0, 0.0, 1.0)).norm() < EPS);

        let ry = Matrix4x4::rotation_y(quarter).transform(&Point3::new(1.0, 0.0, 0.0));
        assert!((ry - Point3::new(0.0, 0.0, -1.0)).norm() < EPS);

        let rz = Matrix4x4::rotation_z(quarter).transform(&Point3::new(1.0, 0.0, 0.0));
        assert!((rz - Point3::new(0.0, 1.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_multiply_order() {
        // rhs applies first: rotate +x about z onto +y, then about x onto +z
        let m = Matrix4x4::rotation_x(std::f64::consts::FRAC_PI_2)
            .multiply(&Matrix4x4::rotation_z(std::f64::consts::FRAC_PI_2));
        let p = m.transform(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(0.0, 0.0, 1.0)).norm() < EPS);
    }

    #[test]
    fn test_transform_uses_translation_column() {
        let m = Matrix4x4::from_rows(&[
            vec![1.0, 0.0, 0.0, 5.0],
            vec![0.0, 1.0, 0.0, 6.0],
            vec![0.0, 0.0, 1.0, 7.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(m.transform(&Point3::new(1.0, 2.0, 3.0)), Point3::new(6.0, 8.0, 10.0));
    }

    #[test]
    fn test_transpose_swaps_elements() {
        let rows: Vec<Vec<f64>> = (0..4)
            .map(|i| (0..4).map(|j| (i * 4 + j) as f64).collect())
            .collect();
        let m = Matrix4x4::from_rows(&rows);
        let t = m.transpose();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(t.get(i, j), m.get(j, i));
            }
        }
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_malformed_rows_fall_back_to_identity() {
        let three = vec![vec![2.0; 4]; 3];
        assert_eq!(Matrix4x4::from_rows(&three), Matrix4x4::identity());

        let ragged = vec![vec![2.0; 4], vec![2.0; 4], vec![2.0; 3], vec![2.0; 4]];
        assert_eq!(Matrix4x4::from_rows(&ragged), Matrix4x4::identity());
    }

    #[test]
    fn test_strict_construction_reports_shape() {
        let three = vec![vec![2.0; 5]; 3];
        match Matrix4x4::try_from_rows(&three) {
            Err(Error::MatrixShape { rows, cols }) => {
                assert_eq!(rows, 3);
                assert_eq!(cols, 5);
            }
            other => panic!("expected shape error, got {:?}", other),
        }
        assert!(Matrix4x4::try_from_rows(&[]).is_err());
        assert!(Matrix4x4::try_from_rows(&vec![vec![0.0; 4]; 4]).is_ok());
    }
}
