//! World placement of an object as a 4x4 affine matrix.

use nalgebra::{Matrix3, Matrix4, Point3, Translation3, UnitQuaternion, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An object's placement in world space, stored as a homogeneous 4x4 matrix.
///
/// The matrix may carry scale or shear inherited from the host scene. The
/// aligner never solves for those; it only left-multiplies rigid motions,
/// so whatever linear part the object already has is preserved.
///
/// # Example
///
/// ```
/// use mesh_align::WorldTransform;
/// use nalgebra::{Point3, Vector3};
///
/// let t = WorldTransform::from_translation(Vector3::new(1.0, 2.0, 3.0));
/// let p = t.transform_point(&Point3::origin());
/// assert!((p.x - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldTransform {
    matrix: Matrix4<f64>,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl WorldTransform {
    /// Wraps an existing homogeneous matrix.
    #[must_use]
    pub const fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    /// The identity placement.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// A pure translation.
    #[must_use]
    pub fn from_translation(v: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&v),
        }
    }

    /// A pure rotation about the world origin.
    #[must_use]
    pub fn from_rotation(rotation: &UnitQuaternion<f64>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Rotation followed by translation.
    #[must_use]
    pub fn from_parts(rotation: &UnitQuaternion<f64>, translation: Vector3<f64>) -> Self {
        let mut matrix = rotation.to_homogeneous();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Self { matrix }
    }

    /// The underlying 4x4 matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// The translation column.
    #[must_use]
    pub fn translation(&self) -> Vector3<f64> {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// The upper-left 3x3 linear part (rotation, plus any inherited scale).
    #[must_use]
    pub fn linear_part(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Adds `offset` to the translation column, leaving the linear part alone.
    pub fn translate_by(&mut self, offset: &Vector3<f64>) {
        let mut column = self.matrix.fixed_view_mut::<3, 1>(0, 3);
        column += offset;
    }

    /// Maps a local point to world space.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(point)
    }

    /// Maps a local direction to world space (translation ignored).
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.matrix.transform_vector(vector)
    }

    /// Applies `rotation` in world space about `pivot`.
    ///
    /// Computes `T(pivot) * R * T(-pivot) * self`, so the world point that
    /// sat at `pivot` before the call still sits there afterwards.
    #[must_use]
    pub fn rotated_about(&self, pivot: &Point3<f64>, rotation: &UnitQuaternion<f64>) -> Self {
        let to_origin = Translation3::from(-pivot.coords).to_homogeneous();
        let back = Translation3::from(pivot.coords).to_homogeneous();
        Self {
            matrix: back * rotation.to_homogeneous() * to_origin * self.matrix,
        }
    }

    /// Returns `true` if every matrix entry is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.matrix.iter().all(|v| v.is_finite())
    }

    /// Entry-wise comparison within `epsilon`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.matrix
            .iter()
            .zip(other.matrix.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}
