//! Rigid alignment from one, two or three corresponding point pairs.
//!
//! The mode is picked from the number of pairs:
//!
//! 1. **Position only** - move the source so its first point lands on the
//!    target's first point.
//! 2. **Partial rotation** - first rotate the source about its first point
//!    so the direction `p1 -> p2` matches the target's, then translate.
//!    Roll about that direction is whatever the shortest-arc rotation gives.
//! 3. **Full rotation** - after step 2, roll about the shared direction so
//!    the third points fall in the same half-plane, then translate again.
//!
//! Degenerate input never fails: a zero-length direction drops to position
//! only, a third point collinear with the first two drops to partial
//! rotation. [`AlignmentResult::applied`] reports what actually happened.

use crate::rotation::{project_onto_plane, shortest_arc, signed_angle_about};
use crate::{
    AlignParams, AlignResult, AlignmentMode, AlignmentRequest, AlignmentResult, WorldTransform,
};
use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};
use tracing::{debug, warn};

/// Computes new source placements from point correspondences.
///
/// Stateless apart from its tolerances; one instance can serve any number
/// of requests, from any thread.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aligner {
    params: AlignParams,
}

impl Aligner {
    /// Creates an aligner with the given tolerances.
    #[must_use]
    pub const fn new(params: AlignParams) -> Self {
        Self { params }
    }

    /// The tolerances in use.
    #[must_use]
    pub const fn params(&self) -> &AlignParams {
        &self.params
    }

    /// Aligns the request's source points onto its target points.
    ///
    /// Returns the new world placement for the source object. Nothing is
    /// mutated; the caller commits the transform.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is malformed (see
    /// [`AlignmentRequest::mode`]) or the parameters are invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_align::{AlignParams, Aligner, AlignmentMode, AlignmentRequest, WorldTransform};
    /// use nalgebra::Point3;
    ///
    /// let request = AlignmentRequest::new(
    ///     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
    ///     WorldTransform::identity(),
    ///     vec![Point3::new(5.0, 5.0, 0.0), Point3::new(5.0, 6.0, 0.0)],
    /// );
    ///
    /// let result = Aligner::new(AlignParams::default()).align(&request).unwrap();
    /// assert_eq!(result.mode, AlignmentMode::PartialRotation);
    ///
    /// let tip = result.transform.transform_point(&Point3::new(1.0, 0.0, 0.0));
    /// assert!((tip - Point3::new(5.0, 6.0, 0.0)).norm() < 1e-9);
    /// ```
    pub fn align(&self, request: &AlignmentRequest) -> AlignResult<AlignmentResult> {
        self.params.validate()?;
        let mode = request.mode()?;

        let source = request.source_points_local.as_slice();
        let target = request.target_points_world.as_slice();
        let mut transform = request.source_transform;
        let mut applied = AlignmentMode::PositionOnly;

        if mode >= AlignmentMode::PartialRotation {
            if let Some(rotated) = self.align_direction(&transform, source, target) {
                transform = rotated;
                applied = AlignmentMode::PartialRotation;
            } else {
                warn!(%mode, "direction undefined (coincident points), aligning position only");
            }
        }

        // Also restores the pivot registration after the direction rotation.
        let mut offset = correct_position(&mut transform, &source[0], &target[0]);

        if mode == AlignmentMode::FullRotation && applied == AlignmentMode::PartialRotation {
            if let Some(rolled) = self.align_roll(&transform, source, target) {
                transform = rolled;
                offset += correct_position(&mut transform, &source[0], &target[0]);
                applied = AlignmentMode::FullRotation;
            } else {
                warn!("third point collinear with the first two, roll left unconstrained");
            }
        }

        debug!(
            %mode,
            %applied,
            offset_x = offset.x,
            offset_y = offset.y,
            offset_z = offset.z,
            "alignment computed"
        );

        Ok(AlignmentResult {
            transform,
            mode,
            applied,
            offset,
        })
    }

    /// Rotates about the first source point so `p1 -> p2` points along the
    /// target's `p1 -> p2`. `None` when either direction is degenerate.
    fn align_direction(
        &self,
        transform: &WorldTransform,
        source: &[Point3<f64>],
        target: &[Point3<f64>],
    ) -> Option<WorldTransform> {
        let s1 = transform.transform_point(&source[0]);
        let s2 = transform.transform_point(&source[1]);

        let source_dir = s2 - s1;
        let target_dir = target[1] - target[0];
        let rotation = shortest_arc(&source_dir, &target_dir, self.params.direction_epsilon)?;
        debug!(angle = rotation.angle(), "direction rotation");

        Some(transform.rotated_about(&s1, &rotation))
    }

    /// Rolls about the shared direction so the third points agree.
    /// `None` when either third point is collinear with its first two.
    fn align_roll(
        &self,
        transform: &WorldTransform,
        source: &[Point3<f64>],
        target: &[Point3<f64>],
    ) -> Option<WorldTransform> {
        let s1 = transform.transform_point(&source[0]);
        let s3 = transform.transform_point(&source[2]);

        let axis = Unit::try_new(target[1] - target[0], self.params.direction_epsilon)?;
        let epsilon = self.params.roll_epsilon;
        let from = project_onto_plane(&(s3 - s1), &axis).try_normalize(epsilon)?;
        let to = project_onto_plane(&(target[2] - target[0]), &axis).try_normalize(epsilon)?;

        let angle = signed_angle_about(&from, &to, &axis);
        debug!(angle, "roll rotation");

        let rotation = UnitQuaternion::from_axis_angle(&axis, angle);
        Some(transform.rotated_about(&s1, &rotation))
    }
}

/// Aligns with default tolerances.
///
/// # Errors
///
/// See [`Aligner::align`].
///
/// # Example
///
/// ```
/// use mesh_align::{align, AlignmentRequest, WorldTransform};
/// use nalgebra::{Point3, Vector3};
///
/// let request = AlignmentRequest::new(
///     vec![Point3::origin()],
///     WorldTransform::identity(),
///     vec![Point3::new(5.0, 0.0, 0.0)],
/// );
/// let result = align(&request).unwrap();
/// assert_eq!(result.transform.translation(), Vector3::new(5.0, 0.0, 0.0));
/// ```
pub fn align(request: &AlignmentRequest) -> AlignResult<AlignmentResult> {
    Aligner::default().align(request)
}

/// Translates `transform` so `source_local` maps onto `target_world`.
/// Returns the applied offset.
fn correct_position(
    transform: &mut WorldTransform,
    source_local: &Point3<f64>,
    target_world: &Point3<f64>,
) -> Vector3<f64> {
    let offset = target_world - transform.transform_point(source_local);
    transform.translate_by(&offset);
    offset
}
