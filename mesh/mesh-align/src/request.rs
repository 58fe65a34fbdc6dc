//! Alignment inputs and outputs.

use crate::{AlignError, AlignResult, WorldTransform};
use nalgebra::{Point3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of point pairs any mode can consume.
pub const MAX_POINT_PAIRS: usize = 3;

/// How much of the placement an alignment constrains.
///
/// Ordered from least to most constrained, so a fallback can be expressed
/// as `applied < mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlignmentMode {
    /// One pair: translate only.
    PositionOnly,
    /// Two pairs: translate and point the first direction at the target.
    PartialRotation,
    /// Three pairs: also fix the roll about that direction.
    FullRotation,
}

impl AlignmentMode {
    /// The mode implied by a number of point pairs, if any.
    #[must_use]
    pub const fn from_pair_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::PositionOnly),
            2 => Some(Self::PartialRotation),
            3 => Some(Self::FullRotation),
            _ => None,
        }
    }

    /// Number of point pairs this mode uses.
    #[must_use]
    pub const fn pair_count(self) -> usize {
        match self {
            Self::PositionOnly => 1,
            Self::PartialRotation => 2,
            Self::FullRotation => 3,
        }
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PositionOnly => "position only",
            Self::PartialRotation => "position + direction",
            Self::FullRotation => "position + rotation",
        };
        f.write_str(label)
    }
}

/// Everything the aligner needs for one call.
///
/// Source points are in the source object's local space; target points are
/// already resolved to world space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignmentRequest {
    /// Marked source vertices, local coordinates, in marking order.
    pub source_points_local: Vec<Point3<f64>>,
    /// Current world placement of the source object.
    pub source_transform: WorldTransform,
    /// Marked target vertices, world coordinates, in marking order.
    pub target_points_world: Vec<Point3<f64>>,
}

impl AlignmentRequest {
    /// Creates a request from its parts.
    #[must_use]
    pub const fn new(
        source_points_local: Vec<Point3<f64>>,
        source_transform: WorldTransform,
        target_points_world: Vec<Point3<f64>>,
    ) -> Self {
        Self {
            source_points_local,
            source_transform,
            target_points_world,
        }
    }

    /// Checks point counts and finiteness and returns the implied mode.
    ///
    /// # Errors
    ///
    /// - [`AlignError::MissingSource`] / [`AlignError::MissingTarget`] if a side is empty
    /// - [`AlignError::PointCountMismatch`] if the sides differ in length
    /// - [`AlignError::TooManyPoints`] if more than three pairs are given
    /// - [`AlignError::NonFiniteInput`] on NaN or infinite input
    pub fn mode(&self) -> AlignResult<AlignmentMode> {
        let mode = check_pair_counts(
            self.source_points_local.len(),
            self.target_points_world.len(),
        )?;

        let finite = self
            .source_points_local
            .iter()
            .chain(&self.target_points_world)
            .all(|p| p.coords.iter().all(|c| c.is_finite()));
        if !finite || !self.source_transform.is_finite() {
            return Err(AlignError::NonFiniteInput);
        }

        Ok(mode)
    }
}

/// Validates a pair of point counts and returns the implied mode.
pub(crate) fn check_pair_counts(
    source_count: usize,
    target_count: usize,
) -> AlignResult<AlignmentMode> {
    if source_count == 0 {
        return Err(AlignError::MissingSource);
    }
    if target_count == 0 {
        return Err(AlignError::MissingTarget);
    }
    if source_count != target_count {
        return Err(AlignError::PointCountMismatch {
            source_count,
            target_count,
        });
    }
    AlignmentMode::from_pair_count(source_count).ok_or(AlignError::TooManyPoints {
        max: MAX_POINT_PAIRS,
        provided: source_count,
    })
}

/// Outcome of a successful alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignmentResult {
    /// New world placement for the source object.
    pub transform: WorldTransform,
    /// Mode selected by the number of point pairs.
    pub mode: AlignmentMode,
    /// Mode whose geometry actually took effect. Lower than `mode` when a
    /// degenerate direction or a collinear third point forced a fallback.
    pub applied: AlignmentMode,
    /// Sum of the translations added by the position corrections. Does not
    /// include the displacement caused by rotating about the pivot.
    pub offset: Vector3<f64>,
}

impl AlignmentResult {
    /// Returns `true` if a degenerate configuration forced a fallback.
    #[must_use]
    pub fn degraded(&self) -> bool {
        self.applied < self.mode
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Point3<f64>> {
        (0..n).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect()
    }

    #[test]
    fn mode_follows_pair_count() {
        for (n, expected) in [
            (1, AlignmentMode::PositionOnly),
            (2, AlignmentMode::PartialRotation),
            (3, AlignmentMode::FullRotation),
        ] {
            let request = AlignmentRequest::new(points(n), WorldTransform::identity(), points(n));
            assert_eq!(request.mode().unwrap(), expected);
            assert_eq!(expected.pair_count(), n);
        }
    }

    #[test]
    fn empty_sides_are_reported() {
        let no_source = AlignmentRequest::new(vec![], WorldTransform::identity(), points(1));
        assert_eq!(no_source.mode(), Err(AlignError::MissingSource));

        let no_target = AlignmentRequest::new(points(1), WorldTransform::identity(), vec![]);
        assert_eq!(no_target.mode(), Err(AlignError::MissingTarget));
    }

    #[test]
    fn mismatch_is_reported() {
        let request = AlignmentRequest::new(points(2), WorldTransform::identity(), points(3));
        assert_eq!(
            request.mode(),
            Err(AlignError::PointCountMismatch {
                source_count: 2,
                target_count: 3
            })
        );
    }

    #[test]
    fn too_many_pairs() {
        let request = AlignmentRequest::new(points(4), WorldTransform::identity(), points(4));
        assert_eq!(
            request.mode(),
            Err(AlignError::TooManyPoints {
                max: 3,
                provided: 4
            })
        );
    }

    #[test]
    fn nan_rejected() {
        let mut source = points(1);
        source[0].y = f64::NAN;
        let request = AlignmentRequest::new(source, WorldTransform::identity(), points(1));
        assert_eq!(request.mode(), Err(AlignError::NonFiniteInput));
    }

    #[test]
    fn modes_are_ordered() {
        assert!(AlignmentMode::PositionOnly < AlignmentMode::PartialRotation);
        assert!(AlignmentMode::PartialRotation < AlignmentMode::FullRotation);
        assert_eq!(AlignmentMode::FullRotation.to_string(), "position + rotation");
    }
}
