//! Rotation primitives used by the aligner.
//!
//! All angles follow the right-handed convention: a positive angle about an
//! axis turns counter-clockwise when looking down the axis toward the origin.

use nalgebra::{Unit, UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// The minimal-angle rotation that maps direction `from` onto direction `to`.
///
/// The axis is `from x to`, with any rounding component along `from`
/// removed, and the angle is `atan2(|from x to|, from . to)`. When the cross
/// product is shorter than `epsilon` the directions are treated as parallel
/// (identity) or anti-parallel (a half turn about [`any_perpendicular`] of
/// `from`).
///
/// Returns `None` if either input is shorter than `epsilon`.
///
/// # Example
///
/// ```
/// use mesh_align::shortest_arc;
/// use nalgebra::Vector3;
///
/// let q = shortest_arc(&Vector3::x(), &Vector3::y(), 1e-12).unwrap();
/// let mapped = q * Vector3::x();
/// assert!((mapped - Vector3::y()).norm() < 1e-12);
/// ```
#[must_use]
pub fn shortest_arc(
    from: &Vector3<f64>,
    to: &Vector3<f64>,
    epsilon: f64,
) -> Option<UnitQuaternion<f64>> {
    let from = from.try_normalize(epsilon)?;
    let to = to.try_normalize(epsilon)?;

    let cross = from.cross(&to);
    let cos_angle = from.dot(&to);

    // Near a half turn the cross product is mostly rounding noise, and any
    // tilt of the axis toward `from` throws the mapped direction off.
    let axis = cross - from * cross.dot(&from);

    match Unit::try_new(axis, epsilon) {
        Some(axis) => {
            let angle = cross.norm().atan2(cos_angle);
            Some(UnitQuaternion::from_axis_angle(&axis, angle))
        }
        // Parallel
        None if cos_angle > 0.0 => Some(UnitQuaternion::identity()),
        // Anti-parallel
        None => Some(UnitQuaternion::from_axis_angle(&any_perpendicular(&from), PI)),
    }
}

/// A unit vector perpendicular to `v`, chosen deterministically.
///
/// Crosses `v` with the coordinate axis it is least aligned with (smallest
/// absolute component, X winning ties, then Y), so the result is never
/// degenerate for a non-zero `v`. Zero input yields the X axis.
#[must_use]
pub fn any_perpendicular(v: &Vector3<f64>) -> Unit<Vector3<f64>> {
    let ax = v.x.abs();
    let ay = v.y.abs();
    let az = v.z.abs();

    let helper = if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    };

    Unit::try_new(v.cross(&helper), f64::EPSILON).unwrap_or_else(Vector3::x_axis)
}

/// Removes the component of `v` along `normal`.
///
/// `normal` must be unit length.
#[must_use]
pub fn project_onto_plane(v: &Vector3<f64>, normal: &Unit<Vector3<f64>>) -> Vector3<f64> {
    let n = normal.into_inner();
    v - n * v.dot(&n)
}

/// Signed angle from `from` to `to` about `axis`.
///
/// Both vectors are expected to lie in the plane perpendicular to `axis`
/// and be unit length. The magnitude is `acos(clamp(dot, -1, 1))`; the sign
/// is negative when `(from x to) . axis < 0`.
#[must_use]
pub fn signed_angle_about(
    from: &Vector3<f64>,
    to: &Vector3<f64>,
    axis: &Unit<Vector3<f64>>,
) -> f64 {
    let angle = from.dot(to).clamp(-1.0, 1.0).acos();
    if from.cross(to).dot(&axis.into_inner()) < 0.0 {
        -angle
    } else {
        angle
    }
}
