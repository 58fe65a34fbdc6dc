//! Bridge between the aligner and whatever owns the objects.
//!
//! The aligner itself never touches scene state. A host exposes vertex
//! lookup and transform get/set through [`SceneHost`]; the functions here
//! resolve marked vertices into an [`AlignmentRequest`], run the aligner and
//! commit the result.
//!
//! Writes go through `&mut H`, so two alignments can never race on the same
//! host. Hosts shared across threads must keep one writer per object.

use crate::marks::VertexMarks;
use crate::request::check_pair_counts;
use crate::{AlignError, AlignResult, Aligner, AlignmentRequest, AlignmentResult, WorldTransform};
use nalgebra::Point3;
use std::borrow::Borrow;
use tracing::{debug, info};

/// Scene capabilities consumed by the alignment workflow.
pub trait SceneHost {
    /// How objects are addressed (a name, an id, an entity).
    type Handle: ?Sized;

    /// Local-space position of a vertex.
    ///
    /// # Errors
    ///
    /// [`AlignError::UnknownObject`] or [`AlignError::VertexOutOfBounds`].
    fn local_vertex(&self, object: &Self::Handle, index: usize) -> AlignResult<Point3<f64>>;

    /// Current world placement of an object.
    ///
    /// # Errors
    ///
    /// [`AlignError::UnknownObject`] if the object does not exist.
    fn world_transform(&self, object: &Self::Handle) -> AlignResult<WorldTransform>;

    /// Replaces the world placement of an object.
    ///
    /// # Errors
    ///
    /// [`AlignError::UnknownObject`] if the object does not exist.
    fn set_world_transform(
        &mut self,
        object: &Self::Handle,
        transform: WorldTransform,
    ) -> AlignResult<()>;

    /// World-space position of a vertex.
    ///
    /// # Errors
    ///
    /// Same as [`SceneHost::local_vertex`].
    fn world_vertex(&self, object: &Self::Handle, index: usize) -> AlignResult<Point3<f64>> {
        let local = self.local_vertex(object, index)?;
        Ok(self.world_transform(object)?.transform_point(&local))
    }
}

/// Builds an alignment request from vertex indices on two objects.
///
/// Source vertices are fetched in local space along with the source
/// placement; target vertices are resolved to world space.
///
/// # Errors
///
/// Point-count errors (see [`AlignmentRequest::mode`]) are reported before
/// the host is queried; lookup errors come from the host.
pub fn resolve_request<H: SceneHost + ?Sized>(
    host: &H,
    source: &H::Handle,
    source_indices: &[usize],
    target: &H::Handle,
    target_indices: &[usize],
) -> AlignResult<AlignmentRequest> {
    check_pair_counts(source_indices.len(), target_indices.len())?;

    let source_points_local = source_indices
        .iter()
        .map(|&i| host.local_vertex(source, i))
        .collect::<AlignResult<Vec<_>>>()?;
    let source_transform = host.world_transform(source)?;
    let target_points_world = target_indices
        .iter()
        .map(|&i| host.world_vertex(target, i))
        .collect::<AlignResult<Vec<_>>>()?;

    debug!(pairs = source_indices.len(), "resolved alignment request");

    Ok(AlignmentRequest::new(
        source_points_local,
        source_transform,
        target_points_world,
    ))
}

/// Aligns `source` onto `target` and commits the new placement.
///
/// The host is only written to after the aligner succeeds.
///
/// # Errors
///
/// Any error from [`resolve_request`], [`Aligner::align`] or the host's
/// [`SceneHost::set_world_transform`].
pub fn align_objects<H: SceneHost + ?Sized>(
    host: &mut H,
    aligner: &Aligner,
    source: &H::Handle,
    source_indices: &[usize],
    target: &H::Handle,
    target_indices: &[usize],
) -> AlignResult<AlignmentResult> {
    let request = resolve_request(host, source, source_indices, target, target_indices)?;
    let result = aligner.align(&request)?;
    host.set_world_transform(source, result.transform)?;

    info!(
        mode = %result.mode,
        applied = %result.applied,
        "aligned source object"
    );
    Ok(result)
}

/// Aligns using the vertices recorded in `marks`.
///
/// # Errors
///
/// [`AlignError::MissingSource`] / [`AlignError::MissingTarget`] if a side
/// has no marks, otherwise as [`align_objects`].
///
/// # Example
///
/// ```
/// use mesh_align::{align_marked, Aligner, Scene, SceneObject, Side, VertexMarks};
/// use nalgebra::{Point3, Vector3};
///
/// let mut scene = Scene::new();
/// scene.insert("peg", SceneObject::new(vec![Point3::origin()]));
/// scene.insert("hole", SceneObject::new(vec![Point3::new(2.0, 0.0, 1.0)]));
///
/// let mut marks = VertexMarks::new();
/// marks.mark_first(Side::Source, "peg".to_string(), 0);
/// marks.mark_first(Side::Target, "hole".to_string(), 0);
///
/// align_marked(&mut scene, &Aligner::default(), &marks).unwrap();
/// let peg = scene.get("peg").unwrap();
/// assert_eq!(peg.transform.translation(), Vector3::new(2.0, 0.0, 1.0));
/// ```
pub fn align_marked<H, K>(
    host: &mut H,
    aligner: &Aligner,
    marks: &VertexMarks<K>,
) -> AlignResult<AlignmentResult>
where
    H: SceneHost + ?Sized,
    K: Borrow<H::Handle>,
{
    let source = marks.source().ok_or(AlignError::MissingSource)?;
    let target = marks.target().ok_or(AlignError::MissingTarget)?;

    align_objects(
        host,
        aligner,
        source.object.borrow(),
        &source.indices,
        target.object.borrow(),
        &target.indices,
    )
}
