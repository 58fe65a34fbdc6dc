//! Vertex-based rigid alignment.
//!
//! Moves a *source* object so that one, two or three of its vertices land
//! on corresponding vertices of a *target* object:
//!
//! | Pairs | Mode | Constrains |
//! |-------|------|------------|
//! | 1 | [`AlignmentMode::PositionOnly`] | translation |
//! | 2 | [`AlignmentMode::PartialRotation`] | translation + direction |
//! | 3 | [`AlignmentMode::FullRotation`] | translation + direction + roll |
//!
//! Rotations are applied about the first source vertex (the pivot), and the
//! translation is re-corrected after every rotation so the pivot ends up
//! exactly on the first target vertex.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies. The scene is reached
//! through the [`SceneHost`] trait; [`Scene`] is a small in-memory host.
//!
//! # Coordinate System
//!
//! Right-handed. Positive angles turn counter-clockwise when looking down
//! the rotation axis toward the origin.
//!
//! # Quick Start
//!
//! ## Raw points
//!
//! ```
//! use mesh_align::{align, AlignmentMode, AlignmentRequest, WorldTransform};
//! use nalgebra::Point3;
//!
//! let request = AlignmentRequest::new(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     WorldTransform::identity(),
//!     vec![
//!         Point3::new(5.0, 5.0, 0.0),
//!         Point3::new(5.0, 6.0, 0.0),
//!         Point3::new(4.0, 5.0, 0.0),
//!     ],
//! );
//!
//! let result = align(&request).unwrap();
//! assert_eq!(result.mode, AlignmentMode::FullRotation);
//! ```
//!
//! ## Marked vertices on scene objects
//!
//! ```
//! use mesh_align::{align_marked, Aligner, Scene, SceneObject, Side, VertexMarks};
//! use nalgebra::Point3;
//!
//! let mut scene = Scene::new();
//! scene.insert(
//!     "lid",
//!     SceneObject::new(vec![Point3::origin(), Point3::new(0.0, 0.0, 1.0)]),
//! );
//! scene.insert(
//!     "box",
//!     SceneObject::new(vec![Point3::new(3.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)]),
//! );
//!
//! let mut marks = VertexMarks::new();
//! marks.mark_first(Side::Source, "lid".to_string(), 0);
//! marks.mark_next(Side::Source, "lid".to_string(), 1).unwrap();
//! marks.mark_first(Side::Target, "box".to_string(), 0);
//! marks.mark_next(Side::Target, "box".to_string(), 1).unwrap();
//!
//! let result = align_marked(&mut scene, &Aligner::default(), &marks).unwrap();
//! assert!(!result.degraded());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod aligner;
mod error;
mod host;
mod marks;
mod params;
mod request;
mod rotation;
mod scene;
mod transform;

pub use aligner::{Aligner, align};
pub use error::{AlignError, AlignResult};
pub use host::{SceneHost, align_marked, align_objects, resolve_request};
pub use marks::{MarkedVertices, Side, VertexMarks};
pub use params::AlignParams;
pub use request::{AlignmentMode, AlignmentRequest, AlignmentResult, MAX_POINT_PAIRS};
pub use rotation::{any_perpendicular, project_onto_plane, shortest_arc, signed_angle_about};
pub use scene::{Scene, SceneObject};
pub use transform::WorldTransform;
