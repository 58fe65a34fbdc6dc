//! Marked-vertex bookkeeping.
//!
//! Users pick vertex 1 (the pivot), then optionally vertex 2 (direction)
//! and vertex 3 (roll) on the source object, and the same on the target
//! object. [`VertexMarks`] records those picks and enforces the rules:
//!
//! - every mark on one side lives on the same object as vertex 1
//! - a vertex can be marked only once per side
//! - at most three vertices per side
//!
//! Marks are plain values owned by the caller; nothing here is global.

use crate::request::{AlignmentMode, MAX_POINT_PAIRS};
use crate::{AlignError, AlignResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which object a mark belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// The object that will move.
    Source,
    /// The object that stays put.
    Target,
}

/// The vertices marked on one object, in marking order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarkedVertices<K> {
    /// The object the vertices belong to.
    pub object: K,
    /// Vertex indices; the first is the pivot.
    pub indices: Vec<usize>,
}

/// Source and target marks for one alignment.
///
/// # Example
///
/// ```
/// use mesh_align::{AlignmentMode, Side, VertexMarks};
///
/// let mut marks = VertexMarks::new();
/// marks.mark_first(Side::Source, "bracket", 4);
/// marks.mark_next(Side::Source, "bracket", 9).unwrap();
/// marks.mark_first(Side::Target, "frame", 0);
/// marks.mark_next(Side::Target, "frame", 1).unwrap();
///
/// assert_eq!(marks.mode(), Some(AlignmentMode::PartialRotation));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexMarks<K = String> {
    source: Option<MarkedVertices<K>>,
    target: Option<MarkedVertices<K>>,
}

impl<K> Default for VertexMarks<K> {
    fn default() -> Self {
        Self {
            source: None,
            target: None,
        }
    }
}

impl<K> VertexMarks<K> {
    /// Creates an empty set of marks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks vertex 1 on `object`, discarding any earlier marks on that side.
    pub fn mark_first(&mut self, side: Side, object: K, index: usize) {
        *self.slot_mut(side) = Some(MarkedVertices {
            object,
            indices: vec![index],
        });
    }

    /// Replaces one side with `indices` on `object`, checking them as if they
    /// were marked one by one.
    ///
    /// # Errors
    ///
    /// [`AlignError::DuplicateVertex`] or [`AlignError::TooManyPoints`]. An
    /// empty `indices` clears the side.
    pub fn set(&mut self, side: Side, object: K, indices: &[usize]) -> AlignResult<()> {
        if indices.len() > MAX_POINT_PAIRS {
            return Err(AlignError::TooManyPoints {
                max: MAX_POINT_PAIRS,
                provided: indices.len(),
            });
        }
        for (i, index) in indices.iter().enumerate() {
            if indices[..i].contains(index) {
                return Err(AlignError::DuplicateVertex { index: *index });
            }
        }

        *self.slot_mut(side) = if indices.is_empty() {
            None
        } else {
            Some(MarkedVertices {
                object,
                indices: indices.to_vec(),
            })
        };
        Ok(())
    }

    /// Marks on the source object, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&MarkedVertices<K>> {
        self.source.as_ref()
    }

    /// Marks on the target object, if any.
    #[must_use]
    pub const fn target(&self) -> Option<&MarkedVertices<K>> {
        self.target.as_ref()
    }

    /// Marks on one side, if any.
    #[must_use]
    pub const fn side(&self, side: Side) -> Option<&MarkedVertices<K>> {
        match side {
            Side::Source => self.source.as_ref(),
            Side::Target => self.target.as_ref(),
        }
    }

    /// The mode an alignment would run in, or `None` if a side is missing
    /// or the sides disagree in count.
    #[must_use]
    pub fn mode(&self) -> Option<AlignmentMode> {
        let source = self.source.as_ref()?.indices.len();
        let target = self.target.as_ref()?.indices.len();
        if source == target {
            AlignmentMode::from_pair_count(source)
        } else {
            None
        }
    }

    /// Forgets the marks on one side.
    pub fn clear_side(&mut self, side: Side) {
        *self.slot_mut(side) = None;
    }

    /// Forgets all marks.
    pub fn clear(&mut self) {
        self.source = None;
        self.target = None;
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<MarkedVertices<K>> {
        match side {
            Side::Source => &mut self.source,
            Side::Target => &mut self.target,
        }
    }
}

impl<K: PartialEq + fmt::Display> VertexMarks<K> {
    /// Marks the next vertex (2 or 3) on `object`.
    ///
    /// Returns the 1-based slot that was filled.
    ///
    /// # Errors
    ///
    /// - [`AlignError::MissingSource`] / [`AlignError::MissingTarget`] if
    ///   vertex 1 has not been marked on that side
    /// - [`AlignError::MarkObjectMismatch`] if vertex 1 is on another object
    /// - [`AlignError::DuplicateVertex`] if `index` is already marked
    /// - [`AlignError::TooManyPoints`] if three vertices are already marked
    pub fn mark_next(&mut self, side: Side, object: K, index: usize) -> AlignResult<usize> {
        let marked = self.slot_mut(side).as_mut().ok_or(match side {
            Side::Source => AlignError::MissingSource,
            Side::Target => AlignError::MissingTarget,
        })?;

        if marked.object != object {
            return Err(AlignError::MarkObjectMismatch {
                expected: marked.object.to_string(),
                found: object.to_string(),
            });
        }
        if marked.indices.contains(&index) {
            return Err(AlignError::DuplicateVertex { index });
        }
        if marked.indices.len() >= MAX_POINT_PAIRS {
            return Err(AlignError::TooManyPoints {
                max: MAX_POINT_PAIRS,
                provided: marked.indices.len() + 1,
            });
        }

        marked.indices.push(index);
        Ok(marked.indices.len())
    }
}
