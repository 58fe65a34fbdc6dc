//! Error types for vertex-based alignment.

use thiserror::Error;

/// Errors that can occur while building or running an alignment.
///
/// Every variant is terminal for the call: nothing is written back to the
/// host when one of these is returned. Degenerate geometry (zero-length
/// directions, collinear roll points) is not an error; it is absorbed by
/// falling back to a lower alignment mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// No source points were designated.
    #[error("no source points marked")]
    MissingSource,

    /// No target points were designated.
    #[error("no target points marked")]
    MissingTarget,

    /// Source and target point sets differ in length.
    #[error("source has {source_count} points but target has {target_count}")]
    PointCountMismatch {
        /// Number of source points.
        source_count: usize,
        /// Number of target points.
        target_count: usize,
    },

    /// More point pairs than any alignment mode can use.
    #[error("at most {max} point pairs supported, got {provided}")]
    TooManyPoints {
        /// Maximum number of pairs.
        max: usize,
        /// Number of pairs provided.
        provided: usize,
    },

    /// The host does not know the named object.
    #[error("unknown object: {0}")]
    UnknownObject(String),

    /// A vertex index does not exist on the object.
    #[error("vertex index {index} out of bounds for object with {vertex_count} vertices")]
    VertexOutOfBounds {
        /// The invalid vertex index.
        index: usize,
        /// Number of vertices on the object.
        vertex_count: usize,
    },

    /// The same vertex was marked twice on one side.
    #[error("vertex {index} is already marked")]
    DuplicateVertex {
        /// The repeated vertex index.
        index: usize,
    },

    /// A follow-up vertex was marked on a different object than the first.
    #[error("vertex 1 is marked on {expected}, not {found}")]
    MarkObjectMismatch {
        /// Object holding the first mark.
        expected: String,
        /// Object the new mark was made on.
        found: String,
    },

    /// A point or transform contained NaN or infinity.
    #[error("input contains non-finite coordinates")]
    NonFiniteInput,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for alignment operations.
pub type AlignResult<T> = Result<T, AlignError>;
