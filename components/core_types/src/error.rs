//! Error types for graph mutation and collection.
//!
//! Node ids are rendered with their `Debug` form so the error types stay
//! independent of the id type.

use thiserror::Error;

/// Errors reported by the graph store.
///
/// Every variant signals a logic error in the caller, not a transient
/// condition worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node with this id already exists
    #[error("node {0} already exists")]
    DuplicateNode(String),
    /// No node with this id exists
    #[error("node {0} does not exist")]
    UnknownNode(String),
}

impl GraphError {
    /// Builds a `DuplicateNode` error from any debuggable id.
    pub fn duplicate(id: &impl std::fmt::Debug) -> Self {
        GraphError::DuplicateNode(format!("{:?}", id))
    }

    /// Builds an `UnknownNode` error from any debuggable id.
    pub fn unknown(id: &impl std::fmt::Debug) -> Self {
        GraphError::UnknownNode(format!("{:?}", id))
    }
}

/// Errors reported by the collector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GcError {
    /// The node has no color entry; the caller is out of sync with the graph
    #[error("no color recorded for node {0}")]
    UnknownNode(String),
    /// A gray node reached the sweep stage. Tracing did not reach its fixed
    /// point or a mutation bypassed the write barrier.
    #[error("node {0} is gray during sweep")]
    GrayDuringSweep(String),
    /// Rejected collector configuration
    #[error("invalid collector configuration: {0}")]
    InvalidConfig(String),
    /// A graph operation issued by the collector failed
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl GcError {
    /// Builds an `UnknownNode` error from any debuggable id.
    pub fn unknown(id: &impl std::fmt::Debug) -> Self {
        GcError::UnknownNode(format!("{:?}", id))
    }

    /// Returns true if this error is an invariant breach rather than a
    /// caller mistake.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GcError::GrayDuringSweep(_))
    }
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Result type for collector operations
pub type GcResult<T> = Result<T, GcError>;
