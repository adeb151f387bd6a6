//! Node identity and edge sources.

use std::fmt::Debug;
use std::hash::Hash;

/// Identity of a graph node.
///
/// The collector never looks inside a node, it only compares and hashes
/// identities. Any cheap-to-clone, thread-safe key qualifies.
pub trait NodeId: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

impl<T> NodeId for T where T: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

/// The source end of a directed edge.
///
/// `Root` is the pseudo-node standing for reachability from outside the
/// graph. It is never a real node: it has no color and cannot be deleted.
///
/// # Examples
///
/// ```
/// use core_types::EdgeSource;
///
/// let source = EdgeSource::from(Some("A"));
/// assert_eq!(source, EdgeSource::Node("A"));
/// assert_eq!(EdgeSource::<&str>::from(None), EdgeSource::Root);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeSource<T> {
    /// The root pseudo-node
    Root,
    /// An ordinary node
    Node(T),
}

impl<T> EdgeSource<T> {
    /// Returns true for the root pseudo-node.
    pub fn is_root(&self) -> bool {
        matches!(self, EdgeSource::Root)
    }

    /// Returns the node id, or `None` for the root pseudo-node.
    pub fn node(&self) -> Option<&T> {
        match self {
            EdgeSource::Root => None,
            EdgeSource::Node(id) => Some(id),
        }
    }
}

impl<T> From<Option<T>> for EdgeSource<T> {
    fn from(source: Option<T>) -> Self {
        match source {
            Some(id) => EdgeSource::Node(id),
            None => EdgeSource::Root,
        }
    }
}
