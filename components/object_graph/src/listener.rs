//! Interfaces between the graph store and the collector.

use core_types::{EdgeSource, GraphResult};

/// Observer of structural graph mutations.
///
/// A graph holds exactly one listener and invokes it synchronously, inline
/// with each mutation. The color update a listener makes must be visible
/// before the mutation itself is visible to any reader.
pub trait MutatorListener<T>: Send + Sync {
    /// A node was created.
    fn on_node_created(&self, node: &T);

    /// An edge from `source` to `target` was created (or re-created).
    fn on_edge_created(&self, source: &EdgeSource<T>, target: &T);

    /// An edge from `source` to `target` was removed, or did not exist.
    fn on_edge_removed(&self, source: &EdgeSource<T>, target: &T);

    /// A node and all of its incident edges were deleted by the collector.
    fn on_node_deleted(&self, node: &T);
}

/// The graph as seen by the collector.
///
/// Every method returns snapshots; nothing borrowed from the graph outlives
/// the call.
pub trait Graph<T>: Send + Sync {
    /// Returns every live node id.
    fn all_nodes(&self) -> Vec<T>;

    /// Returns the targets of every edge leaving `source`.
    ///
    /// `successors(&EdgeSource::Root)` yields the root targets.
    fn successors(&self, source: &EdgeSource<T>) -> Vec<T>;

    /// Returns true if `node` is live.
    fn contains_node(&self, node: &T) -> bool;

    /// Deletes `node` if `predicate` approves, together with every edge where
    /// it is source or target.
    ///
    /// The predicate runs with mutations excluded, so the decision and the
    /// deletion are atomic with respect to mutators. Returns whether the node
    /// was deleted.
    fn delete_node_if(
        &self,
        node: &T,
        predicate: &mut dyn FnMut(&T) -> bool,
    ) -> GraphResult<bool>;

    /// Deletes `node` and every edge where it is source or target.
    fn delete_node(&self, node: &T) -> GraphResult<()> {
        self.delete_node_if(node, &mut |_| true).map(|_| ())
    }
}
