//! Thread-safe in-memory directed graph.
//!
//! Nodes and edges live behind a single `RwLock`. Every mutation notifies
//! the registered [`MutatorListener`] while it still holds the write lock,
//! so a reader either sees neither the mutation nor its color update, or
//! both.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use core_types::{EdgeSource, GraphError, GraphResult, NodeId};
use parking_lot::RwLock;

use crate::listener::{Graph, MutatorListener};

/// Edges incident to one node.
#[derive(Debug)]
struct Adjacency<T> {
    outgoing: HashSet<T>,
    incoming: HashSet<EdgeSource<T>>,
}

impl<T> Default for Adjacency<T> {
    fn default() -> Self {
        Adjacency {
            outgoing: HashSet::new(),
            incoming: HashSet::new(),
        }
    }
}

#[derive(Debug)]
struct GraphState<T> {
    nodes: HashMap<T, Adjacency<T>>,
    /// Targets of edges leaving the root pseudo-node
    roots: HashSet<T>,
}

impl<T: NodeId> GraphState<T> {
    fn outgoing_mut(&mut self, source: &EdgeSource<T>) -> Option<&mut HashSet<T>> {
        match source {
            EdgeSource::Root => Some(&mut self.roots),
            EdgeSource::Node(id) => self.nodes.get_mut(id).map(|adj| &mut adj.outgoing),
        }
    }

    fn require_source(&self, source: &EdgeSource<T>) -> GraphResult<()> {
        match source {
            EdgeSource::Root => Ok(()),
            EdgeSource::Node(id) => self.require_node(id),
        }
    }

    fn require_node(&self, id: &T) -> GraphResult<()> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(GraphError::unknown(id))
        }
    }

    fn unlink(&mut self, node: &T) {
        let Some(adjacency) = self.nodes.remove(node) else {
            return;
        };
        for target in &adjacency.outgoing {
            if let Some(adj) = self.nodes.get_mut(target) {
                adj.incoming.remove(&EdgeSource::Node(node.clone()));
            }
        }
        for source in &adjacency.incoming {
            match source {
                EdgeSource::Root => {
                    self.roots.remove(node);
                }
                EdgeSource::Node(id) => {
                    if let Some(adj) = self.nodes.get_mut(id) {
                        adj.outgoing.remove(node);
                    }
                }
            }
        }
    }
}

/// In-memory directed graph with a virtual root pseudo-node.
///
/// Shared between mutators and the collector as an `Arc<DirectedGraph<T>>`.
pub struct DirectedGraph<T: NodeId> {
    state: RwLock<GraphState<T>>,
    listener: RwLock<Option<Arc<dyn MutatorListener<T>>>>,
}

impl<T: NodeId> DirectedGraph<T> {
    /// Creates an empty graph with no listener.
    pub fn new() -> Self {
        DirectedGraph {
            state: RwLock::new(GraphState {
                nodes: HashMap::new(),
                roots: HashSet::new(),
            }),
            listener: RwLock::new(None),
        }
    }

    /// Registers the mutation listener, replacing any previous one.
    ///
    /// Mutations made before registration are not observed; register before
    /// the first mutation for the collector to be sound from the start.
    pub fn set_mutator_listener(&self, listener: Arc<dyn MutatorListener<T>>) {
        *self.listener.write() = Some(listener);
        tracing::debug!("mutator listener registered");
    }

    fn notify(&self, f: impl FnOnce(&dyn MutatorListener<T>)) {
        if let Some(listener) = self.listener.read().as_ref() {
            f(listener.as_ref());
        }
    }

    /// Registers a new node.
    ///
    /// Fails with [`GraphError::DuplicateNode`] if the id is taken, leaving
    /// the graph unchanged.
    pub fn create_node(&self, id: T) -> GraphResult<()> {
        let mut state = self.state.write();
        if state.nodes.contains_key(&id) {
            return Err(GraphError::duplicate(&id));
        }
        self.notify(|l| l.on_node_created(&id));
        tracing::trace!(node = ?id, "node created");
        state.nodes.insert(id, Adjacency::default());
        Ok(())
    }

    /// Creates an edge from `source` to `target`.
    ///
    /// Both ends must exist (the root pseudo-node always does). Creating an
    /// existing edge leaves the edge set unchanged but still notifies the
    /// listener.
    pub fn create_directed_edge(&self, source: EdgeSource<T>, target: T) -> GraphResult<()> {
        let mut state = self.state.write();
        state.require_source(&source)?;
        state.require_node(&target)?;

        self.notify(|l| l.on_edge_created(&source, &target));
        if let Some(outgoing) = state.outgoing_mut(&source) {
            outgoing.insert(target.clone());
        }
        if let Some(adj) = state.nodes.get_mut(&target) {
            adj.incoming.insert(source);
        }
        Ok(())
    }

    /// Creates `id` together with an edge from `source` to it, as a single
    /// mutation.
    ///
    /// A node created and linked in two calls is unreachable in between, and
    /// a collector running concurrently may reclaim it in that window.
    pub fn create_linked_node(&self, source: EdgeSource<T>, id: T) -> GraphResult<()> {
        let mut state = self.state.write();
        if state.nodes.contains_key(&id) {
            return Err(GraphError::duplicate(&id));
        }
        state.require_source(&source)?;

        self.notify(|l| {
            l.on_node_created(&id);
            l.on_edge_created(&source, &id);
        });
        if let Some(outgoing) = state.outgoing_mut(&source) {
            outgoing.insert(id.clone());
        }
        let mut adjacency = Adjacency::default();
        adjacency.incoming.insert(source);
        state.nodes.insert(id, adjacency);
        Ok(())
    }

    /// Removes the edge from `source` to `target`; a no-op if it is absent.
    pub fn remove_directed_edge(&self, source: EdgeSource<T>, target: T) -> GraphResult<()> {
        let mut state = self.state.write();
        self.notify(|l| l.on_edge_removed(&source, &target));
        if let Some(outgoing) = state.outgoing_mut(&source) {
            outgoing.remove(&target);
        }
        if let Some(adj) = state.nodes.get_mut(&target) {
            adj.incoming.remove(&source);
        }
        Ok(())
    }

    /// Returns the sources of every edge entering `node`.
    pub fn predecessors(&self, node: &T) -> Vec<EdgeSource<T>> {
        self.state
            .read()
            .nodes
            .get(node)
            .map(|adj| adj.incoming.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns true if the edge from `source` to `target` exists.
    pub fn has_edge(&self, source: &EdgeSource<T>, target: &T) -> bool {
        let state = self.state.read();
        match source {
            EdgeSource::Root => state.roots.contains(target),
            EdgeSource::Node(id) => state
                .nodes
                .get(id)
                .is_some_and(|adj| adj.outgoing.contains(target)),
        }
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.state.read().nodes.len()
    }

    /// Number of edges, root edges included.
    pub fn edge_count(&self) -> usize {
        let state = self.state.read();
        state.roots.len() + state.nodes.values().map(|adj| adj.outgoing.len()).sum::<usize>()
    }
}

impl<T: NodeId> Default for DirectedGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NodeId> Graph<T> for DirectedGraph<T> {
    fn all_nodes(&self) -> Vec<T> {
        self.state.read().nodes.keys().cloned().collect()
    }

    fn successors(&self, source: &EdgeSource<T>) -> Vec<T> {
        let state = self.state.read();
        match source {
            EdgeSource::Root => state.roots.iter().cloned().collect(),
            EdgeSource::Node(id) => state
                .nodes
                .get(id)
                .map(|adj| adj.outgoing.iter().cloned().collect())
                .unwrap_or_default(),
        }
    }

    fn contains_node(&self, node: &T) -> bool {
        self.state.read().nodes.contains_key(node)
    }

    fn delete_node_if(
        &self,
        node: &T,
        predicate: &mut dyn FnMut(&T) -> bool,
    ) -> GraphResult<bool> {
        let mut state = self.state.write();
        state.require_node(node)?;
        if !predicate(node) {
            return Ok(false);
        }
        state.unlink(node);
        self.notify(|l| l.on_node_deleted(node));
        tracing::trace!(node = ?node, "node deleted");
        Ok(true)
    }
}
