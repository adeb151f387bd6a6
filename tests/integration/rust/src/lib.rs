//! Integration test suite for the mark-sweep collector
//!
//! This crate provides integration tests that verify the graph store and
//! the collector work together correctly across component boundaries.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use core_types::{EdgeSource, GcResult, NodeId};
use mark_sweep::{Collector, CollectorConfig, FifoNodeSetFactory};
use object_graph::{DirectedGraph, Graph};

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use mark_sweep;
    pub use object_graph;
}

/// A graph wired to its collector.
pub struct Harness<T: NodeId> {
    /// The mutated graph
    pub graph: Arc<DirectedGraph<T>>,
    /// The collector observing it
    pub collector: Arc<Collector<T, DirectedGraph<T>>>,
}

impl<T: NodeId> Harness<T> {
    /// Creates an empty graph with a collector processing `max_nodes_per_task`
    /// nodes per step.
    pub fn new(max_nodes_per_task: usize) -> GcResult<Self> {
        let graph = Arc::new(DirectedGraph::new());
        let config = CollectorConfig::default().with_max_nodes_per_task(max_nodes_per_task);
        let collector =
            Collector::with_config(Arc::clone(&graph), FifoNodeSetFactory::new(), config)?;
        graph.set_mutator_listener(collector.mutator_listener());
        Ok(Harness {
            graph,
            collector: Arc::new(collector),
        })
    }

    /// Every node reachable from the root pseudo-node.
    pub fn reachable(&self) -> HashSet<T> {
        reachable(self.graph.as_ref())
    }
}

/// Every node reachable from the root pseudo-node of `graph`.
pub fn reachable<T: NodeId>(graph: &impl Graph<T>) -> HashSet<T> {
    let mut seen = HashSet::new();
    let mut stack = graph.successors(&EdgeSource::Root);
    while let Some(node) = stack.pop() {
        if seen.insert(node.clone()) {
            stack.extend(graph.successors(&EdgeSource::Node(node)));
        }
    }
    seen
}

/// A mutator's own record of the edges it created and removed.
///
/// Collector deletions never touch the reachable part of a graph, so the
/// shadow's reachable set is what the real graph must still contain.
#[derive(Debug, Clone)]
pub struct Shadow<T: NodeId> {
    edges: HashMap<EdgeSource<T>, HashSet<T>>,
}

impl<T: NodeId> Default for Shadow<T> {
    fn default() -> Self {
        Shadow {
            edges: HashMap::new(),
        }
    }
}

impl<T: NodeId> Shadow<T> {
    /// Records an edge creation.
    pub fn link(&mut self, source: EdgeSource<T>, target: T) {
        self.edges.entry(source).or_default().insert(target);
    }

    /// Records an edge removal.
    pub fn unlink(&mut self, source: &EdgeSource<T>, target: &T) {
        if let Some(targets) = self.edges.get_mut(source) {
            targets.remove(target);
        }
    }

    /// Targets recorded for `source`.
    pub fn targets(&self, source: &EdgeSource<T>) -> Vec<T> {
        self.edges
            .get(source)
            .map(|targets| targets.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every node reachable from the root in the recorded edge set.
    pub fn reachable(&self) -> HashSet<T> {
        let mut seen = HashSet::new();
        let mut stack = self.targets(&EdgeSource::Root);
        while let Some(node) = stack.pop() {
            if seen.insert(node.clone()) {
                stack.extend(self.targets(&EdgeSource::Node(node)));
            }
        }
        seen
    }

    /// Returns the first recorded-reachable node missing from `graph`.
    pub fn first_lost(&self, graph: &impl Graph<T>) -> Option<T> {
        self.reachable()
            .into_iter()
            .find(|node| !graph.contains_node(node))
    }
}
