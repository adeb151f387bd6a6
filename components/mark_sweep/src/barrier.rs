//! Write barrier for concurrent marking.
//!
//! The barrier is the collector's [`MutatorListener`]. Its rules do not
//! depend on the collector's stage, because mutators cannot observe it:
//!
//! - **Node created**: colored black (allocate-black)
//! - **Edge created**: a white target is shaded gray, whatever the source's
//!   color, the root pseudo-node included. The source is never touched.
//! - **Edge removed**: no color change; the target may become floating
//!   garbage, reclaimed by a later cycle
//! - **Node deleted**: the color entry is dropped
//!
//! Shading on every edge creation is more conservative than a classic
//! insertion barrier, which shades only when the source is black.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use core_types::{Color, EdgeSource, NodeId};
use object_graph::MutatorListener;

use crate::color::ColorState;
use crate::stats::BarrierStats;

#[derive(Default)]
struct BarrierCounters {
    nodes_created: AtomicUsize,
    edges_created: AtomicUsize,
    targets_shaded: AtomicUsize,
    edges_removed: AtomicUsize,
    nodes_deleted: AtomicUsize,
}

/// The collector's mutation listener.
pub struct WriteBarrier<T: NodeId> {
    colors: Arc<ColorState<T>>,
    counters: BarrierCounters,
}

impl<T: NodeId> WriteBarrier<T> {
    /// Creates a barrier writing into `colors`.
    pub fn new(colors: Arc<ColorState<T>>) -> Self {
        WriteBarrier {
            colors,
            counters: BarrierCounters::default(),
        }
    }

    /// Returns the barrier's counters.
    pub fn stats(&self) -> BarrierStats {
        BarrierStats {
            nodes_created: self.counters.nodes_created.load(Ordering::Relaxed),
            edges_created: self.counters.edges_created.load(Ordering::Relaxed),
            targets_shaded: self.counters.targets_shaded.load(Ordering::Relaxed),
            edges_removed: self.counters.edges_removed.load(Ordering::Relaxed),
            nodes_deleted: self.counters.nodes_deleted.load(Ordering::Relaxed),
        }
    }
}

impl<T: NodeId> MutatorListener<T> for WriteBarrier<T> {
    fn on_node_created(&self, node: &T) {
        self.colors.insert(node.clone(), Color::Black);
        self.counters.nodes_created.fetch_add(1, Ordering::Relaxed);
    }

    fn on_edge_created(&self, source: &EdgeSource<T>, target: &T) {
        self.counters.edges_created.fetch_add(1, Ordering::Relaxed);
        if self.colors.shade(target, Color::White, Color::Gray) {
            self.counters.targets_shaded.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(?source, ?target, "write barrier shaded target gray");
        }
    }

    fn on_edge_removed(&self, _source: &EdgeSource<T>, _target: &T) {
        self.counters.edges_removed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_node_deleted(&self, node: &T) {
        self.colors.remove(node);
        self.counters.nodes_deleted.fetch_add(1, Ordering::Relaxed);
    }
}
