//! The three collection stages.
//!
//! Each cycle runs, strictly in order:
//!
//! 1. [`RootMarking`] - shade root targets gray, rescan allocate-black nodes
//! 2. [`Marking`] - scan gray nodes black until no gray node remains
//! 3. [`Sweep`] - delete white nodes, reset black nodes to white
//!
//! Every stage is a single [`IncrementalTask`](crate::IncrementalTask) that
//! takes its work snapshot lazily on its first step and continues itself
//! while steps keep finding work. A step that finds nothing exhausts the
//! stage.

use std::sync::Arc;

use core_types::NodeId;
use crossbeam::atomic::AtomicCell;
use object_graph::Graph;
use parking_lot::RwLock;

use crate::color::ColorState;
use crate::stats::CollectorStats;

mod marking;
mod roots;
mod sweep;

pub use marking::Marking;
pub use roots::RootMarking;
pub use sweep::Sweep;

/// The stage the collector is currently executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GcStage {
    /// No stage has started since the last sweep finished
    #[default]
    Idle,
    /// Stage 1
    RootMarking,
    /// Stage 2
    Tracing,
    /// Stage 3
    Sweeping,
}

/// State shared by the collector and its stage tasks.
pub(crate) struct StageContext<T: NodeId, G> {
    pub(crate) graph: Arc<G>,
    pub(crate) colors: Arc<ColorState<T>>,
    pub(crate) stats: RwLock<CollectorStats>,
    pub(crate) stage: AtomicCell<GcStage>,
    pub(crate) max_nodes_per_task: usize,
}

impl<T: NodeId, G: Graph<T>> StageContext<T, G> {
    /// Marks `stage` as current, logging the transition.
    pub(crate) fn enter(&self, stage: GcStage) {
        let previous = self.stage.swap(stage);
        if previous != stage {
            tracing::debug!(?previous, current = ?stage, "collector stage transition");
        }
    }
}
