//! Stage 1: root marking.

use std::collections::VecDeque;
use std::sync::Arc;

use core_types::{Color, EdgeSource, GcResult, NodeId};
use object_graph::Graph;

use super::{GcStage, StageContext};
use crate::task::{BoxedTask, IncrementalTask};

enum RootWork<T> {
    /// A direct successor of the root pseudo-node
    Root(T),
    /// A node that was black when the stage started
    Rescan(T),
}

/// Shades the root pseudo-node's white successors gray.
///
/// Nodes allocated after the previous sweep took its snapshot are still
/// black when this stage starts, and their successors may since have been
/// reset to white. Those black nodes are rescanned here, so tracing starts
/// with no black-to-white edge in the graph.
pub struct RootMarking<T: NodeId, G> {
    ctx: Arc<StageContext<T, G>>,
    pending: Option<VecDeque<RootWork<T>>>,
}

impl<T: NodeId, G: Graph<T> + 'static> RootMarking<T, G> {
    pub(crate) fn new(ctx: Arc<StageContext<T, G>>) -> Self {
        RootMarking { ctx, pending: None }
    }

    fn snapshot(&self) -> VecDeque<RootWork<T>> {
        let roots = self.ctx.graph.successors(&EdgeSource::Root);
        let allocated = self.ctx.colors.nodes_with_color(Color::Black);
        tracing::debug!(
            roots = roots.len(),
            allocated = allocated.len(),
            "root marking snapshot"
        );
        roots
            .into_iter()
            .map(RootWork::Root)
            .chain(allocated.into_iter().map(RootWork::Rescan))
            .collect()
    }

    /// Shades the white successors of `node` if it is still alive and black.
    fn rescan(&self, node: &T) -> usize {
        if self.ctx.colors.color(node) != Ok(Color::Black) {
            return 0;
        }
        self.ctx
            .graph
            .successors(&EdgeSource::Node(node.clone()))
            .iter()
            .filter(|target| self.ctx.colors.shade(target, Color::White, Color::Gray))
            .count()
    }
}

impl<T: NodeId, G: Graph<T> + 'static> IncrementalTask for RootMarking<T, G> {
    fn name(&self) -> &'static str {
        "root-marking"
    }

    fn step(mut self: Box<Self>) -> GcResult<Vec<BoxedTask>> {
        self.ctx.enter(GcStage::RootMarking);
        if self.pending.is_none() {
            self.pending = Some(self.snapshot());
        }
        let mut pending = self.pending.take().unwrap_or_default();

        let mut processed = 0;
        let mut roots_shaded = 0;
        let mut rescanned = 0;
        let mut rescan_shaded = 0;
        while processed < self.ctx.max_nodes_per_task {
            let Some(work) = pending.pop_front() else {
                break;
            };
            processed += 1;
            match work {
                RootWork::Root(node) => {
                    if self.ctx.colors.shade(&node, Color::White, Color::Gray) {
                        roots_shaded += 1;
                    }
                }
                RootWork::Rescan(node) => {
                    rescanned += 1;
                    rescan_shaded += self.rescan(&node);
                }
            }
        }

        {
            let mut stats = self.ctx.stats.write();
            stats.steps += 1;
            stats.roots_shaded += roots_shaded;
            stats.allocations_rescanned += rescanned;
            stats.targets_shaded += rescan_shaded;
        }

        if processed == 0 {
            tracing::debug!("root marking exhausted");
            return Ok(Vec::new());
        }
        self.pending = Some(pending);
        Ok(vec![self as BoxedTask])
    }
}
