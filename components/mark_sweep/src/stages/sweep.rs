//! Stage 3: sweep.

use std::collections::VecDeque;
use std::sync::Arc;

use core_types::{Color, GcError, GcResult, GraphError, NodeId};
use object_graph::Graph;

use super::{GcStage, StageContext};
use crate::task::{BoxedTask, IncrementalTask};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Deleted,
    Reset,
    Gray,
    /// Deleted concurrently, or never colored
    Skipped,
}

/// Deletes white nodes and resets black nodes to white.
///
/// Works from a snapshot of the node set taken at the first step. Nodes
/// created afterwards are not visited and stay black into the next cycle.
/// Finding a gray node means tracing did not reach its fixed point and is
/// reported as [`GcError::GrayDuringSweep`].
pub struct Sweep<T: NodeId, G> {
    ctx: Arc<StageContext<T, G>>,
    pending: Option<VecDeque<T>>,
}

impl<T: NodeId, G: Graph<T> + 'static> Sweep<T, G> {
    pub(crate) fn new(ctx: Arc<StageContext<T, G>>) -> Self {
        Sweep { ctx, pending: None }
    }

    /// Decides and applies the fate of `node` atomically with respect to
    /// mutators. A node deleted since the snapshot is skipped; any other
    /// graph failure is returned.
    fn sweep_node(&self, node: &T) -> GcResult<Verdict> {
        let colors = &self.ctx.colors;
        let mut verdict = Verdict::Skipped;
        let result = self.ctx.graph.delete_node_if(node, &mut |n| {
            verdict = match colors.color(n) {
                Ok(Color::White) => Verdict::Deleted,
                Ok(Color::Black) => {
                    colors.shade(n, Color::Black, Color::White);
                    Verdict::Reset
                }
                Ok(Color::Gray) => Verdict::Gray,
                Err(_) => Verdict::Skipped,
            };
            verdict == Verdict::Deleted
        });
        match result {
            Ok(_) => Ok(verdict),
            Err(GraphError::UnknownNode(_)) => Ok(Verdict::Skipped),
            Err(err) => Err(err.into()),
        }
    }

    fn finish(&self) {
        let cycles = {
            let mut stats = self.ctx.stats.write();
            stats.cycles_completed += 1;
            stats.cycles_completed
        };
        self.ctx.enter(GcStage::Idle);
        tracing::debug!(cycles, "collection cycle complete");
    }
}

impl<T: NodeId, G: Graph<T> + 'static> IncrementalTask for Sweep<T, G> {
    fn name(&self) -> &'static str {
        "sweep"
    }

    fn step(mut self: Box<Self>) -> GcResult<Vec<BoxedTask>> {
        self.ctx.enter(GcStage::Sweeping);
        if self.pending.is_none() {
            let nodes: VecDeque<T> = self.ctx.graph.all_nodes().into();
            tracing::debug!(nodes = nodes.len(), "sweep snapshot");
            self.pending = Some(nodes);
        }
        let mut pending = self.pending.take().unwrap_or_default();

        let mut examined = 0;
        let mut swept = 0;
        let mut reset = 0;
        let mut breach = None;
        let mut failure = None;
        while examined < self.ctx.max_nodes_per_task {
            let Some(node) = pending.pop_front() else {
                break;
            };
            examined += 1;
            let verdict = match self.sweep_node(&node) {
                Ok(verdict) => verdict,
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            };
            match verdict {
                Verdict::Deleted => {
                    swept += 1;
                    tracing::trace!(?node, "swept");
                }
                Verdict::Reset => reset += 1,
                Verdict::Gray => {
                    breach = Some(node);
                    break;
                }
                Verdict::Skipped => {}
            }
        }

        {
            let mut stats = self.ctx.stats.write();
            stats.steps += 1;
            stats.nodes_swept += swept;
            stats.nodes_reset += reset;
        }

        if let Some(err) = failure {
            tracing::error!(error = %err, "graph failure during sweep");
            return Err(err);
        }
        if let Some(node) = breach {
            tracing::error!(?node, "gray node found during sweep");
            return Err(GcError::GrayDuringSweep(format!("{:?}", node)));
        }
        if examined == 0 {
            self.finish();
            return Ok(Vec::new());
        }
        self.pending = Some(pending);
        Ok(vec![self as BoxedTask])
    }
}
