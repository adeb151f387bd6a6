//! Stage 2: tracing.

use std::sync::Arc;

use core_types::{Color, EdgeSource, GcResult, NodeId};
use object_graph::Graph;

use super::{GcStage, StageContext};
use crate::task::{BoxedTask, IncrementalTask};

/// Scans gray nodes black, shading their white successors gray.
///
/// The gray set is the worklist. Mutators keep adding to it through the
/// write barrier, so the stage only ends on a step that finds it empty.
pub struct Marking<T: NodeId, G> {
    ctx: Arc<StageContext<T, G>>,
}

impl<T: NodeId, G: Graph<T> + 'static> Marking<T, G> {
    pub(crate) fn new(ctx: Arc<StageContext<T, G>>) -> Self {
        Marking { ctx }
    }
}

impl<T: NodeId, G: Graph<T> + 'static> IncrementalTask for Marking<T, G> {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn step(self: Box<Self>) -> GcResult<Vec<BoxedTask>> {
        self.ctx.enter(GcStage::Tracing);

        let mut scanned = 0;
        let mut shaded = 0;
        while scanned < self.ctx.max_nodes_per_task {
            let Some(node) = self.ctx.colors.blacken_next_gray() else {
                break;
            };
            scanned += 1;
            // An edge added after this read finds a black source and shades
            // its own target.
            for target in self.ctx.graph.successors(&EdgeSource::Node(node)) {
                if self.ctx.colors.shade(&target, Color::White, Color::Gray) {
                    shaded += 1;
                }
            }
        }

        {
            let mut stats = self.ctx.stats.write();
            stats.steps += 1;
            stats.nodes_scanned += scanned;
            stats.targets_shaded += shaded;
        }

        if scanned == 0 {
            tracing::debug!("tracing reached a fixed point");
            return Ok(Vec::new());
        }
        tracing::trace!(scanned, shaded, "tracing step");
        Ok(vec![self as BoxedTask])
    }
}
