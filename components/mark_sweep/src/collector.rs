//! The incremental mark-sweep collector.
//!
//! A [`Collector`] owns the color state and the write barrier for one graph.
//! It never drives itself: an external scheduler asks for the stages of a
//! cycle with [`Collector::stages_to_execute`] and steps them in order, each
//! to exhaustion, interleaved freely with mutator activity. [`Collector::run_cycle`]
//! is that scheduler in its simplest form.
//!
//! # Wiring
//!
//! The graph must report mutations to [`Collector::mutator_listener`] before
//! the first node is created:
//!
//! ```
//! use std::sync::Arc;
//! use core_types::{Color, EdgeSource};
//! use mark_sweep::{Collector, HashNodeSetFactory};
//! use object_graph::DirectedGraph;
//!
//! let graph = Arc::new(DirectedGraph::new());
//! let collector = Collector::new(Arc::clone(&graph), HashNodeSetFactory);
//! graph.set_mutator_listener(collector.mutator_listener());
//!
//! graph.create_node("a").unwrap();
//! graph.create_node("b").unwrap();
//! graph.create_directed_edge(EdgeSource::Root, "a").unwrap();
//!
//! collector.run_cycle().unwrap();
//! collector.run_cycle().unwrap();
//! assert_eq!(collector.color(&"a"), Ok(Color::White));
//! assert!(collector.color(&"b").is_err());
//! ```

use std::sync::Arc;

use core_types::{Color, GcResult, NodeId};
use crossbeam::atomic::AtomicCell;
use object_graph::{Graph, MutatorListener};
use parking_lot::{Mutex, RwLock};

use crate::barrier::WriteBarrier;
use crate::color::ColorState;
use crate::config::CollectorConfig;
use crate::node_set::NodeSetFactory;
use crate::stages::{GcStage, Marking, RootMarking, StageContext, Sweep};
use crate::stats::{BarrierStats, CollectorStats, CycleReport};
use crate::task::{BoxedTask, TaskQueue};

/// Incremental, concurrent tri-color mark-sweep collector over a [`Graph`].
pub struct Collector<T: NodeId, G: Graph<T> + 'static> {
    ctx: Arc<StageContext<T, G>>,
    barrier: Arc<WriteBarrier<T>>,
    config: CollectorConfig,
    /// Held by `run_cycle`; one driver at a time
    driver: Mutex<()>,
}

impl<T: NodeId, G: Graph<T> + 'static> Collector<T, G> {
    /// Creates a collector for `graph` with the default configuration.
    pub fn new(graph: Arc<G>, factory: impl NodeSetFactory<T>) -> Self {
        Self::build(graph, &factory, CollectorConfig::default())
    }

    /// Creates a collector with a custom configuration.
    pub fn with_config(
        graph: Arc<G>,
        factory: impl NodeSetFactory<T>,
        config: CollectorConfig,
    ) -> GcResult<Self> {
        config.validate()?;
        Ok(Self::build(graph, &factory, config))
    }

    fn build(graph: Arc<G>, factory: &dyn NodeSetFactory<T>, config: CollectorConfig) -> Self {
        let colors = Arc::new(ColorState::new(factory));
        let barrier = Arc::new(WriteBarrier::new(Arc::clone(&colors)));
        tracing::debug!(
            max_nodes_per_task = config.max_nodes_per_task,
            "collector created"
        );
        Collector {
            ctx: Arc::new(StageContext {
                graph,
                colors,
                stats: RwLock::new(CollectorStats::default()),
                stage: AtomicCell::new(GcStage::Idle),
                max_nodes_per_task: config.max_nodes_per_task,
            }),
            barrier,
            config,
            driver: Mutex::new(()),
        }
    }

    /// The listener the graph must notify of every mutation.
    pub fn mutator_listener(&self) -> Arc<dyn MutatorListener<T>> {
        self.barrier.clone()
    }

    /// Returns fresh tasks for the three stages of one cycle, in execution
    /// order.
    ///
    /// Each stage must be stepped to exhaustion before the next one starts.
    pub fn stages_to_execute(&self) -> CollectorStages {
        CollectorStages {
            stages: vec![
                Box::new(RootMarking::new(Arc::clone(&self.ctx))) as BoxedTask,
                Box::new(Marking::new(Arc::clone(&self.ctx))) as BoxedTask,
                Box::new(Sweep::new(Arc::clone(&self.ctx))) as BoxedTask,
            ]
            .into_iter(),
        }
    }

    /// The stage most recently stepped, or `Idle` once a sweep has finished.
    pub fn current_stage(&self) -> GcStage {
        self.ctx.stage.load()
    }

    /// Returns the color of `node`.
    pub fn color(&self, node: &T) -> GcResult<Color> {
        self.ctx.colors.color(node)
    }

    /// Runs one full cycle, each stage stepped to exhaustion.
    ///
    /// Concurrent callers are serialized. A fatal error aborts the cycle
    /// where it stands.
    pub fn run_cycle(&self) -> GcResult<CycleReport> {
        let _driver = self.driver.lock();
        let before = self.stats();

        let mut steps = [0; 3];
        for (count, stage) in steps.iter_mut().zip(self.stages_to_execute()) {
            *count = TaskQueue::new([stage]).run_to_exhaustion()?;
        }

        let after = self.stats();
        let report = CycleReport {
            root_marking_steps: steps[0],
            tracing_steps: steps[1],
            sweep_steps: steps[2],
            nodes_scanned: after.nodes_scanned - before.nodes_scanned,
            nodes_swept: after.nodes_swept - before.nodes_swept,
            nodes_reset: after.nodes_reset - before.nodes_reset,
        };
        tracing::debug!(?report, "cycle finished");
        Ok(report)
    }

    /// Cumulative stage statistics.
    pub fn stats(&self) -> CollectorStats {
        self.ctx.stats.read().clone()
    }

    /// Write barrier statistics.
    pub fn barrier_stats(&self) -> BarrierStats {
        self.barrier.stats()
    }

    /// The collector's configuration.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// The collected graph.
    pub fn graph(&self) -> &Arc<G> {
        &self.ctx.graph
    }
}

/// The stage tasks of one cycle, in execution order.
#[derive(Debug)]
pub struct CollectorStages {
    stages: std::vec::IntoIter<BoxedTask>,
}

impl Iterator for CollectorStages {
    type Item = BoxedTask;

    fn next(&mut self) -> Option<BoxedTask> {
        self.stages.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stages.size_hint()
    }
}

impl ExactSizeIterator for CollectorStages {}
