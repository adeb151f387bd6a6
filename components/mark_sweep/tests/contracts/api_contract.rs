//! Contract tests verifying the mark_sweep public API.
//! These tests ensure all exported types and functions exist with correct signatures.

use std::sync::Arc;
use std::time::Duration;

use core_types::{Color, EdgeSource, GcError};
use mark_sweep::{
    BackgroundCollector, BoxedTask, Collector, CollectorConfig, CollectorStages, ColorState,
    FifoNodeSetFactory, GcStage, HashNodeSetFactory, NodeSetFactory, TaskQueue, WriteBarrier,
};
use object_graph::{DirectedGraph, MutatorListener};

type TestCollector = Collector<u32, DirectedGraph<u32>>;

fn collector() -> (Arc<DirectedGraph<u32>>, TestCollector) {
    let graph = Arc::new(DirectedGraph::new());
    let collector = Collector::new(Arc::clone(&graph), HashNodeSetFactory);
    graph.set_mutator_listener(collector.mutator_listener());
    (graph, collector)
}

/// Test Collector contract: new(graph, factory) -> Self
#[test]
fn contract_collector_new() {
    let (_, collector) = collector();
    assert_eq!(collector.current_stage(), GcStage::Idle);
    assert_eq!(collector.config(), &CollectorConfig::default());
}

/// Test Collector contract: with_config(graph, factory, config) -> GcResult<Self>
#[test]
fn contract_collector_with_config() {
    let graph = Arc::new(DirectedGraph::<u32>::new());
    let config = CollectorConfig::default()
        .with_max_nodes_per_task(8)
        .with_step_pause(Duration::from_millis(1));
    let collector = Collector::with_config(graph, FifoNodeSetFactory::new(), config).unwrap();
    assert_eq!(collector.config().max_nodes_per_task, 8);
}

/// Test Collector contract: with_config rejects a zero batch size
#[test]
fn contract_collector_with_config_invalid() {
    let graph = Arc::new(DirectedGraph::<u32>::new());
    let config = CollectorConfig::default().with_max_nodes_per_task(0);
    let result = Collector::with_config(graph, HashNodeSetFactory, config);
    assert!(matches!(result, Err(GcError::InvalidConfig(_))));
}

/// Test Collector contract: mutator_listener() -> Arc<dyn MutatorListener<T>>
#[test]
fn contract_collector_mutator_listener() {
    let (graph, collector) = collector();
    let listener: Arc<dyn MutatorListener<u32>> = collector.mutator_listener();
    let _ = listener;
    graph.create_node(1).unwrap();
    assert_eq!(collector.barrier_stats().nodes_created, 1);
}

/// Test Collector contract: stages_to_execute() -> CollectorStages
#[test]
fn contract_collector_stages_to_execute() {
    let (_, collector) = collector();
    let stages: CollectorStages = collector.stages_to_execute();
    let stages: Vec<BoxedTask> = stages.collect();
    assert_eq!(stages.len(), 3);
}

/// Test Collector contract: color(&T) -> GcResult<Color>
#[test]
fn contract_collector_color() {
    let (graph, collector) = collector();
    graph.create_node(1).unwrap();
    assert_eq!(collector.color(&1), Ok(Color::Black));
    assert!(matches!(collector.color(&2), Err(GcError::UnknownNode(_))));
}

/// Test Collector contract: run_cycle() -> GcResult<CycleReport>
#[test]
fn contract_collector_run_cycle() {
    let (graph, collector) = collector();
    graph.create_node(1).unwrap();
    graph.create_directed_edge(EdgeSource::Root, 1).unwrap();

    let report = collector.run_cycle().unwrap();
    assert!(report.total_steps() >= 3);
    assert_eq!(collector.stats().cycles_completed, 1);
}

/// Test TaskQueue contract: new(tasks), step(), run_to_exhaustion()
#[test]
fn contract_task_queue() {
    let (_, collector) = collector();
    let mut queue = TaskQueue::new(collector.stages_to_execute().take(1));
    assert_eq!(queue.len(), 1);
    queue.run_to_exhaustion().unwrap();
    assert!(queue.is_empty());
}

/// Test ColorState contract: new(factory), insert, color, set_color
#[test]
fn contract_color_state() {
    let factory: &dyn NodeSetFactory<u32> = &HashNodeSetFactory;
    let colors = ColorState::new(factory);
    colors.insert(1, Color::White);
    colors.set_color(&1, Color::Gray).unwrap();
    assert_eq!(colors.color(&1), Ok(Color::Gray));
}

/// Test WriteBarrier contract: implements MutatorListener
#[test]
fn contract_write_barrier() {
    let colors = Arc::new(ColorState::new(&HashNodeSetFactory));
    let barrier = WriteBarrier::new(Arc::clone(&colors));
    barrier.on_node_created(&1u32);
    barrier.on_edge_created(&EdgeSource::Root, &1);
    assert_eq!(colors.color(&1), Ok(Color::Black));
    assert_eq!(barrier.stats().edges_created, 1);
}

/// Test BackgroundCollector contract: start(collector) -> io::Result<Self>, stop()
#[test]
fn contract_background_collector() {
    let (_, collector) = collector();
    let mut background = BackgroundCollector::start(Arc::new(collector)).unwrap();
    background.stop();
    assert!(!background.is_running());
    assert!(background.last_error().is_none());
}
