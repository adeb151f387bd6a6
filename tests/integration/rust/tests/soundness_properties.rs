//! Soundness Property Tests
//!
//! Random mutation scripts interleaved with single collector steps. After
//! every action nothing reachable may have been reclaimed, and once mutation
//! stops two full cycles must leave exactly the reachable nodes.

use core_types::{Color, EdgeSource};
use integration_tests::{Harness, Shadow};
use mark_sweep::{CollectorStages, TaskQueue};
use object_graph::Graph;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    /// Create a node linked from the root or from a reachable node
    Create { rooted: bool, parent: usize },
    /// Link two reachable nodes
    Link { source: usize, target: usize },
    /// Remove an edge leaving a reachable node
    Unlink { source: usize },
    /// Remove a root edge
    Unroot { pick: usize },
    /// One collector step
    Step,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (any::<bool>(), any::<usize>())
            .prop_map(|(rooted, parent)| Action::Create { rooted, parent }),
        2 => (any::<usize>(), any::<usize>())
            .prop_map(|(source, target)| Action::Link { source, target }),
        2 => any::<usize>().prop_map(|source| Action::Unlink { source }),
        1 => any::<usize>().prop_map(|pick| Action::Unroot { pick }),
        6 => Just(Action::Step),
    ]
}

/// Steps the collector one task step at a time, cycle after cycle.
struct Scheduler<'a> {
    h: &'a Harness<u32>,
    stages: CollectorStages,
    queue: TaskQueue,
}

impl<'a> Scheduler<'a> {
    fn new(h: &'a Harness<u32>) -> Self {
        Scheduler {
            h,
            stages: h.collector.stages_to_execute(),
            queue: TaskQueue::default(),
        }
    }

    fn step(&mut self) {
        while self.queue.is_empty() {
            match self.stages.next() {
                Some(stage) => self.queue.push(stage),
                None => self.stages = self.h.collector.stages_to_execute(),
            }
        }
        self.queue.step().unwrap();
    }

    /// Completes whatever cycle is under way.
    fn finish_cycle(&mut self) {
        self.queue.run_to_exhaustion().unwrap();
        for stage in &mut self.stages {
            TaskQueue::new([stage]).run_to_exhaustion().unwrap();
        }
        self.stages = self.h.collector.stages_to_execute();
    }
}

fn pick<T: Copy>(nodes: &[T], index: usize) -> Option<T> {
    if nodes.is_empty() {
        None
    } else {
        Some(nodes[index % nodes.len()])
    }
}

fn sorted(nodes: impl IntoIterator<Item = u32>) -> Vec<u32> {
    let mut nodes: Vec<u32> = nodes.into_iter().collect();
    nodes.sort_unstable();
    nodes
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_reachable_nodes_are_never_reclaimed(
        batch in 1usize..4,
        actions in prop::collection::vec(action(), 1..200),
    ) {
        let h = Harness::new(batch).unwrap();
        let mut shadow = Shadow::default();
        let mut scheduler = Scheduler::new(&h);
        let mut next_node = 0u32;

        for action in actions {
            let live = sorted(shadow.reachable());
            match action {
                Action::Create { rooted, parent } => {
                    let source = match pick(&live, parent) {
                        Some(parent) if !rooted => EdgeSource::Node(parent),
                        _ => EdgeSource::Root,
                    };
                    h.graph.create_linked_node(source.clone(), next_node).unwrap();
                    prop_assert_eq!(h.collector.color(&next_node), Ok(Color::Black));
                    shadow.link(source, next_node);
                    next_node += 1;
                }
                Action::Link { source, target } => {
                    if let (Some(source), Some(target)) = (pick(&live, source), pick(&live, target)) {
                        let before = h.collector.color(&target).unwrap();
                        h.graph.create_directed_edge(EdgeSource::Node(source), target).unwrap();
                        shadow.link(EdgeSource::Node(source), target);
                        if before == Color::White {
                            prop_assert_eq!(h.collector.color(&target), Ok(Color::Gray));
                        }
                    }
                }
                Action::Unlink { source } => {
                    if let Some(source) = pick(&live, source) {
                        let source = EdgeSource::Node(source);
                        if let Some(target) = shadow.targets(&source).into_iter().min() {
                            let before = h.collector.color(&target).unwrap();
                            shadow.unlink(&source, &target);
                            h.graph.remove_directed_edge(source, target).unwrap();
                            prop_assert_eq!(h.collector.color(&target), Ok(before));
                        }
                    }
                }
                Action::Unroot { pick: index } => {
                    let rooted = sorted(shadow.targets(&EdgeSource::Root));
                    if let Some(root) = pick(&rooted, index) {
                        shadow.unlink(&EdgeSource::Root, &root);
                        h.graph.remove_directed_edge(EdgeSource::Root, root).unwrap();
                    }
                }
                Action::Step => scheduler.step(),
            }
            prop_assert_eq!(shadow.first_lost(h.graph.as_ref()), None);
        }

        scheduler.finish_cycle();
        h.collector.run_cycle().unwrap();
        h.collector.run_cycle().unwrap();

        let reachable = sorted(shadow.reachable());
        prop_assert_eq!(sorted(h.graph.all_nodes()), reachable.clone());
        for node in reachable {
            prop_assert_eq!(h.collector.color(&node), Ok(Color::White));
        }
    }

    #[test]
    fn prop_static_graph_survives_any_cycle_count(
        edges in prop::collection::vec((0u32..16, 0u32..16), 0..48),
        roots in prop::collection::vec(0u32..16, 0..4),
        cycles in 1usize..4,
    ) {
        let h = Harness::new(2).unwrap();
        let mut shadow = Shadow::default();
        for node in 0..16 {
            h.graph.create_node(node).unwrap();
        }
        for (source, target) in edges {
            h.graph.create_directed_edge(EdgeSource::Node(source), target).unwrap();
            shadow.link(EdgeSource::Node(source), target);
        }
        for root in roots {
            h.graph.create_directed_edge(EdgeSource::Root, root).unwrap();
            shadow.link(EdgeSource::Root, root);
        }

        // Nodes start black, so the first cycle only resets them.
        let first = h.collector.run_cycle().unwrap();
        prop_assert_eq!(first.nodes_swept, 0);

        for _ in 0..cycles {
            h.collector.run_cycle().unwrap();
            prop_assert_eq!(sorted(h.graph.all_nodes()), sorted(shadow.reachable()));
        }
    }
}
