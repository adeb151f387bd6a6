//! Collection statistics.

/// Cumulative statistics for the collector's stages.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollectorStats {
    /// Number of completed cycles (sweep exhausted)
    pub cycles_completed: usize,
    /// Task steps executed across all stages
    pub steps: usize,
    /// Root targets shaded white to gray by root marking
    pub roots_shaded: usize,
    /// Allocate-black nodes rescanned by root marking
    pub allocations_rescanned: usize,
    /// Gray nodes scanned black by tracing
    pub nodes_scanned: usize,
    /// White nodes shaded gray while scanning
    pub targets_shaded: usize,
    /// White nodes deleted by sweep
    pub nodes_swept: usize,
    /// Black nodes reset to white by sweep
    pub nodes_reset: usize,
}

/// Statistics for the write barrier.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BarrierStats {
    /// Node creations observed
    pub nodes_created: usize,
    /// Edge creations observed
    pub edges_created: usize,
    /// Edge creations whose white target was shaded gray
    pub targets_shaded: usize,
    /// Edge removals observed
    pub edges_removed: usize,
    /// Node deletions observed
    pub nodes_deleted: usize,
}

/// Outcome of one full cycle run by [`Collector::run_cycle`](crate::Collector::run_cycle).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Steps taken by the root marking stage
    pub root_marking_steps: usize,
    /// Steps taken by the tracing stage
    pub tracing_steps: usize,
    /// Steps taken by the sweep stage
    pub sweep_steps: usize,
    /// Nodes scanned black during this cycle
    pub nodes_scanned: usize,
    /// Nodes deleted during this cycle
    pub nodes_swept: usize,
    /// Nodes reset to white during this cycle
    pub nodes_reset: usize,
}

impl CycleReport {
    /// Total steps across the three stages.
    pub fn total_steps(&self) -> usize {
        self.root_marking_steps + self.tracing_steps + self.sweep_steps
    }
}
