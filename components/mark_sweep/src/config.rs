//! Collector configuration.

use std::time::Duration;

use core_types::{GcError, GcResult};

/// Configuration for incremental collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Maximum nodes a single task step may process (must be non-zero)
    pub max_nodes_per_task: usize,
    /// Pause between steps when driven by a [`BackgroundCollector`](crate::BackgroundCollector)
    pub step_pause: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        CollectorConfig {
            max_nodes_per_task: 64,
            step_pause: Duration::ZERO,
        }
    }
}

impl CollectorConfig {
    /// Sets the per-step node quota.
    pub fn with_max_nodes_per_task(mut self, max_nodes_per_task: usize) -> Self {
        self.max_nodes_per_task = max_nodes_per_task;
        self
    }

    /// Sets the pause between background steps.
    pub fn with_step_pause(mut self, step_pause: Duration) -> Self {
        self.step_pause = step_pause;
        self
    }

    /// Rejects configurations under which a task could never make progress.
    pub fn validate(&self) -> GcResult<()> {
        if self.max_nodes_per_task == 0 {
            return Err(GcError::InvalidConfig(
                "max_nodes_per_task must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
