//! Mark Sweep - Incremental concurrent tri-color garbage collector
//!
//! This component provides:
//! - Per-node color state over pluggable node sets
//! - A write barrier that keeps marking sound under concurrent mutation
//! - Bounded incremental tasks for root marking, tracing and sweep
//! - A [`Collector`] handing those stages to an external scheduler
//! - A [`BackgroundCollector`] running cycles on a dedicated thread
//!
//! Nodes are allocated black. Any edge creation shades a white target gray.
//! Edge removal never changes a color, so a node unlinked mid-cycle may
//! survive as floating garbage until the next cycle.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod background;
pub mod barrier;
pub mod collector;
pub mod color;
pub mod config;
pub mod node_set;
pub mod stages;
pub mod stats;
pub mod task;

pub use background::BackgroundCollector;
pub use barrier::WriteBarrier;
pub use collector::{Collector, CollectorStages};
pub use color::ColorState;
pub use config::CollectorConfig;
pub use node_set::{FifoNodeSetFactory, HashNodeSetFactory, NodeSet, NodeSetFactory};
pub use stages::GcStage;
pub use stats::{BarrierStats, CollectorStats, CycleReport};
pub use task::{BoxedTask, IncrementalTask, TaskQueue};
