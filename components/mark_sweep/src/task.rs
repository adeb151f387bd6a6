//! Incremental tasks and the queue that steps them.
//!
//! A task's step does a bounded amount of work and hands back the tasks that
//! continue it. No coroutine is involved: a driver pops tasks, steps them and
//! queues whatever they return until nothing is left.

use std::collections::VecDeque;
use std::fmt;

use core_types::GcResult;

/// Boxed task, as queued by drivers.
pub type BoxedTask = Box<dyn IncrementalTask>;

/// A unit of boundable collector work.
pub trait IncrementalTask: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Performs one bounded step of work.
    ///
    /// Returns the follow-up tasks; an empty vector means this task's
    /// contribution to its stage is exhausted.
    fn step(self: Box<Self>) -> GcResult<Vec<BoxedTask>>;
}

impl fmt::Debug for dyn IncrementalTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IncrementalTask {{ {} }}", self.name())
    }
}

/// Steps a set of tasks, one round at a time.
///
/// Each round steps every queued task once and queues the follow-ups. The
/// queue is exhausted when a round leaves no follow-ups.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: VecDeque<BoxedTask>,
    rounds: usize,
}

impl TaskQueue {
    /// Creates a queue holding `tasks`.
    pub fn new(tasks: impl IntoIterator<Item = BoxedTask>) -> Self {
        TaskQueue {
            tasks: tasks.into_iter().collect(),
            rounds: 0,
        }
    }

    /// Adds a task to the end of the queue.
    pub fn push(&mut self, task: BoxedTask) {
        self.tasks.push_back(task);
    }

    /// Steps every queued task once.
    ///
    /// Returns the number of tasks queued afterwards. A failing task aborts
    /// the round; tasks not yet stepped in it are dropped.
    pub fn step(&mut self) -> GcResult<usize> {
        let current = std::mem::take(&mut self.tasks);
        for task in current {
            let follow_ups = task.step()?;
            self.tasks.extend(follow_ups);
        }
        self.rounds += 1;
        Ok(self.tasks.len())
    }

    /// Steps `count` rounds, stopping early once exhausted.
    pub fn step_many(&mut self, count: usize) -> GcResult<usize> {
        for _ in 0..count {
            if self.is_empty() {
                break;
            }
            self.step()?;
        }
        Ok(self.tasks.len())
    }

    /// Steps until no tasks remain, returning the number of rounds taken.
    pub fn run_to_exhaustion(&mut self) -> GcResult<usize> {
        let start = self.rounds;
        while !self.is_empty() {
            self.step()?;
        }
        Ok(self.rounds - start)
    }

    /// Returns true when no tasks remain.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of queued tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Number of rounds stepped so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}
