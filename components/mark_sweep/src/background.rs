//! Background collection thread.
//!
//! [`BackgroundCollector`] steps a [`Collector`]'s stages on a dedicated
//! thread, one step at a time with a configurable pause in between, so
//! mutator threads keep running while cycles complete behind them.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use core_types::{GcError, GcResult, NodeId};
use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use object_graph::Graph;
use parking_lot::Mutex;

use crate::collector::Collector;
use crate::task::TaskQueue;

/// Messages to the collector thread.
#[derive(Debug)]
enum Command {
    Stop,
}

/// Runs collection cycles on a background thread until stopped.
pub struct BackgroundCollector {
    sender: Option<Sender<Command>>,
    handle: Option<JoinHandle<()>>,
    cycles_completed: Arc<AtomicUsize>,
    last_error: Arc<Mutex<Option<GcError>>>,
}

impl BackgroundCollector {
    /// Spawns the `gc-collector` thread driving `collector`.
    ///
    /// The thread runs cycles back to back until [`stop`](Self::stop) is
    /// called or a step fails; the error is kept in [`last_error`](Self::last_error).
    pub fn start<T, G>(collector: Arc<Collector<T, G>>) -> io::Result<Self>
    where
        T: NodeId,
        G: Graph<T> + 'static,
    {
        let (sender, receiver) = channel::unbounded();
        let cycles_completed = Arc::new(AtomicUsize::new(0));
        let last_error = Arc::new(Mutex::new(None));

        let worker = Worker {
            collector,
            receiver,
            cycles_completed: Arc::clone(&cycles_completed),
            last_error: Arc::clone(&last_error),
        };
        let handle = thread::Builder::new()
            .name("gc-collector".into())
            .spawn(move || worker.run())?;

        Ok(BackgroundCollector {
            sender: Some(sender),
            handle: Some(handle),
            cycles_completed,
            last_error,
        })
    }

    /// Stops the thread and waits for it to exit.
    ///
    /// The thread finishes its current step first; a partially run cycle is
    /// abandoned.
    pub fn stop(&mut self) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(Command::Stop);
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("gc-collector thread panicked");
            }
        }
    }

    /// Returns true while the thread is running.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of cycles completed by the thread.
    pub fn cycles_completed(&self) -> usize {
        self.cycles_completed.load(Ordering::Acquire)
    }

    /// The error that stopped the thread, if any.
    pub fn last_error(&self) -> Option<GcError> {
        self.last_error.lock().clone()
    }
}

impl Drop for BackgroundCollector {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Worker<T: NodeId, G: Graph<T> + 'static> {
    collector: Arc<Collector<T, G>>,
    receiver: Receiver<Command>,
    cycles_completed: Arc<AtomicUsize>,
    last_error: Arc<Mutex<Option<GcError>>>,
}

impl<T: NodeId, G: Graph<T> + 'static> Worker<T, G> {
    fn run(self) {
        let pause = self.collector.config().step_pause;
        tracing::debug!(?pause, "gc-collector thread started");
        loop {
            match self.run_cycle(pause) {
                Ok(true) => {
                    self.cycles_completed.fetch_add(1, Ordering::AcqRel);
                }
                Ok(false) => break,
                Err(err) => {
                    tracing::error!(error = %err, "background collection failed");
                    *self.last_error.lock() = Some(err);
                    break;
                }
            }
        }
        tracing::debug!("gc-collector thread stopped");
    }

    /// Runs one cycle step by step. Returns false if stopped part way.
    fn run_cycle(&self, pause: Duration) -> GcResult<bool> {
        for stage in self.collector.stages_to_execute() {
            let mut queue = TaskQueue::new([stage]);
            while !queue.is_empty() {
                if self.should_stop(pause) {
                    return Ok(false);
                }
                queue.step()?;
            }
        }
        Ok(true)
    }

    /// Waits out `pause`, returning true if a stop was requested.
    fn should_stop(&self, pause: Duration) -> bool {
        if pause.is_zero() {
            return match self.receiver.try_recv() {
                Ok(Command::Stop) | Err(TryRecvError::Disconnected) => true,
                Err(TryRecvError::Empty) => false,
            };
        }
        match self.receiver.recv_timeout(pause) {
            Ok(Command::Stop) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}
