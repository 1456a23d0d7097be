//! Rendering of progress and final snapshots.
mod console;
mod events;

pub use console::ConsoleReporter;
pub use events::LogReporter;

use std::time::Duration;
use swarm_core::{RunConfig, Snapshot};

/// Receives snapshots from the control loop.
///
/// Called synchronously from the loop, so implementations should not block.
pub trait Reporter {
    fn start(&mut self, _config: &RunConfig) {}

    fn progress(&mut self, snapshot: &Snapshot);

    /// Called exactly once when the run finishes normally.
    fn finished(&mut self, snapshot: &Snapshot);

    /// Called instead of [`Reporter::finished`] when the run is stopped externally.
    fn interrupted(&mut self, elapsed: Duration);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn start(&mut self, config: &RunConfig) {
        (**self).start(config)
    }

    fn progress(&mut self, snapshot: &Snapshot) {
        (**self).progress(snapshot)
    }

    fn finished(&mut self, snapshot: &Snapshot) {
        (**self).finished(snapshot)
    }

    fn interrupted(&mut self, elapsed: Duration) {
        (**self).interrupted(elapsed)
    }
}

/// Keeps every snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub started: bool,
    pub progress: Vec<Snapshot>,
    pub finished: Option<Snapshot>,
    pub interrupted: Option<Duration>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for MemoryReporter {
    fn start(&mut self, _config: &RunConfig) {
        self.started = true;
    }

    fn progress(&mut self, snapshot: &Snapshot) {
        self.progress.push(snapshot.clone());
    }

    fn finished(&mut self, snapshot: &Snapshot) {
        self.finished = Some(snapshot.clone());
    }

    fn interrupted(&mut self, elapsed: Duration) {
        self.interrupted = Some(elapsed);
    }
}
