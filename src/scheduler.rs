// File: ./src/scheduler.rs
//! Deferred tasks.
//!
//! The controller never sleeps. It asks a [`Scheduler`] to deliver a [`Deferred`]
//! task later, and whoever owns the UI loop runs it once it arrives. Scheduled tasks
//! cannot be cancelled.
use std::sync::Mutex;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Clear the "new entry just created" marker, revealing the empty new-entry row.
    ResetNewEntryMarker,
    /// Move focus to the name field of the new-entry row.
    FocusNewEntry,
}

pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Deferred);
}

/// Delivers tasks over a channel after sleeping on the tokio runtime.
/// Must be used from within a runtime.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    tx: mpsc::Sender<Deferred>,
}

impl TokioScheduler {
    pub fn new(tx: mpsc::Sender<Deferred>) -> Self {
        Self { tx }
    }

    /// Creates a scheduler together with the receiving end for the UI loop.
    pub fn channel() -> (Self, mpsc::Receiver<Deferred>) {
        let (tx, rx) = mpsc::channel(10);
        (Self::new(tx), rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Deferred) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            // Receiver gone means the UI is shutting down.
            let _ = tx.send(task).await;
        });
    }
}

/// Keeps scheduled tasks in memory so callers can run them by hand.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    scheduled: Mutex<Vec<(Duration, Deferred)>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains everything scheduled so far, oldest first.
    pub fn take(&self) -> Vec<(Duration, Deferred)> {
        match self.scheduled.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Scheduler for RecordingScheduler {
    fn schedule(&self, delay: Duration, task: Deferred) {
        match self.scheduled.lock() {
            Ok(mut guard) => guard.push((delay, task)),
            Err(poisoned) => poisoned.into_inner().push((delay, task)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_delivers_in_delay_order() {
        let (scheduler, mut rx) = TokioScheduler::channel();
        scheduler.schedule(Duration::from_millis(150), Deferred::FocusNewEntry);
        scheduler.schedule(Duration::from_millis(50), Deferred::ResetNewEntryMarker);

        assert_eq!(rx.recv().await, Some(Deferred::ResetNewEntryMarker));
        assert_eq!(rx.recv().await, Some(Deferred::FocusNewEntry));
    }

    #[test]
    fn recording_scheduler_drains() {
        let scheduler = RecordingScheduler::new();
        scheduler.schedule(Duration::from_millis(50), Deferred::ResetNewEntryMarker);
        assert_eq!(
            scheduler.take(),
            vec![(Duration::from_millis(50), Deferred::ResetNewEntryMarker)]
        );
        assert!(scheduler.take().is_empty());
    }
}
