//! Bounded record queue between the producer and the worker pool.

use crossbeam_channel::{Receiver, Sender};
use sf_types::Record;
use tracing::trace;

/// Consumer end of the record queue. Cloned once per worker.
pub type RecordReceiver = Receiver<Record>;

/// Create a queue holding at most `capacity` records.
///
/// Pushing blocks while the queue is full. Receivers block while it is
/// empty and return once the producer has been dropped and every queued
/// record has been taken.
pub fn bounded(capacity: usize) -> (QueueProducer, RecordReceiver) {
    let (sender, receiver) = crossbeam_channel::bounded(capacity);
    (QueueProducer { sender, pushed: 0 }, receiver)
}

/// Producer end of the record queue.
///
/// Dropping it (or calling [`close`](Self::close)) is the only end-of-stream
/// signal the workers get.
#[derive(Debug)]
pub struct QueueProducer {
    sender: Sender<Record>,
    pushed: u64,
}

impl QueueProducer {
    /// Push a record, blocking while the queue is full.
    ///
    /// Returns the record back if every receiver has been dropped.
    pub fn push(&mut self, record: Record) -> Result<(), Record> {
        self.sender.send(record).map_err(|e| e.into_inner())?;
        self.pushed += 1;
        trace!(pushed = self.pushed, queued = self.sender.len(), "Queued record");
        Ok(())
    }

    /// Number of records pushed so far.
    pub fn pushed(&self) -> u64 {
        self.pushed
    }

    /// Close the queue, returning how many records went through it.
    pub fn close(self) -> u64 {
        self.pushed
    }
}
