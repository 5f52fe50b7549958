//! Deferred content commits.
//!
//! The host environment orders the final content swap after the current
//! synchronous pass via a zero-delay task. This queue is the equivalent:
//! upgrades build resolved content eagerly, enqueue the swap, and the
//! driver drains the queue once the pass completes (build then swap).

use std::collections::VecDeque;
use std::fmt;

use graft_core::Document;

type Task = Box<dyn FnOnce(&mut Document)>;

/// FIFO of deferred document edits.
#[derive(Default)]
pub struct CommitQueue {
    tasks: VecDeque<Task>,
}

impl CommitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a continuation to run after the current synchronous pass.
    pub fn defer(&mut self, task: impl FnOnce(&mut Document) + 'static) {
        self.tasks.push_back(Box::new(task));
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Drain the queue in FIFO order, applying each edit to `doc`.
    pub fn run_until_idle(&mut self, doc: &mut Document) {
        while let Some(task) = self.tasks.pop_front() {
            task(doc);
        }
    }
}

impl fmt::Debug for CommitQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitQueue")
            .field("pending", &self.tasks.len())
            .finish()
    }
}
