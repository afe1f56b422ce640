//! Shared test utilities for the site-content test suite.
//!
//! Provides input builders, transforms that fail on demand, and an observer
//! that records every callback so tests can assert on the exact sequence.

use crate::loader::TransformError;
use crate::orchestrate::{LoadObserver, LoadProgress, LoadUpdate};

// =========================================================================
// Inputs and transforms
// =========================================================================

/// `0..n` as a vector.
pub fn numbers(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Identity transform that fails on the chunk containing `poison`.
pub fn fail_on_chunk_containing(
    poison: usize,
) -> impl FnMut(&[usize]) -> Result<Vec<usize>, TransformError> + Send + 'static {
    move |chunk: &[usize]| {
        if chunk.contains(&poison) {
            Err(format!("cannot load item {poison}").into())
        } else {
            Ok(chunk.to_vec())
        }
    }
}

// =========================================================================
// Recording observer
// =========================================================================

/// One recorded observer callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded<U> {
    Progress { items: Vec<U>, progress: LoadProgress },
    Complete(Vec<U>),
}

/// Observer that keeps a copy of every callback it receives.
#[derive(Debug)]
pub struct Recorder<U> {
    pub events: Vec<Recorded<U>>,
}

impl<U> Default for Recorder<U> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<U: Clone> Recorder<U> {
    /// Progress payloads only, in order.
    pub fn progress(&self) -> Vec<LoadProgress> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Recorded::Progress { progress, .. } => Some(*progress),
                Recorded::Complete(_) => None,
            })
            .collect()
    }

    /// Items passed to `on_complete`, if it was called.
    pub fn completed(&self) -> Option<&[U]> {
        self.events.iter().find_map(|e| match e {
            Recorded::Complete(items) => Some(items.as_slice()),
            Recorded::Progress { .. } => None,
        })
    }
}

impl<U: Clone> LoadObserver<U> for Recorder<U> {
    fn on_progress(&mut self, update: LoadUpdate<'_, U>) {
        self.events.push(Recorded::Progress {
            items: update.items.to_vec(),
            progress: update.progress,
        });
    }

    fn on_complete(&mut self, items: &[U]) {
        self.events.push(Recorded::Complete(items.to_vec()));
    }
}
