//! Progress reporting for long-running content operations.
//!
//! A [`ProgressReporter`] counts work done against a fixed total and publishes
//! a [`ProgressSnapshot`] after every change. Snapshots go to a
//! [`ProgressChannel`]: a single-slot observable that always holds the latest
//! snapshot. Subscribers see each publish as a wholesale replacement of the
//! previous one, never a partial update.
//!
//! ## One Channel Per Operation
//!
//! Every reporter publishes into the channel it was constructed with. Give each
//! long-running operation its own channel and they never interfere. Two
//! reporters sharing one channel still work, but the slot is last-writer-wins:
//! a subscriber only ever sees whichever reporter published most recently.
//!
//! ```text
//! ProgressReporter::new(4, "Loading", &channel)   → {current: 0, percentage: 0}
//! reporter.update(None, 1)                        → {current: 1, percentage: 25}
//! reporter.update(Some(3), 1)                     → {current: 3, percentage: 75}
//! reporter.complete("Done")                       → {current: 4, percentage: 100, is_complete, message: "Done"}
//! ```

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Description used when a reporter is not given one.
pub const DEFAULT_DESCRIPTION: &str = "Processing";

/// Message published by [`ProgressReporter::complete`] when none is supplied.
pub const DEFAULT_COMPLETE_MESSAGE: &str = "Complete";

/// The state of one long-running operation at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub total: u64,
    pub current: u64,
    pub description: String,
    /// `min(100, round(current / total * 100))`; 100 when `total` is zero.
    pub percentage: u8,
    pub is_complete: bool,
    /// Empty until the operation completes.
    pub message: String,
}

/// Integer percentage of `current` over `total`, rounded half-up and capped at 100.
///
/// A zero total has nothing left to do, so it counts as 100%.
pub fn percentage(current: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let scaled = (u128::from(current) * 200 + u128::from(total)) / (u128::from(total) * 2);
    scaled.min(100) as u8
}

/// Single-slot observable holding the latest [`ProgressSnapshot`].
///
/// Cloning the channel yields another handle to the same slot.
#[derive(Debug, Clone)]
pub struct ProgressChannel {
    slot: Arc<watch::Sender<ProgressSnapshot>>,
}

impl Default for ProgressChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressChannel {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ProgressSnapshot::default());
        Self { slot: Arc::new(tx) }
    }

    /// Subscribe to future publishes. The receiver starts at the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.slot.subscribe()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> ProgressSnapshot {
        self.slot.borrow().clone()
    }

    /// Replace the slot contents. Succeeds with or without subscribers.
    pub fn publish(&self, snapshot: ProgressSnapshot) {
        debug!(
            description = %snapshot.description,
            current = snapshot.current,
            total = snapshot.total,
            percentage = snapshot.percentage,
            complete = snapshot.is_complete,
            "progress"
        );
        self.slot.send_replace(snapshot);
    }

    /// Whether two handles share the same slot.
    pub fn same_channel(&self, other: &ProgressChannel) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

/// Counts progress against a fixed total and publishes every change.
#[derive(Debug)]
pub struct ProgressReporter {
    total: u64,
    current: u64,
    description: String,
    completed: bool,
    channel: ProgressChannel,
}

impl ProgressReporter {
    /// Create a reporter and publish its initial (zero) snapshot.
    pub fn new(total: u64, description: impl Into<String>, channel: &ProgressChannel) -> Self {
        let reporter = Self {
            total,
            current: 0,
            description: description.into(),
            completed: false,
            channel: channel.clone(),
        };
        reporter.channel.publish(ProgressSnapshot {
            total,
            current: 0,
            description: reporter.description.clone(),
            percentage: 0,
            is_complete: false,
            message: String::new(),
        });
        reporter
    }

    /// Set `current` to an explicit value, or advance it by `increment`, then publish.
    ///
    /// Reaching the total marks the reporter complete; it stays complete even if
    /// a later update moves `current` back down.
    pub fn update(&mut self, current: Option<u64>, increment: u64) {
        self.current = match current {
            Some(value) => value,
            None => self.current.saturating_add(increment),
        };
        if self.current >= self.total {
            self.completed = true;
        }
        self.channel.publish(self.snapshot(String::new()));
    }

    /// A reporter described as [`DEFAULT_DESCRIPTION`].
    pub fn with_default_description(total: u64, channel: &ProgressChannel) -> Self {
        Self::new(total, DEFAULT_DESCRIPTION, channel)
    }

    /// Advance by one.
    pub fn tick(&mut self) {
        self.update(None, 1);
    }

    /// Force `current` to the total and publish a complete snapshot carrying `message`.
    ///
    /// Idempotent apart from the message, which is reapplied on every call.
    pub fn complete(&mut self, message: &str) {
        self.current = self.total;
        self.completed = true;
        self.channel.publish(self.snapshot(message.to_string()));
    }

    /// [`complete`](Self::complete) with [`DEFAULT_COMPLETE_MESSAGE`].
    pub fn finish(&mut self) {
        self.complete(DEFAULT_COMPLETE_MESSAGE);
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn channel(&self) -> &ProgressChannel {
        &self.channel
    }

    fn snapshot(&self, message: String) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total,
            current: self.current,
            description: self.description.clone(),
            percentage: percentage(self.current, self.total),
            is_complete: self.completed,
            message,
        }
    }
}
