//! Chunked content loading.
//!
//! A [`ChunkedLoader`] walks an item sequence in fixed-size slices. Each slice
//! is handed whole to a transform, and whatever the transform returns is
//! appended to the accumulated results in order. The loader drives its own
//! [`ProgressReporter`] with one tick per chunk:
//!
//! ```text
//! items = [a b c d e f g]   chunk_size = 3   → total = ceil(7 / 3) = 3 chunks
//!
//! process_next_chunk()   [a b c]   processed = t(abc)               1/3
//! process_next_chunk()   [d e f]   processed = t(abc) t(def)        2/3
//! process_next_chunk()   [g]       processed = t(abc) t(def) t(g)   3/3 complete
//! process_next_chunk()   (none)    no-op, returns processed
//! ```
//!
//! An empty sequence has zero chunks and completes on the first call.
//!
//! ## Transform Failures
//!
//! A failing transform is reported to the caller as [`LoaderError::Transform`].
//! The chunk counter has already moved past the failing slice at that point
//! while its output was never appended, so the accumulated results no longer
//! describe a prefix of the input. The loader is poisoned from then on: every
//! later call returns [`LoaderError::Poisoned`].

use crate::progress::{ProgressChannel, ProgressReporter};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Chunk size used when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 5;

/// Reporter description for loaders.
pub const LOADING_DESCRIPTION: &str = "Loading content";

/// Completion message for loaders.
pub const LOADING_COMPLETE_MESSAGE: &str = "Content loading complete";

/// Error type a transform may fail with.
pub type TransformError = Box<dyn std::error::Error + Send + Sync>;

/// A per-chunk transform: receives one whole slice, returns the items to append.
pub type Transform<'a, T, U> = Box<dyn FnMut(&[T]) -> Result<Vec<U>, TransformError> + Send + 'a>;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("transform failed on chunk {chunk}: {source}")]
    Transform {
        /// Zero-based index of the chunk whose transform failed.
        chunk: usize,
        #[source]
        source: TransformError,
    },
    #[error("loader is poisoned by an earlier transform failure")]
    Poisoned,
}

/// Labels a loader publishes on its progress channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderLabels {
    pub description: String,
    pub complete_message: String,
}

impl Default for LoaderLabels {
    fn default() -> Self {
        Self {
            description: LOADING_DESCRIPTION.to_string(),
            complete_message: LOADING_COMPLETE_MESSAGE.to_string(),
        }
    }
}

/// Number of chunks needed to cover `len` items. A zero chunk size is treated as 1.
pub fn chunk_count(len: usize, chunk_size: usize) -> usize {
    len.div_ceil(chunk_size.max(1))
}

/// Splits items into slices, transforms each slice, and accumulates the results.
pub struct ChunkedLoader<'a, T, U> {
    items: Vec<T>,
    chunk_size: usize,
    transform: Transform<'a, T, U>,
    current_chunk: usize,
    processed: Vec<U>,
    complete: bool,
    poisoned: bool,
    complete_message: String,
    progress: ProgressReporter,
}

impl<'a, T: Clone + Send + 'a> ChunkedLoader<'a, T, T> {
    /// A loader whose transform passes every slice through unchanged.
    pub fn identity(items: Vec<T>, chunk_size: usize, channel: &ProgressChannel) -> Self {
        Self::new(items, chunk_size, |chunk: &[T]| Ok(chunk.to_vec()), channel)
    }
}

impl<'a, T, U> ChunkedLoader<'a, T, U> {
    /// Create a loader with the default labels.
    ///
    /// A `chunk_size` of zero is raised to 1.
    pub fn new<F>(items: Vec<T>, chunk_size: usize, transform: F, channel: &ProgressChannel) -> Self
    where
        F: FnMut(&[T]) -> Result<Vec<U>, TransformError> + Send + 'a,
    {
        Self::with_labels(items, chunk_size, transform, channel, LoaderLabels::default())
    }

    pub fn with_labels<F>(
        items: Vec<T>,
        chunk_size: usize,
        transform: F,
        channel: &ProgressChannel,
        labels: LoaderLabels,
    ) -> Self
    where
        F: FnMut(&[T]) -> Result<Vec<U>, TransformError> + Send + 'a,
    {
        let chunk_size = chunk_size.max(1);
        let total = chunk_count(items.len(), chunk_size) as u64;
        let progress = ProgressReporter::new(total, labels.description, channel);
        Self {
            items,
            chunk_size,
            transform: Box::new(transform),
            current_chunk: 0,
            processed: Vec::new(),
            complete: false,
            poisoned: false,
            complete_message: labels.complete_message,
            progress,
        }
    }

    /// Process one chunk and return everything accumulated so far.
    ///
    /// Once complete this is a no-op returning the accumulated results.
    pub fn process_next_chunk(&mut self) -> Result<&[U], LoaderError> {
        if self.poisoned {
            warn!("process_next_chunk called on poisoned loader");
            return Err(LoaderError::Poisoned);
        }
        if self.complete {
            return Ok(&self.processed);
        }

        let start = self.current_chunk * self.chunk_size;
        let end = (start + self.chunk_size).min(self.items.len());

        if start >= self.items.len() {
            self.finish();
            return Ok(&self.processed);
        }

        let chunk = self.current_chunk;
        self.current_chunk += 1;
        let output = match (self.transform)(&self.items[start..end]) {
            Ok(output) => output,
            Err(source) => {
                warn!(chunk, error = %source, "chunk transform failed");
                self.poisoned = true;
                return Err(LoaderError::Transform { chunk, source });
            }
        };

        debug!(
            chunk,
            start,
            end,
            produced = output.len(),
            "processed chunk"
        );
        self.processed.extend(output);
        self.progress.update(Some(self.current_chunk as u64), 1);

        if end >= self.items.len() {
            self.finish();
        }
        Ok(&self.processed)
    }

    /// Process every remaining chunk without yielding.
    pub fn process_all(&mut self) -> Result<&[U], LoaderError> {
        while !self.complete {
            self.process_next_chunk()?;
        }
        Ok(&self.processed)
    }

    fn finish(&mut self) {
        self.complete = true;
        self.progress.complete(&self.complete_message);
        info!(
            chunks = self.current_chunk,
            items = self.processed.len(),
            "content loading complete"
        );
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Number of chunks consumed so far.
    pub fn current_chunk(&self) -> usize {
        self.current_chunk
    }

    /// Number of chunks the input splits into.
    pub fn total_chunks(&self) -> usize {
        chunk_count(self.items.len(), self.chunk_size)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn processed(&self) -> &[U] {
        &self.processed
    }

    /// Consume the loader, keeping only the accumulated results.
    pub fn into_processed(self) -> Vec<U> {
        self.processed
    }

    pub fn progress(&self) -> &ProgressReporter {
        &self.progress
    }
}

impl<T, U> std::fmt::Debug for ChunkedLoader<'_, T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedLoader")
            .field("items", &self.items.len())
            .field("chunk_size", &self.chunk_size)
            .field("current_chunk", &self.current_chunk)
            .field("processed", &self.processed.len())
            .field("complete", &self.complete)
            .field("poisoned", &self.poisoned)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{fail_on_chunk_containing, numbers};

    #[test]
    fn chunk_count_rounds_up() {
        assert_eq!(chunk_count(0, 5), 0);
        assert_eq!(chunk_count(5, 5), 1);
        assert_eq!(chunk_count(6, 5), 2);
        assert_eq!(chunk_count(7, 3), 3);
        assert_eq!(chunk_count(4, 0), 4);
    }

    #[test]
    fn process_all_identity_preserves_input() {
        let channel = ProgressChannel::new();
        let mut loader = ChunkedLoader::identity(numbers(12), 5, &channel);

        let result = loader.process_all().unwrap().to_vec();
        assert_eq!(result, numbers(12));
        assert_eq!(loader.current_chunk(), 3);
        assert!(loader.is_complete());
    }

    #[test]
    fn chunks_processed_equals_ceil() {
        for (n, k) in [(1, 1), (7, 3), (9, 3), (10, 4), (3, 10)] {
            let channel = ProgressChannel::new();
            let mut loader = ChunkedLoader::identity(numbers(n), k, &channel);
            loader.process_all().unwrap();
            assert_eq!(loader.current_chunk(), n.div_ceil(k), "n={n} k={k}");
            assert_eq!(loader.processed().len(), n);
        }
    }

    #[test]
    fn next_chunk_advances_one_slice() {
        let channel = ProgressChannel::new();
        let mut loader = ChunkedLoader::identity(numbers(7), 3, &channel);

        assert_eq!(loader.process_next_chunk().unwrap(), &[0, 1, 2]);
        assert_eq!(loader.process_next_chunk().unwrap(), &[0, 1, 2, 3, 4, 5]);
        assert!(!loader.is_complete());
        assert_eq!(
            loader.process_next_chunk().unwrap(),
            &[0, 1, 2, 3, 4, 5, 6]
        );
        assert!(loader.is_complete());
    }

    #[test]
    fn transform_receives_whole_chunk() {
        let channel = ProgressChannel::new();
        let mut loader = ChunkedLoader::new(
            numbers(5),
            2,
            |chunk: &[usize]| Ok(vec![chunk.iter().sum::<usize>()]),
            &channel,
        );

        assert_eq!(loader.process_all().unwrap(), &[1, 5, 4]);
    }

    #[test]
    fn transform_may_expand_output() {
        let channel = ProgressChannel::new();
        let mut loader = ChunkedLoader::new(
            vec!["a", "b", "c"],
            2,
            |chunk: &[&str]| {
                Ok(chunk
                    .iter()
                    .flat_map(|s| [s.to_uppercase(), s.to_string()])
                    .collect())
            },
            &channel,
        );

        assert_eq!(loader.process_all().unwrap(), &["A", "a", "B", "b", "C", "c"]);
    }

    #[test]
    fn calls_after_completion_are_noops() {
        let channel = ProgressChannel::new();
        let mut loader = ChunkedLoader::identity(numbers(4), 2, &channel);
        loader.process_all().unwrap();

        let before = channel.latest();
        assert_eq!(loader.process_next_chunk().unwrap(), &[0, 1, 2, 3]);
        assert_eq!(loader.current_chunk(), 2);
        assert_eq!(channel.latest(), before);
    }

    #[test]
    fn empty_input_completes_immediately() {
        let channel = ProgressChannel::new();
        let mut loader = ChunkedLoader::identity(Vec::<u8>::new(), 5, &channel);

        assert!(loader.process_next_chunk().unwrap().is_empty());
        assert!(loader.is_complete());
        assert_eq!(loader.current_chunk(), 0);

        let snap = channel.latest();
        assert_eq!(snap.total, 0);
        assert!(snap.is_complete);
        assert_eq!(snap.message, LOADING_COMPLETE_MESSAGE);
    }

    #[test]
    fn progress_tracks_chunks() {
        let channel = ProgressChannel::new();
        let mut loader = ChunkedLoader::identity(numbers(10), 5, &channel);

        let snap = channel.latest();
        assert_eq!(snap.total, 2);
        assert_eq!(snap.description, LOADING_DESCRIPTION);

        loader.process_next_chunk().unwrap();
        let snap = channel.latest();
        assert_eq!(snap.current, 1);
        assert_eq!(snap.percentage, 50);
        assert!(!snap.is_complete);

        loader.process_next_chunk().unwrap();
        let snap = channel.latest();
        assert_eq!(snap.current, 2);
        assert!(snap.is_complete);
        assert_eq!(snap.message, LOADING_COMPLETE_MESSAGE);
    }

    #[test]
    fn custom_labels_are_published() {
        let channel = ProgressChannel::new();
        let labels = LoaderLabels {
            description: "Fetching endorsements".to_string(),
            complete_message: "All endorsements ready".to_string(),
        };
        let mut loader =
            ChunkedLoader::with_labels(numbers(2), 5, |c: &[usize]| Ok(c.to_vec()), &channel, labels);

        assert_eq!(channel.latest().description, "Fetching endorsements");
        loader.process_all().unwrap();
        assert_eq!(channel.latest().message, "All endorsements ready");
    }

    #[test]
    fn zero_chunk_size_is_raised_to_one() {
        let channel = ProgressChannel::new();
        let mut loader = ChunkedLoader::identity(numbers(3), 0, &channel);

        assert_eq!(loader.chunk_size(), 1);
        assert_eq!(loader.total_chunks(), 3);
        assert_eq!(loader.process_all().unwrap(), &[0, 1, 2]);
    }

    #[test]
    fn transform_failure_propagates_and_poisons() {
        let channel = ProgressChannel::new();
        let mut loader = ChunkedLoader::new(numbers(6), 2, fail_on_chunk_containing(3), &channel);

        assert_eq!(loader.process_next_chunk().unwrap(), &[0, 1]);
        let err = loader.process_next_chunk().unwrap_err();
        assert!(matches!(err, LoaderError::Transform { chunk: 1, .. }));
        assert!(err.to_string().contains("chunk 1"));

        // Counter advanced, output not appended.
        assert_eq!(loader.current_chunk(), 2);
        assert_eq!(loader.processed(), &[0, 1]);
        assert!(loader.is_poisoned());

        assert!(matches!(loader.process_next_chunk(), Err(LoaderError::Poisoned)));
        assert!(matches!(loader.process_all(), Err(LoaderError::Poisoned)));
    }

    #[test]
    fn process_all_stops_at_failure() {
        let channel = ProgressChannel::new();
        let mut loader = ChunkedLoader::new(numbers(10), 3, fail_on_chunk_containing(7), &channel);

        let err = loader.process_all().unwrap_err();
        assert!(matches!(err, LoaderError::Transform { chunk: 2, .. }));
        assert!(!loader.is_complete());
        assert_eq!(loader.processed().len(), 6);
    }

    #[test]
    fn into_processed_returns_results() {
        let channel = ProgressChannel::new();
        let mut loader = ChunkedLoader::identity(numbers(3), 2, &channel);
        loader.process_all().unwrap();
        assert_eq!(loader.into_processed(), vec![0, 1, 2]);
    }
}
