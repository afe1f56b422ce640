//! Cooperative chunk-by-chunk loading.
//!
//! [`load_content_with_progress`] drives a [`ChunkedLoader`] to completion one
//! chunk per step, yielding to the async runtime between steps so that a host
//! event loop keeps running while a long sequence loads. After every chunk the
//! observer receives the results accumulated so far plus a progress fraction;
//! once the loader reports completion the observer receives the final results
//! and the driver returns them.
//!
//! ```text
//! step 1   chunk 1/3 → on_progress(items[..k],   1/3)   yield
//! step 2   chunk 2/3 → on_progress(items[..2k],  2/3)   yield
//! step 3   chunk 3/3 → on_progress(items[..],    3/3)   yield
//! step 4   complete  → on_complete(items[..])           return
//! ```
//!
//! ## Cancellation
//!
//! The driver is an ordinary future: dropping it stops loading at the next
//! yield point. [`spawn_load`] runs the driver as a runtime task and hands back
//! a [`LoadTask`] that cancels on [`LoadTask::cancel`] or when dropped.

use crate::loader::{ChunkedLoader, LoaderError, TransformError, chunk_count};
use crate::progress::{ProgressChannel, percentage};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::debug;

/// Chunk-level progress computed from the raw item and chunk counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadProgress {
    pub current: usize,
    pub total: usize,
    pub percentage: u8,
}

impl LoadProgress {
    pub fn new(current: usize, total: usize) -> Self {
        Self {
            current,
            total,
            percentage: percentage(current as u64, total as u64),
        }
    }
}

/// Payload of one progress callback.
#[derive(Debug)]
pub struct LoadUpdate<'a, U> {
    /// Everything accumulated so far.
    pub items: &'a [U],
    pub progress: LoadProgress,
}

/// Receives callbacks from [`load_content_with_progress`].
pub trait LoadObserver<U> {
    fn on_progress(&mut self, _update: LoadUpdate<'_, U>) {}

    fn on_complete(&mut self, _items: &[U]) {}
}

/// Ignores every callback.
impl<U> LoadObserver<U> for () {}

/// Adapts a pair of closures into a [`LoadObserver`].
pub struct FnObserver<P, C> {
    progress: P,
    complete: C,
}

impl<P, C> FnObserver<P, C> {
    pub fn new<U>(progress: P, complete: C) -> Self
    where
        P: FnMut(LoadUpdate<'_, U>),
        C: FnMut(&[U]),
    {
        Self { progress, complete }
    }
}

impl<U, P, C> LoadObserver<U> for FnObserver<P, C>
where
    P: FnMut(LoadUpdate<'_, U>),
    C: FnMut(&[U]),
{
    fn on_progress(&mut self, update: LoadUpdate<'_, U>) {
        (self.progress)(update);
    }

    fn on_complete(&mut self, items: &[U]) {
        (self.complete)(items);
    }
}

/// Drive `loader` to completion, yielding to the runtime after every chunk.
///
/// Transform failures end the load with the loader's error; `on_complete` is
/// not called in that case.
pub async fn load_content_with_progress<T, U, O>(
    mut loader: ChunkedLoader<'_, T, U>,
    observer: &mut O,
) -> Result<Vec<U>, LoaderError>
where
    O: LoadObserver<U> + ?Sized,
{
    let total = chunk_count(loader.item_count(), loader.chunk_size());
    loop {
        if loader.is_complete() {
            observer.on_complete(loader.processed());
            return Ok(loader.into_processed());
        }

        loader.process_next_chunk()?;
        let progress = LoadProgress::new(loader.current_chunk(), total);
        debug!(
            current = progress.current,
            total = progress.total,
            "load step"
        );
        observer.on_progress(LoadUpdate {
            items: loader.processed(),
            progress,
        });

        tokio::task::yield_now().await;
    }
}

/// Build a loader over `items` and drive it with [`load_content_with_progress`].
pub async fn load_items_with_progress<T, U, F, O>(
    items: Vec<T>,
    chunk_size: usize,
    transform: F,
    channel: &ProgressChannel,
    observer: &mut O,
) -> Result<Vec<U>, LoaderError>
where
    F: FnMut(&[T]) -> Result<Vec<U>, TransformError> + Send,
    O: LoadObserver<U> + ?Sized,
{
    let loader = ChunkedLoader::new(items, chunk_size, transform, channel);
    load_content_with_progress(loader, observer).await
}

#[derive(Error, Debug)]
pub enum LoadTaskError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("load task was cancelled")]
    Cancelled,
    #[error("load task panicked")]
    Panicked,
}

/// Handle to a load running as a runtime task. Dropping it cancels the load.
#[derive(Debug)]
pub struct LoadTask<U> {
    handle: Option<JoinHandle<Result<Vec<U>, LoaderError>>>,
}

/// Spawn [`load_content_with_progress`] onto the current tokio runtime.
///
/// Must be called from within a runtime.
pub fn spawn_load<T, U, O>(loader: ChunkedLoader<'static, T, U>, mut observer: O) -> LoadTask<U>
where
    T: Send + 'static,
    U: Send + 'static,
    O: LoadObserver<U> + Send + 'static,
{
    let handle =
        tokio::task::spawn(async move { load_content_with_progress(loader, &mut observer).await });
    LoadTask {
        handle: Some(handle),
    }
}

impl<U> LoadTask<U> {
    /// Stop the load at its next yield point.
    pub fn cancel(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the load to finish and return its results.
    pub async fn join(mut self) -> Result<Vec<U>, LoadTaskError> {
        let Some(handle) = self.handle.take() else {
            return Err(LoadTaskError::Cancelled);
        };
        match handle.await {
            Ok(result) => Ok(result?),
            Err(e) if e.is_cancelled() => Err(LoadTaskError::Cancelled),
            Err(_) => Err(LoadTaskError::Panicked),
        }
    }
}

impl<U> Drop for LoadTask<U> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
