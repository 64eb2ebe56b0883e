//! Run configuration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::resolve::Strategy;

/// Default extension of produced documents.
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Options for a split run.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Name resolution strategy
    pub strategy: Strategy,

    /// Whether to process pages on a worker pool
    pub parallel: bool,

    /// Worker count when parallel (0 = one per CPU)
    pub threads: usize,

    /// Extension appended to every output filename, without the dot
    pub extension: String,

    /// Cooperative cancellation, checked between pages
    pub cancel: Option<CancelToken>,

    /// Receives one event per finished page
    pub progress: Option<Sender<ProgressEvent>>,
}

impl SplitOptions {
    /// Create new split options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name resolution strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Bound the worker pool size.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the output extension (a leading dot is ignored).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Attach a progress channel.
    pub fn with_progress(mut self, sender: Sender<ProgressEvent>) -> Self {
        self.progress = Some(sender);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            parallel: true,
            threads: 0,
            extension: DEFAULT_EXTENSION.to_string(),
            cancel: None,
            progress: None,
        }
    }
}

/// Shared flag used to stop a run between pages.
///
/// A page that has already started is always finished.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Emitted after each page is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Zero-based page index
    pub page_index: usize,
    /// Whether the page produced an artifact
    pub resolved: bool,
}
