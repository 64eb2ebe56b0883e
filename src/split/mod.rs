//! Page segmentation pipeline.
//!
//! For every page: read its text, resolve a name, sanitize it, split the
//! page out into its own document. Pages are independent; a failure on one
//! page is recorded as a warning and never affects the others.
//!
//! # Example
//!
//! ```no_run
//! use pdfsplit::{Splitter, Strategy};
//!
//! let data = std::fs::read("folha.pdf")?;
//! let report = Splitter::new(Strategy::AnchoredHeuristic).run_bytes(&data)?;
//! for warning in &report.warnings {
//!     eprintln!("{}", warning);
//! }
//! # Ok::<(), pdfsplit::Error>(())
//! ```

mod options;
mod report;

pub use options::{CancelToken, ProgressEvent, SplitOptions, DEFAULT_EXTENSION};
pub use report::{ExtractionResult, OutputArtifact, PageWarning, RunReport, WarningReason};

use std::path::Path;

use rayon::prelude::*;

use crate::document::{PageSource, SourceDocument};
use crate::error::Result;
use crate::resolve::{NameResolver, Strategy};
use crate::sanitize::{sanitize_filename, UniqueNames};

/// Outcome of processing a single page, before names are made unique.
#[derive(Debug)]
enum PageOutcome {
    Resolved {
        name: String,
        stem: String,
        content: Vec<u8>,
    },
    Skipped(WarningReason),
}

/// Drives the split pipeline over a document.
pub struct Splitter {
    resolver: Box<dyn NameResolver>,
    options: SplitOptions,
}

impl Splitter {
    /// Create a splitter for a strategy with default options.
    pub fn new(strategy: Strategy) -> Self {
        Self::with_options(SplitOptions::new().with_strategy(strategy))
    }

    /// Create a splitter from options.
    pub fn with_options(options: SplitOptions) -> Self {
        Self {
            resolver: options.strategy.resolver(),
            options,
        }
    }

    /// Create a splitter around a custom-configured resolver.
    pub fn with_resolver(resolver: Box<dyn NameResolver>, options: SplitOptions) -> Self {
        let options = options.with_strategy(resolver.strategy());
        Self { resolver, options }
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Bound the worker pool size.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.options = self.options.with_threads(threads);
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.options = self.options.with_cancel_token(token);
        self
    }

    /// Attach a progress channel.
    pub fn with_progress(mut self, sender: crossbeam_channel::Sender<ProgressEvent>) -> Self {
        self.options = self.options.with_progress(sender);
        self
    }

    /// The active strategy.
    pub fn strategy(&self) -> Strategy {
        self.resolver.strategy()
    }

    /// The active options.
    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Load a PDF from bytes and split it.
    ///
    /// Fails only if the document itself cannot be loaded.
    pub fn run_bytes(&self, data: &[u8]) -> Result<RunReport> {
        let doc = SourceDocument::from_bytes(data)?;
        Ok(self.run(&doc))
    }

    /// Load a PDF file and split it.
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<RunReport> {
        let doc = SourceDocument::open(path)?;
        Ok(self.run(&doc))
    }

    /// Split every page of a loaded document.
    ///
    /// Page-level failures end up in [`RunReport::warnings`]; this never fails.
    pub fn run<S: PageSource + ?Sized>(&self, source: &S) -> RunReport {
        let page_count = source.page_count();
        log::debug!(
            "Splitting {} pages with {} strategy",
            page_count,
            self.strategy()
        );

        let outcomes = self.process_pages(source, page_count);
        let report = self.merge(outcomes, page_count);

        log::info!(
            "Split {} of {} pages: {} documents, {} warnings{}",
            report.pages_processed(),
            page_count,
            report.artifact_count(),
            report.warnings.len(),
            if report.cancelled { " (cancelled)" } else { "" }
        );
        report
    }

    fn process_pages<S: PageSource + ?Sized>(
        &self,
        source: &S,
        page_count: usize,
    ) -> Vec<Option<PageOutcome>> {
        if self.options.parallel && page_count > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.threads)
                .build();
            match pool {
                Ok(pool) => {
                    return pool.install(|| {
                        (0..page_count)
                            .into_par_iter()
                            .map(|index| self.process_page(source, index))
                            .collect()
                    });
                }
                Err(e) => {
                    log::warn!("Worker pool unavailable, running sequentially: {}", e);
                }
            }
        }

        (0..page_count)
            .map(|index| self.process_page(source, index))
            .collect()
    }

    /// Returns `None` if the run was cancelled before the page started.
    fn process_page<S: PageSource + ?Sized>(
        &self,
        source: &S,
        index: usize,
    ) -> Option<PageOutcome> {
        if self.options.is_cancelled() {
            return None;
        }

        let outcome = self.resolve_page(source, index);

        if let Some(ref sender) = self.options.progress {
            let event = ProgressEvent {
                page_index: index,
                resolved: matches!(outcome, PageOutcome::Resolved { .. }),
            };
            // The receiver may have gone away; progress is best effort.
            let _ = sender.send(event);
        }

        Some(outcome)
    }

    fn resolve_page<S: PageSource + ?Sized>(&self, source: &S, index: usize) -> PageOutcome {
        let page = match source.page(index) {
            Ok(page) => page,
            Err(e) => return PageOutcome::Skipped(WarningReason::TextExtraction(e.to_string())),
        };

        let name = match self.resolver.resolve(&page.text) {
            Some(name) => name,
            None => return PageOutcome::Skipped(WarningReason::NameNotFound),
        };

        let stem = sanitize_filename(&name);
        if stem.is_empty() {
            return PageOutcome::Skipped(WarningReason::NameNotFound);
        }

        match page.to_document() {
            Ok(content) => PageOutcome::Resolved {
                name,
                stem,
                content,
            },
            Err(e) => PageOutcome::Skipped(WarningReason::PageExtraction(e.to_string())),
        }
    }

    /// Fold per-page outcomes into a report, assigning unique filenames in
    /// page order.
    fn merge(&self, outcomes: Vec<Option<PageOutcome>>, page_count: usize) -> RunReport {
        let strategy = self.strategy();
        let mut report = RunReport::new(strategy, page_count);
        let mut names = UniqueNames::new();

        for (page_index, outcome) in outcomes.into_iter().enumerate() {
            let Some(outcome) = outcome else {
                report.cancelled = true;
                continue;
            };

            match outcome {
                PageOutcome::Resolved {
                    name,
                    stem,
                    content,
                } => {
                    let stem = names.claim(&stem);
                    let filename = format!("{}.{}", stem, self.options.extension);
                    log::debug!("Page {} -> {}", page_index + 1, filename);

                    report.pages.push(ExtractionResult {
                        page_index,
                        resolved_name: Some(name),
                        strategy,
                    });
                    report.artifacts.push(OutputArtifact {
                        page_index,
                        filename,
                        content,
                    });
                }
                PageOutcome::Skipped(reason) => {
                    log::warn!("Page {}: {}", page_index + 1, reason);

                    report.pages.push(ExtractionResult {
                        page_index,
                        resolved_name: None,
                        strategy,
                    });
                    report.warnings.push(PageWarning { page_index, reason });
                }
            }
        }

        report
    }
}

impl std::fmt::Debug for Splitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Splitter")
            .field("strategy", &self.strategy())
            .field("options", &self.options)
            .finish()
    }
}
