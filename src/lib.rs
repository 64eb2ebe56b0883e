//! # pdfsplit
//!
//! Split a multi-page PDF into single-page PDFs named after the person each
//! page belongs to.
//!
//! Each page's text is handed to a name resolution [`Strategy`]. Pages with a
//! name become standalone documents called `<name>.pdf`; pages without one
//! are reported as warnings. The documents can be written to a directory or
//! packed into a zip archive.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsplit::{split_file, output, Strategy};
//!
//! fn main() -> pdfsplit::Result<()> {
//!     let report = split_file("holerites.pdf", Strategy::AnchoredHeuristic)?;
//!
//!     output::write_artifacts("clt", &report.artifacts)?;
//!     for warning in &report.warnings {
//!         eprintln!("{}", warning);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two strategies**: a labeled field (`NOME COMPLETO`) or a name placed
//!   above a six-digit occupation code
//! - **Failure isolation**: one bad page never stops the run
//! - **Unique filenames**: duplicates get `_2`, `_3`, ... in page order
//! - **Parallel processing**: pages are split on a Rayon worker pool
//! - **Reproducible archives**: same input, same zip bytes

pub mod archive;
pub mod detect;
pub mod document;
pub mod error;
pub mod output;
pub mod resolve;
pub mod sanitize;
pub mod split;

// Re-export commonly used types
pub use archive::{build_archive, ArchiveBuilder};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf_bytes, PdfFormat};
pub use document::{extract_page, PageSource, PageView, SourceDocument};
pub use error::{Error, Result};
pub use output::{deliver, Delivered, Destination};
pub use resolve::{AnchoredHeuristicStrategy, LabeledFieldStrategy, NameResolver, Strategy};
pub use sanitize::{sanitize_filename, UniqueNames};
pub use split::{
    CancelToken, ExtractionResult, OutputArtifact, PageWarning, ProgressEvent, RunReport,
    SplitOptions, Splitter, WarningReason,
};

use std::io::Read;
use std::path::Path;

/// Split a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use pdfsplit::{split_file, Strategy};
///
/// let report = split_file("fichas.pdf", Strategy::LabeledField).unwrap();
/// println!("{} documents", report.artifact_count());
/// ```
pub fn split_file<P: AsRef<Path>>(path: P, strategy: Strategy) -> Result<RunReport> {
    Splitter::new(strategy).run_file(path)
}

/// Split a PDF held in memory with default options.
pub fn split_bytes(data: &[u8], strategy: Strategy) -> Result<RunReport> {
    Splitter::new(strategy).run_bytes(data)
}

/// Split a PDF read from a reader with default options.
pub fn split_reader<R: Read>(reader: R, strategy: Strategy) -> Result<RunReport> {
    let doc = SourceDocument::from_reader(reader)?;
    Ok(Splitter::new(strategy).run(&doc))
}

/// Split a PDF and package the documents into an in-memory zip.
///
/// Only a document that cannot be loaded fails the call. If packaging fails,
/// the report is still returned with its artifacts next to the archive error.
///
/// # Example
///
/// ```no_run
/// use pdfsplit::{split_to_archive, Strategy};
///
/// let data = std::fs::read("fichas.pdf")?;
/// let (report, archive) = split_to_archive(&data, Strategy::LabeledField)?;
/// match archive {
///     Ok(zip) => std::fs::write("fichas.zip", zip)?,
///     Err(e) => eprintln!("{} documents split, archive failed: {}", report.artifact_count(), e),
/// }
/// # Ok::<(), pdfsplit::Error>(())
/// ```
pub fn split_to_archive(
    data: &[u8],
    strategy: Strategy,
) -> Result<(RunReport, Result<Vec<u8>>)> {
    let report = split_bytes(data, strategy)?;
    Ok(archive_report(report))
}

fn archive_report(report: RunReport) -> (RunReport, Result<Vec<u8>>) {
    let archive = build_archive(&report.artifacts);
    if let Err(ref e) = archive {
        log::warn!("Archive step failed, keeping {} documents: {}", report.artifact_count(), e);
    }
    (report, archive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bytes_empty_data() {
        let result = split_bytes(&[], Strategy::LabeledField);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_split_bytes_unknown_magic() {
        let data = [0xFF, 0xFE, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        assert!(split_bytes(&data, Strategy::AnchoredHeuristic).is_err());
    }

    #[test]
    fn test_split_reader_invalid() {
        let result = split_reader(&b"<html></html>"[..], Strategy::LabeledField);
        assert!(result.is_err());
    }

    #[test]
    fn test_split_to_archive_invalid() {
        assert!(split_to_archive(b"%PDF", Strategy::LabeledField).is_err());
    }

    #[test]
    fn test_archive_failure_keeps_report() {
        let mut report = RunReport::new(Strategy::LabeledField, 2);
        for page_index in 0..2 {
            report.artifacts.push(OutputArtifact {
                page_index,
                filename: "ANA.pdf".to_string(),
                content: b"%PDF-1.5".to_vec(),
            });
        }

        let (report, archive) = archive_report(report);
        assert!(matches!(archive, Err(Error::ArchiveBuild(_))));
        assert_eq!(report.artifact_count(), 2);
        assert_eq!(report.artifacts[1].content, b"%PDF-1.5");
    }
}
