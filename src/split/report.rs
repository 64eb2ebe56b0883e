//! Run outcome types.

use serde::Serialize;

use crate::error::Result;
use crate::resolve::Strategy;

/// One produced single-page document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputArtifact {
    /// Zero-based index of the source page
    pub page_index: usize,
    /// Unique, sanitized filename including the extension
    pub filename: String,
    /// The standalone one-page document
    #[serde(skip)]
    pub content: Vec<u8>,
}

impl OutputArtifact {
    /// Size of the document in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the document is empty. Never true for artifacts built by a run.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Why a page produced no artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum WarningReason {
    /// The strategy found no name in the page text
    NameNotFound,
    /// The page text could not be read
    TextExtraction(String),
    /// A name was found but the page could not be split out
    PageExtraction(String),
}

impl std::fmt::Display for WarningReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningReason::NameNotFound => f.write_str("name not found"),
            WarningReason::TextExtraction(detail) => {
                write!(f, "text extraction failed: {}", detail)
            }
            WarningReason::PageExtraction(detail) => {
                write!(f, "page extraction failed: {}", detail)
            }
        }
    }
}

/// A page that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWarning {
    /// Zero-based page index
    pub page_index: usize,
    /// Why the page was skipped
    pub reason: WarningReason,
}

impl std::fmt::Display for PageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {}: {}", self.page_index + 1, self.reason)
    }
}

/// Name resolution outcome for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Zero-based page index
    pub page_index: usize,
    /// The resolved name, present only if the page produced an artifact
    pub resolved_name: Option<String>,
    /// Strategy that produced the result
    pub strategy: Strategy,
}

/// Complete outcome of one run.
///
/// Every processed page appears exactly once, either in `artifacts` or in
/// `warnings`, and both lists are ordered by page index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Strategy used for the run
    pub strategy: Strategy,
    /// Pages in the source document
    pub page_count: usize,
    /// Per-page resolution results, in page order
    pub pages: Vec<ExtractionResult>,
    /// Produced documents, in page order
    pub artifacts: Vec<OutputArtifact>,
    /// Skipped pages, in page order
    pub warnings: Vec<PageWarning>,
    /// Whether the run stopped before every page was processed
    pub cancelled: bool,
}

impl RunReport {
    /// Create an empty report for a document.
    pub fn new(strategy: Strategy, page_count: usize) -> Self {
        Self {
            strategy,
            page_count,
            ..Default::default()
        }
    }

    /// Number of pages that went through the pipeline.
    pub fn pages_processed(&self) -> usize {
        self.pages.len()
    }

    /// Number of produced documents.
    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether every page produced a document.
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.warnings.is_empty() && self.artifacts.len() == self.page_count
    }

    /// Filenames of the produced documents, in page order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.artifacts.iter().map(|a| a.filename.as_str())
    }

    /// Serialize the report (without document bytes) as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        Ok(json?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let warning = PageWarning {
            page_index: 2,
            reason: WarningReason::NameNotFound,
        };
        assert_eq!(warning.to_string(), "page 3: name not found");
        assert_eq!(
            WarningReason::PageExtraction("bad xref".into()).to_string(),
            "page extraction failed: bad xref"
        );
    }

    #[test]
    fn test_report_counts() {
        let mut report = RunReport::new(Strategy::LabeledField, 2);
        assert!(!report.is_complete());

        report.artifacts.push(OutputArtifact {
            page_index: 0,
            filename: "ANA.pdf".into(),
            content: b"%PDF-1.5".to_vec(),
        });
        report.warnings.push(PageWarning {
            page_index: 1,
            reason: WarningReason::NameNotFound,
        });

        assert_eq!(report.artifact_count(), 1);
        assert_eq!(report.filenames().collect::<Vec<_>>(), vec!["ANA.pdf"]);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_report_json_omits_content() {
        let mut report = RunReport::new(Strategy::AnchoredHeuristic, 1);
        report.artifacts.push(OutputArtifact {
            page_index: 0,
            filename: "ANA.pdf".into(),
            content: vec![1, 2, 3],
        });
        report.warnings.push(PageWarning {
            page_index: 0,
            reason: WarningReason::TextExtraction("no font".into()),
        });

        let json = report.to_json(false).unwrap();
        assert!(json.contains("\"filename\":\"ANA.pdf\""));
        assert!(json.contains("\"strategy\":\"anchored_heuristic\""));
        assert!(json.contains("\"kind\":\"text_extraction\""));
        assert!(!json.contains("content"));
    }

    #[test]
    fn test_empty_report_is_complete() {
        let report = RunReport::new(Strategy::LabeledField, 0);
        assert!(report.is_complete());
        assert_eq!(report.pages_processed(), 0);
    }
}
