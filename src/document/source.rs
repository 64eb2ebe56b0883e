//! Source document loading and the page access abstraction.

use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};

use super::extract::extract_page;

/// Abstract interface for reading pages out of a document.
///
/// Implementations must be safe to read from several worker threads at once;
/// nothing in the pipeline mutates a source after it is loaded.
pub trait PageSource: Sync {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Plain text of the page at zero-based `index`.
    fn page_text(&self, index: usize) -> Result<String>;

    /// The page at zero-based `index` as a standalone one-page document.
    fn page_document(&self, index: usize) -> Result<Vec<u8>>;

    /// Text of a page bundled with the capability to materialize it.
    fn page(&self, index: usize) -> Result<PageView<'_, Self>> {
        let text = self.page_text(index)?;
        Ok(PageView {
            index,
            text,
            source: self,
        })
    }
}

/// One page of a source document: its text plus a handle to render it alone.
pub struct PageView<'a, S: ?Sized> {
    /// Zero-based page index
    pub index: usize,
    /// Extracted plain text
    pub text: String,
    source: &'a S,
}

impl<S: PageSource + ?Sized> PageView<'_, S> {
    /// Materialize this page as a standalone document.
    pub fn to_document(&self) -> Result<Vec<u8>> {
        self.source.page_document(self.index)
    }
}

impl<S: ?Sized> std::fmt::Debug for PageView<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageView")
            .field("index", &self.index)
            .field("text_len", &self.text.len())
            .finish()
    }
}

/// A PDF loaded into memory, backed by `lopdf`.
///
/// Immutable once loaded. Page extraction works on a private copy.
pub struct SourceDocument {
    doc: LopdfDocument,
    page_count: usize,
}

impl SourceDocument {
    /// Load a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;
        let data = std::fs::read(path)?;
        Self::load(&data)
    }

    /// Load a PDF from an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;
        Self::load(data)
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn load(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::DocumentLoad(e.to_string()),
        })?;

        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text extraction may return garbage");
        }

        let page_count = doc.get_pages().len();
        log::debug!(
            "Loaded PDF {} with {} pages",
            doc.version,
            page_count
        );

        Ok(Self { doc, page_count })
    }

    /// PDF version string from the header.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_number(&self, index: usize) -> Result<u32> {
        if index >= self.page_count {
            return Err(Error::PageOutOfRange(index, self.page_count));
        }
        Ok(index as u32 + 1)
    }
}

impl PageSource for SourceDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let page_num = self.page_number(index)?;
        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))
    }

    fn page_document(&self, index: usize) -> Result<Vec<u8>> {
        extract_page(&self.doc, index)
    }
}

impl std::fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDocument")
            .field("version", &self.doc.version)
            .field("page_count", &self.page_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_rejects_non_pdf() {
        let result = SourceDocument::from_bytes(b"definitely not a pdf");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_from_bytes_rejects_truncated_pdf() {
        let result = SourceDocument::from_bytes(b"%PDF-1.4\n1 0 obj\n<< /Type");
        assert!(matches!(result, Err(Error::DocumentLoad(_))));
    }

    #[test]
    fn test_from_reader_empty() {
        let result = SourceDocument::from_reader(std::io::empty());
        assert!(result.is_err());
    }
}
