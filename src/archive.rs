//! Zip packaging of produced documents.
//!
//! Archives are reproducible: entries keep the order they are added in and
//! carry a fixed timestamp, so the same artifacts always give the same bytes.

use std::io::{Cursor, Seek, Write};

use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};

use crate::error::{Error, Result};
use crate::split::OutputArtifact;

/// Builder for a zip archive of named byte blobs.
///
/// # Example
///
/// ```
/// use pdfsplit::archive::ArchiveBuilder;
///
/// let mut builder = ArchiveBuilder::new();
/// builder.add("ANA.pdf", b"%PDF-1.5 ...")?;
/// let bytes = builder.finish()?.into_inner();
/// assert!(bytes.starts_with(b"PK"));
/// # Ok::<(), pdfsplit::Error>(())
/// ```
pub struct ArchiveBuilder<W: Write + Seek> {
    zip: ZipWriter<W>,
    entries: usize,
}

impl ArchiveBuilder<Cursor<Vec<u8>>> {
    /// Create a builder that writes to memory.
    pub fn new() -> Self {
        Self::with_writer(Cursor::new(Vec::new()))
    }
}

impl Default for ArchiveBuilder<Cursor<Vec<u8>>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Seek> ArchiveBuilder<W> {
    /// Create a builder over any seekable writer.
    pub fn with_writer(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            entries: 0,
        }
    }

    /// Append an entry.
    pub fn add(&mut self, name: &str, content: &[u8]) -> Result<()> {
        self.zip
            .start_file(name, entry_options())
            .map_err(|e| Error::ArchiveBuild(format!("{}: {}", name, e)))?;
        self.zip
            .write_all(content)
            .map_err(|e| Error::ArchiveBuild(format!("{}: {}", name, e)))?;
        self.entries += 1;
        Ok(())
    }

    /// Append a produced document under its filename.
    pub fn add_artifact(&mut self, artifact: &OutputArtifact) -> Result<()> {
        self.add(&artifact.filename, &artifact.content)
    }

    /// Number of entries added so far.
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Whether no entry has been added.
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Write the central directory and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        Ok(self.zip.finish()?)
    }
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
}

/// Package artifacts into an in-memory zip, in the order given.
///
/// An empty slice yields a valid archive with no entries.
pub fn build_archive(artifacts: &[OutputArtifact]) -> Result<Vec<u8>> {
    let mut builder = ArchiveBuilder::new();
    for artifact in artifacts {
        builder.add_artifact(artifact)?;
    }
    log::debug!("Archived {} documents", builder.len());
    Ok(builder.finish()?.into_inner())
}
