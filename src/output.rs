//! Delivery of produced documents to disk or memory.
//!
//! Every file is first written to a randomly named temporary file in the
//! target directory and renamed into place once complete, so a failed write
//! never leaves a truncated document behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::archive::build_archive;
use crate::error::Result;
use crate::split::OutputArtifact;

/// Where a run's documents go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// One file per document in a directory
    Directory(PathBuf),
    /// A single zip file on disk
    ArchiveFile(PathBuf),
    /// A zip archive returned in memory
    InMemoryArchive,
}

/// What was produced for a [`Destination`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivered {
    /// Paths of the written documents, in page order
    Files(Vec<PathBuf>),
    /// Path of the written archive
    ArchiveFile(PathBuf),
    /// Archive bytes
    Archive(Vec<u8>),
}

/// Send artifacts to a destination.
pub fn deliver(artifacts: &[OutputArtifact], destination: &Destination) -> Result<Delivered> {
    match destination {
        Destination::Directory(dir) => write_artifacts(dir, artifacts).map(Delivered::Files),
        Destination::ArchiveFile(path) => {
            write_archive(path, artifacts).map(|()| Delivered::ArchiveFile(path.clone()))
        }
        Destination::InMemoryArchive => build_archive(artifacts).map(Delivered::Archive),
    }
}

/// Write each artifact as `<dir>/<filename>`, creating the directory if needed.
///
/// Existing files with the same name are replaced.
pub fn write_artifacts<P: AsRef<Path>>(
    dir: P,
    artifacts: &[OutputArtifact],
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut saved = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(&artifact.filename);
        write_atomic(&path, &artifact.content)?;
        log::debug!("Wrote {}", path.display());
        saved.push(path);
    }
    Ok(saved)
}

/// Package artifacts and write the archive to `path`.
pub fn write_archive<P: AsRef<Path>>(path: P, artifacts: &[OutputArtifact]) -> Result<()> {
    let path = path.as_ref();
    let bytes = build_archive(artifacts)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_atomic(path, &bytes)?;
    log::debug!("Wrote archive {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
