//! # File Rewriter Module
//!
//! In-place header insertion with crash-safety via a sibling backup copy.
//!
//! The sequence is: copy the original byte-for-byte to `path~`, write the
//! header followed by the original content (streamed back out of the backup)
//! to the original path, then delete the backup. A backup left behind after
//! a run marks a partially-failed write and is the recovery artifact: restore
//! it over the target and delete it.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write as _};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::verbose_log;

/// Outcome of rewriting a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
  /// Header written and backup removed.
  Success,
  /// Header written, but the backup could not be deleted.
  CleanupFailed,
}

impl FileStatus {
  /// Whether the file completed the full backup-write-cleanup sequence.
  pub const fn is_success(self) -> bool {
    matches!(self, FileStatus::Success)
  }
}

/// Error type for the rewrite sequence. Both variants abort the run.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
  /// The backup copy could not be created; the original is untouched.
  #[error("Failed to create backup file '{path}': {source}")]
  Backup { path: PathBuf, source: io::Error },

  /// Writing the header or restreaming the content failed; the backup
  /// remains on disk for manual recovery.
  #[error("Failed to rewrite '{path}': {source}")]
  Rewrite { path: PathBuf, source: io::Error },
}

/// The sibling backup path for `path`: the same name with `~` appended.
pub fn backup_path(path: &Path) -> PathBuf {
  let mut name = path.as_os_str().to_os_string();
  name.push("~");
  PathBuf::from(name)
}

/// Prepend `header` to the file at `path`, preserving the original content
/// byte-for-byte after it.
///
/// A cleanup failure (the backup could not be deleted after a successful
/// rewrite) is reported through [`FileStatus::CleanupFailed`] rather than an
/// error: the content rewrite already succeeded and is not rolled back.
///
/// # Errors
///
/// Returns [`RewriteError::Backup`] if the backup copy cannot be created
/// (no mutation has occurred) and [`RewriteError::Rewrite`] if writing the
/// target fails afterwards (the backup is left in place).
pub fn prepend_header(path: &Path, header: &str) -> Result<FileStatus, RewriteError> {
  let backup = backup_path(path);

  fs::copy(path, &backup).map_err(|source| RewriteError::Backup {
    path: backup.clone(),
    source,
  })?;

  write_with_header(path, &backup, header).map_err(|source| RewriteError::Rewrite {
    path: path.to_path_buf(),
    source,
  })?;

  match fs::remove_file(&backup) {
    Ok(()) => {
      verbose_log!("Rewrote: {}", path.display());
      Ok(FileStatus::Success)
    }
    Err(e) => {
      warn!("could not remove backup '{}': {}", backup.display(), e);
      Ok(FileStatus::CleanupFailed)
    }
  }
}

/// Write the header and then stream the backup's bytes into the target.
fn write_with_header(path: &Path, backup: &Path, header: &str) -> io::Result<()> {
  let mut source = BufReader::new(File::open(backup)?);
  let mut target = BufWriter::new(File::create(path)?);

  target.write_all(header.as_bytes())?;
  io::copy(&mut source, &mut target)?;
  target.flush()
}
