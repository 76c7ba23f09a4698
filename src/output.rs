//! # Output Module
//!
//! This module centralizes the user-facing output of a run: one status line
//! per processed file and a closing summary. Stdout stays predictable for
//! piping; only the status words are colorized, and only when the stream
//! supports it.

use owo_colors::{OwoColorize, Stream};

use crate::info_log;
use crate::logging::is_quiet;
use crate::rewriter::FileStatus;
use crate::walker::FileTask;

/// Print the `{path}: success` / `{path}: failed` line for one file.
pub fn print_file_status(task: &FileTask) {
  if is_quiet() {
    return;
  }

  match task.status {
    FileStatus::Success => println!(
      "{}: {}",
      task.path.display(),
      "success".if_supports_color(Stream::Stdout, |s| s.green())
    ),
    FileStatus::CleanupFailed => println!(
      "{}: {}",
      task.path.display(),
      "failed".if_supports_color(Stream::Stdout, |s| s.red())
    ),
  }
}

/// Print the closing summary for a run.
pub fn print_summary(processed: usize, failed: usize) {
  let files_word = if processed == 1 { "file" } else { "files" };
  if failed > 0 {
    info_log!("{} {} processed, {} failed", processed, files_word, failed);
  } else {
    info_log!("{} {} processed", processed, files_word);
  }
}
