//! # Tree Walker Module
//!
//! Recursive traversal of the target directory, yielding one [`FileTask`]
//! per matched file as it is processed. The walk is a lazy iterator: a file
//! is selected, its header composed, and the rewrite applied only when the
//! caller pulls the next item, so the caller can report progress as the run
//! proceeds.
//!
//! Paths are matched exactly as yielded by the traversal, prefixed by the
//! root argument as given: a relative root yields relative paths. Traversal
//! order follows the underlying directory enumeration and is not sorted.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;
use walkdir::WalkDir;

use crate::config::Config;
use crate::contributors::ContributorSource;
use crate::header::compose_header;
use crate::matcher::PathMatcher;
use crate::rewriter::{FileStatus, prepend_header};
use crate::verbose_log;

/// One processed file and its outcome.
#[derive(Debug)]
pub struct FileTask {
  /// The file path as yielded by the traversal.
  pub path: PathBuf,
  /// Outcome of the rewrite sequence.
  pub status: FileStatus,
}

/// Lazy traversal that stamps headers onto matching files.
///
/// Yields `Ok(FileTask)` for every matched file; an `Err` item is a fatal
/// failure (backup creation or rewrite) and terminates the run. Unreadable
/// directory entries are logged and skipped.
pub struct TreeWalk<'a> {
  walker: walkdir::IntoIter,
  config: &'a Config,
  matcher: &'a PathMatcher,
  // Dropped on the first lookup failure, disabling contributor listing for
  // the remainder of the walk.
  contributors: Option<Box<dyn ContributorSource>>,
}

impl<'a> TreeWalk<'a> {
  /// Start a walk at `root`.
  ///
  /// `contributors` is the optional history source; pass `None` when
  /// contributor listing is disabled.
  pub fn new(
    root: &Path,
    config: &'a Config,
    matcher: &'a PathMatcher,
    contributors: Option<Box<dyn ContributorSource>>,
  ) -> Self {
    Self {
      walker: WalkDir::new(root).into_iter(),
      config,
      matcher,
      contributors,
    }
  }

  /// Query the contributor source for `path`, degrading on failure.
  fn lookup_contributors(&mut self, path: &Path) -> Option<Vec<String>> {
    let source = self.contributors.as_ref()?;

    match source.lookup(path) {
      Ok(names) => Some(names),
      Err(e) => {
        warn!(
          "contributor lookup failed for {}: {:#}; disabling contributor listing",
          path.display(),
          e
        );
        self.contributors = None;
        None
      }
    }
  }
}

impl Iterator for TreeWalk<'_> {
  type Item = Result<FileTask>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let entry = match self.walker.next()? {
        Ok(entry) => entry,
        Err(e) => {
          warn!("skipping unreadable entry: {}", e);
          continue;
        }
      };

      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.into_path();
      if !self.matcher.matches(&path) {
        verbose_log!("Skipping: {} (no pattern match)", path.display());
        continue;
      }

      let contributors = self.lookup_contributors(&path);
      let header = compose_header(self.config, contributors.as_deref());

      return Some(match prepend_header(&path, &header) {
        Ok(status) => Ok(FileTask { path, status }),
        Err(e) => Err(e.into()),
      });
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use anyhow::anyhow;
  use tempfile::TempDir;

  use super::*;

  fn test_config(include: &[&str], exclude: &[&str]) -> Config {
    Config {
      include_patterns: include.iter().map(|s| s.to_string()).collect(),
      exclude_patterns: exclude.iter().map(|s| s.to_string()).collect(),
      project_name: "demo".to_string(),
      license: "MIT".to_string(),
      url: None,
      max_width: 78,
      prefix: "#".to_string(),
      copyright_holders: vec!["Ada".to_string()],
      list_contributors: false,
    }
  }

  fn run_walk(root: &Path, config: &Config, contributors: Option<Box<dyn ContributorSource>>) -> Vec<FileTask> {
    let matcher = PathMatcher::new(&config.include_patterns, &config.exclude_patterns).expect("compile matcher");
    TreeWalk::new(root, config, &matcher, contributors)
      .collect::<Result<Vec<_>>>()
      .expect("walk should succeed")
  }

  struct StaticSource(Vec<String>);

  impl ContributorSource for StaticSource {
    fn lookup(&self, _path: &Path) -> Result<Vec<String>> {
      Ok(self.0.clone())
    }
  }

  struct FailingSource;

  impl ContributorSource for FailingSource {
    fn lookup(&self, _path: &Path) -> Result<Vec<String>> {
      Err(anyhow!("history unavailable"))
    }
  }

  #[test]
  fn test_matching_files_rewritten_others_untouched() {
    let dir = TempDir::new().expect("create temp dir");
    fs::create_dir_all(dir.path().join("sub")).expect("mkdir");
    fs::write(dir.path().join("a.py"), "a\n").expect("write");
    fs::write(dir.path().join("sub/b.py"), "b\n").expect("write");
    fs::write(dir.path().join("sub/c.txt"), "c\n").expect("write");
    fs::write(dir.path().join("sub/skip_d.py"), "d\n").expect("write");

    let config = test_config(&["*.py"], &["*skip*"]);
    let tasks = run_walk(dir.path(), &config, None);

    let mut paths: Vec<String> = tasks.iter().map(|t| t.path.display().to_string()).collect();
    paths.sort();
    assert_eq!(tasks.len(), 2);
    assert!(paths[0].ends_with("a.py"));
    assert!(paths[1].ends_with("b.py"));
    assert!(tasks.iter().all(|t| t.status.is_success()));

    let expected = "# demo\n# Copyright holders: Ada\n# License: MIT\n\n";
    assert_eq!(
      fs::read_to_string(dir.path().join("a.py")).expect("read"),
      format!("{expected}a\n")
    );
    assert_eq!(
      fs::read_to_string(dir.path().join("sub/b.py")).expect("read"),
      format!("{expected}b\n")
    );
    // Unmatched and excluded files are byte-for-byte unchanged.
    assert_eq!(fs::read_to_string(dir.path().join("sub/c.txt")).expect("read"), "c\n");
    assert_eq!(
      fs::read_to_string(dir.path().join("sub/skip_d.py")).expect("read"),
      "d\n"
    );
  }

  #[test]
  fn test_no_backups_remain_after_run() {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(dir.path().join("a.py"), "a\n").expect("write");
    fs::write(dir.path().join("b.py"), "b\n").expect("write");

    let config = test_config(&["*.py"], &[]);
    run_walk(dir.path(), &config, None);

    let leftovers: Vec<_> = WalkDir::new(dir.path())
      .into_iter()
      .filter_map(|e| e.ok())
      .filter(|e| e.path().to_string_lossy().ends_with('~'))
      .collect();
    assert!(leftovers.is_empty(), "stray backups: {leftovers:?}");
  }

  #[test]
  fn test_contributors_appear_in_header() {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(dir.path().join("a.py"), "a\n").expect("write");

    let config = test_config(&["*.py"], &[]);
    let source = StaticSource(vec!["Carol".to_string(), "Ada".to_string()]);
    run_walk(dir.path(), &config, Some(Box::new(source)));

    let content = fs::read_to_string(dir.path().join("a.py")).expect("read");
    // Holder "Ada" is excluded from the contributor block.
    assert!(content.contains("#\n# Contributors: Carol\n"));
    assert!(!content.contains("Contributors: Carol, Ada"));
  }

  #[test]
  fn test_failing_contributor_source_degrades_without_aborting() {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(dir.path().join("a.py"), "a\n").expect("write");
    fs::write(dir.path().join("b.py"), "b\n").expect("write");

    let config = test_config(&["*.py"], &[]);
    let tasks = run_walk(dir.path(), &config, Some(Box::new(FailingSource)));

    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.status.is_success()));
    for name in ["a.py", "b.py"] {
      let content = fs::read_to_string(dir.path().join(name)).expect("read");
      assert!(!content.contains("Contributors"));
    }
  }

  #[test]
  fn test_paths_are_root_prefixed() {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(dir.path().join("a.py"), "a\n").expect("write");

    // Patterns are matched against the root-prefixed path, so a pattern
    // spanning the root directory name also selects the file.
    let config = test_config(&["*a.py"], &[]);
    let tasks = run_walk(dir.path(), &config, None);

    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].path.starts_with(dir.path()));
  }

  #[test]
  fn test_empty_directory_yields_nothing() {
    let dir = TempDir::new().expect("create temp dir");
    let config = test_config(&["*.py"], &[]);
    let tasks = run_walk(dir.path(), &config, None);
    assert!(tasks.is_empty());
  }
}
