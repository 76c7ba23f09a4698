//! # Path Matcher Module
//!
//! Compiles the configured include/exclude glob lists into match predicates
//! over file paths. A path is selected when it matches any include pattern
//! and no exclude pattern.

use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Match predicates compiled from the include/exclude pattern lists.
///
/// Patterns use shell-glob semantics (`*`, `?`, character classes) and must
/// match the full path as yielded by the tree walker. `*` matches across
/// path separators, so `*.py` selects files at any depth.
#[derive(Debug)]
pub struct PathMatcher {
  include: GlobSet,
  exclude: GlobSet,
}

impl PathMatcher {
  /// Compile include and exclude pattern lists into a matcher.
  ///
  /// An empty include list compiles to a set that matches nothing; rejecting
  /// that configuration up front is the config loader's job.
  ///
  /// # Errors
  ///
  /// Returns an error if any pattern is not a valid glob.
  pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
    Ok(Self {
      include: build_glob_set(include)?,
      exclude: build_glob_set(exclude)?,
    })
  }

  /// Whether `path` matched an include pattern and no exclude pattern.
  pub fn matches(&self, path: &Path) -> bool {
    self.include.is_match(path) && !self.exclude.is_match(path)
  }
}

/// Build a single glob set from a pattern list (patterns OR'd together).
fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
  let mut builder = GlobSetBuilder::new();
  for pattern in patterns {
    builder.add(Glob::new(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?);
  }
  builder.build().with_context(|| "Failed to build glob set")
}
