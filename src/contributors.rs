//! # Contributors Module
//!
//! Contributor discovery for the optional header block. The core only
//! depends on the [`ContributorSource`] trait; the shipped implementation
//! queries git history through libgit2, collecting the author names of
//! commits that touched a file. Swapping in a different source (or a mock in
//! tests) is a matter of implementing the trait.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{Commit, Oid, Repository, Tree};
use tracing::debug;

/// A capability that yields the historical author names for a file.
pub trait ContributorSource {
  /// Return author names for `path`, most recent first, deduplicated.
  ///
  /// # Errors
  ///
  /// Any failure is reported to the caller, which degrades contributor
  /// listing for the rest of the run rather than aborting.
  fn lookup(&self, path: &Path) -> Result<Vec<String>>;
}

/// Contributor source backed by the git history of the processed tree.
pub struct GitHistorySource {
  repo: Repository,
  workdir: PathBuf,
}

impl GitHistorySource {
  /// Discover the repository containing `root`.
  ///
  /// # Errors
  ///
  /// Returns an error if `root` is not inside a git repository with a
  /// working directory.
  pub fn discover(root: &Path) -> Result<Self> {
    let repo = Repository::discover(root)
      .with_context(|| format!("No git repository found at or above {}", root.display()))?;

    let workdir = repo
      .workdir()
      .context("Repository has no working directory")?
      .canonicalize()
      .context("Failed to resolve repository working directory")?;

    debug!("contributor source: git repository at {}", workdir.display());

    Ok(Self { repo, workdir })
  }

  /// The id of the tree entry at `rel`, if present in `tree`.
  fn entry_id(tree: &Tree<'_>, rel: &Path) -> Option<Oid> {
    tree.get_path(rel).ok().map(|entry| entry.id())
  }

  /// Whether `commit` changed the blob at `rel` relative to its parents.
  ///
  /// A root commit counts as touching every path it contains; a merge
  /// counts when the entry differs from any parent.
  fn commit_touches(&self, commit: &Commit<'_>, rel: &Path) -> Result<bool> {
    let tree = commit.tree().context("Failed to read commit tree")?;
    let current = Self::entry_id(&tree, rel);

    if commit.parent_count() == 0 {
      return Ok(current.is_some());
    }

    for parent in commit.parents() {
      let parent_tree = parent.tree().context("Failed to read parent tree")?;
      if Self::entry_id(&parent_tree, rel) != current {
        return Ok(true);
      }
    }

    Ok(false)
  }
}

impl ContributorSource for GitHistorySource {
  fn lookup(&self, path: &Path) -> Result<Vec<String>> {
    let abs = path
      .canonicalize()
      .with_context(|| format!("Failed to resolve path: {}", path.display()))?;
    let rel = abs
      .strip_prefix(&self.workdir)
      .with_context(|| format!("{} is outside the repository", path.display()))?;

    let mut revwalk = self.repo.revwalk().context("Failed to start revision walk")?;
    revwalk.push_head().context("Failed to push HEAD")?;

    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for oid in revwalk {
      let oid = oid.context("Revision walk failed")?;
      let commit = self.repo.find_commit(oid).context("Failed to load commit")?;

      if !self.commit_touches(&commit, rel)? {
        continue;
      }

      if let Some(name) = commit.author().name()
        && seen.insert(name.to_string())
      {
        names.push(name.to_string());
      }
    }

    debug!("{}: {} contributor(s) in history", path.display(), names.len());

    Ok(names)
  }
}
