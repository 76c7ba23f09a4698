//! # headstamp
//!
//! A tool that stamps a formatted comment header onto source files selected
//! by glob patterns under a directory tree.
//!
//! `headstamp` walks a directory recursively, selects files through
//! include/exclude glob lists from a TOML configuration file, and prepends
//! a header block with the project name and URL, the copyright holders, the
//! license, and optionally the contributors found in git history. Files are
//! rewritten in place behind a sibling backup copy, so an interrupted run
//! always leaves either the original or a recoverable `file~` behind.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use headstamp::config::Config;
//! use headstamp::matcher::PathMatcher;
//! use headstamp::walker::TreeWalk;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Path::new("headstamp.toml"))?;
//!     let matcher = PathMatcher::new(&config.include_patterns, &config.exclude_patterns)?;
//!
//!     for task in TreeWalk::new(Path::new("src"), &config, &matcher, None) {
//!         let task = task?;
//!         println!("{}: {:?}", task.path.display(), task.status);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`config`] - Configuration loading and one-shot validation
//! * [`matcher`] - Include/exclude glob matching over file paths
//! * [`header`] - Header composition and name-list wrapping
//! * [`rewriter`] - Backup-then-rewrite file mutation
//! * [`walker`] - Lazy directory traversal yielding per-file outcomes
//! * [`contributors`] - Contributor discovery from git history
//! * [`logging`] - Output modes and logging macros
//!
//! [`config`]: crate::config
//! [`matcher`]: crate::matcher
//! [`header`]: crate::header
//! [`rewriter`]: crate::rewriter
//! [`walker`]: crate::walker
//! [`contributors`]: crate::contributors
//! [`logging`]: crate::logging

pub mod cli;
pub mod config;
pub mod contributors;
pub mod header;
pub mod logging;
pub mod matcher;
pub mod output;
pub mod rewriter;
pub mod walker;
