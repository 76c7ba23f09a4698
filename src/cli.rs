//! # CLI Module
//!
//! Command-line interface and run orchestration. Uses clap for argument
//! parsing; configuration comes entirely from the `--cfg` file, so the
//! surface stays small: a directory, the config path, and output switches.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use tracing::warn;

use crate::config::Config;
use crate::contributors::{ContributorSource, GitHistorySource};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::matcher::PathMatcher;
use crate::output::{print_file_status, print_summary};
use crate::walker::TreeWalk;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Stamp headers onto all files selected by headstamp.toml under src/
  headstamp --cfg headstamp.toml src/

  # Same, with verbose progress on stderr
  headstamp --cfg headstamp.toml -v src/

  # Script-friendly: status lines only, no colors
  headstamp --cfg headstamp.toml --colors never . | grep ': failed'
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  /// Directory to process recursively
  pub dir: PathBuf,

  /// Path to the configuration file
  #[arg(long = "cfg", short = 'c', value_name = "FILE")]
  pub config: PathBuf,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Run the tool with the given arguments.
///
/// Fatal errors (configuration, backup creation, rewrite failure) abort the
/// run; per-file cleanup failures are reported in the status lines and do
/// not change the exit code.
pub fn run(args: Cli) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  if !args.dir.is_dir() {
    eprintln!("ERROR: not a directory: {}", args.dir.display());
    process::exit(1);
  }

  // Configuration problems abort before any file is touched.
  let config = match Config::load(&args.config) {
    Ok(config) => config,
    Err(e) => {
      eprintln!("ERROR: {e}");
      process::exit(1);
    }
  };

  let matcher = match PathMatcher::new(&config.include_patterns, &config.exclude_patterns) {
    Ok(matcher) => matcher,
    Err(e) => {
      eprintln!("ERROR: {e:#}");
      process::exit(1);
    }
  };

  // A missing or unreadable repository only costs the contributor block.
  let contributors: Option<Box<dyn ContributorSource>> = if config.list_contributors {
    match GitHistorySource::discover(&args.dir) {
      Ok(source) => Some(Box::new(source)),
      Err(e) => {
        warn!("contributor listing disabled: {:#}", e);
        None
      }
    }
  } else {
    None
  };

  let mut processed = 0usize;
  let mut failed = 0usize;

  for task in TreeWalk::new(&args.dir, &config, &matcher, contributors) {
    let task = task?;
    print_file_status(&task);
    processed += 1;
    if !task.status.is_success() {
      failed += 1;
    }
  }

  print_summary(processed, failed);

  Ok(())
}
