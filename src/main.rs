//! # headstamp
//!
//! A tool that stamps a formatted comment header onto source files.

use anyhow::Result;

use headstamp::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli)
}
