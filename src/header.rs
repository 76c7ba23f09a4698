//! # Header Module
//!
//! This module builds the comment header block that gets prepended to each
//! selected file: the project identity line (with optional URL), the
//! copyright holder block, the license line, and the optional contributors
//! block.
//!
//! Name lists wrap at the configured width with continuation lines indented
//! so names align under the first entry. Widths are counted in characters,
//! not bytes, so non-ASCII author names wrap correctly.

use crate::config::Config;

/// Label for the copyright holder block.
const COPYRIGHT_LABEL: &str = "Copyright holders";

/// Label for the contributors block.
const CONTRIBUTORS_LABEL: &str = "Contributors";

/// Display width of a string in characters.
fn width(s: &str) -> usize {
  s.chars().count()
}

/// Render `names` as comment lines under `label`, wrapping at `max_width`.
///
/// The first line reads `{prefix} {label}: {name}`; names are appended with
/// comma separators while they fit, and overflow starts a continuation line
/// indented to align under the first name. The width limit is advisory: a
/// single name longer than the limit still gets its own line, never
/// truncated.
///
/// Stripping prefixes and separators from the output reproduces the input
/// names in order.
pub fn format_name_list(label: &str, names: &[String], prefix: &str, max_width: usize) -> Vec<String> {
  let Some((first, rest)) = names.split_first() else {
    return Vec::new();
  };

  let mut lines = Vec::new();
  let mut line = format!("{prefix} {label}: {first}");
  if !rest.is_empty() {
    line.push(',');
  }

  // Continuation lines align names under the first entry: the prefix plus
  // spaces covering " {label}:".
  let continuation = format!("{prefix}{}", " ".repeat(width(label) + 2));

  for (i, name) in rest.iter().enumerate() {
    let sep = if i + 1 < rest.len() { "," } else { "" };
    if width(&line) + 1 + width(name) + sep.len() <= max_width {
      line.push(' ');
      line.push_str(name);
      line.push_str(sep);
    } else {
      lines.push(std::mem::replace(&mut line, format!("{continuation} {name}{sep}")));
    }
  }

  lines.push(line);
  lines
}

/// Filter a raw contributor list against the configured copyright holders.
///
/// Names already present among the holders are dropped and duplicates
/// collapse to their first occurrence; input order is otherwise preserved.
fn filter_contributors(contributors: &[String], holders: &[String]) -> Vec<String> {
  let mut seen: Vec<&str> = Vec::new();
  let mut filtered = Vec::new();

  for name in contributors {
    let name = name.trim();
    if name.is_empty() || holders.iter().any(|h| h == name) || seen.contains(&name) {
      continue;
    }
    seen.push(name);
    filtered.push(name.to_string());
  }

  filtered
}

/// Compose the full header text for one file.
///
/// Lines are emitted in fixed order: identity (with inline or indented URL),
/// copyright holders, license, and the optional contributors block separated
/// by a bare comment line. The returned text ends with one blank line so the
/// original file content resumes after a separator.
///
/// `contributors` is the raw history-derived name list for the file, if
/// contributor listing is active; holders are excluded and duplicates
/// collapsed before rendering. The config is validated at load time, so
/// this never fails.
pub fn compose_header(config: &Config, contributors: Option<&[String]>) -> String {
  let prefix = &config.prefix;
  let mut lines = Vec::new();

  // Identity line, with the URL inline when it fits.
  let identity = format!("{} {}", prefix, config.project_name);
  match &config.url {
    Some(url) => {
      if width(&identity) + width(url) + 4 <= config.max_width {
        lines.push(format!("{identity} ({url})."));
      } else {
        lines.push(format!("{identity}:"));
        lines.push(format!("{prefix}   {url}"));
      }
    }
    None => lines.push(identity),
  }

  lines.extend(format_name_list(
    COPYRIGHT_LABEL,
    &config.copyright_holders,
    prefix,
    config.max_width,
  ));

  lines.push(format!("{} License: {}", prefix, config.license));

  if let Some(contributors) = contributors {
    let contributors = filter_contributors(contributors, &config.copyright_holders);
    if !contributors.is_empty() {
      lines.push(prefix.clone());
      lines.extend(format_name_list(
        CONTRIBUTORS_LABEL,
        &contributors,
        prefix,
        config.max_width,
      ));
    }
  }

  let mut header = lines.join("\n");
  header.push_str("\n\n");
  header
}
