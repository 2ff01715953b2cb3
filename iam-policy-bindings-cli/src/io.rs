//! Reading the input policy document and writing results.

use anyhow::{bail, Context, Result};
use iam_policy_bindings::Policy;
use log::debug;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a policy from `path`, or from stdin when the path is absent or `-`.
pub(crate) fn read_policy(path: Option<&Path>) -> Result<Policy> {
    let text = match path {
        Some(path) if path != Path::new("-") => {
            debug!("Reading policy from {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read policy file: {}", path.display()))?
        }
        _ => {
            if atty::is(atty::Stream::Stdin) {
                bail!("No policy provided. Pass --policy <FILE> or pipe a policy document on stdin");
            }
            debug!("Reading policy from stdin");
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read policy from stdin")?;
            text
        }
    };

    // An empty document stands for a resource with no policy yet.
    if text.trim().is_empty() {
        return Ok(Policy::new());
    }
    Policy::from_json_str(&text).context("Failed to parse policy document")
}

/// Write `text` followed by a newline to `path`, or to stdout when absent.
///
/// Files are written to a temporary sibling and renamed over `path`, so an
/// interrupted write never leaves a truncated policy behind.
pub(crate) fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            debug!("Writing output to {}", path.display());
            let dir = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let mut file = NamedTempFile::new_in(dir)
                .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
            writeln!(file, "{text}")
                .and_then(|()| file.as_file().sync_all())
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            file.persist(path)
                .map(drop)
                .with_context(|| format!("Failed to write output file: {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").context("Failed to write to stdout")
        }
    }
}
