// crates/preprocess_mac_sources/src/lib.rs

//! Batch driver: runs the marker rewriter over an ordered list of files.
//!
//! File access goes through the [`TextStore`] trait so the batch loop can be
//! exercised against an in-memory store in tests; [`FsTextStore`] is the
//! production implementation. Files are processed strictly in list order and
//! the first failure aborts the remaining batch, leaving earlier files
//! already rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use check_marker_balance::check_marker_balance;
use rewrite_mac_markers::rewrite_markers;

/// Whole-file text access, the only capability the driver needs.
pub trait TextStore {
    /// Reads the full contents of the file at `path` as text.
    fn read(&self, path: &Path) -> Result<String>;

    /// Replaces the contents of the file at `path` with `contents`.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// `TextStore` over the real filesystem.
pub struct FsTextStore;

impl TextStore for FsTextStore {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Error reading file {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).with_context(|| format!("Error writing file {}", path.display()))
    }
}

/// Options controlling a batch run. The default run rewrites in place with no
/// validation, which matches the historical behavior of the tool.
#[derive(Clone, Copy, Debug, Default)]
pub struct BatchOptions {
    /// Verify block-marker pairing per file and abort before writing a file
    /// that has any violation.
    pub check_balance: bool,
    /// Report what would change without writing anything.
    pub dry_run: bool,
    /// Per-file progress lines on stdout.
    pub verbose: bool,
}

/// Summary of a completed batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub processed: usize,
    pub changed: usize,
}

/// Processes `files` strictly in order: read, optionally validate, rewrite,
/// write back to the same path. A file whose rewrite is a no-op is counted as
/// processed but not written. The first error ends the batch; files already
/// written stay rewritten.
pub fn run_batch(store: &dyn TextStore, files: &[PathBuf], options: BatchOptions) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();

    for path in files {
        let text = store.read(path)?;

        if options.check_balance {
            let issues = check_marker_balance(&text);
            if !issues.is_empty() {
                let report: Vec<String> = issues.iter().map(ToString::to_string).collect();
                anyhow::bail!("Unbalanced markers in {}:\n{}", path.display(), report.join("\n"));
            }
        }

        let rewritten = rewrite_markers(&text);
        outcome.processed += 1;

        if rewritten == text {
            if options.verbose {
                println!("Unchanged: {}", path.display());
            }
            continue;
        }

        outcome.changed += 1;
        if options.dry_run {
            println!("Would rewrite {}", path.display());
        } else {
            store.write(path, &rewritten)?;
            if options.verbose {
                println!("Rewrote {}", path.display());
            }
        }
    }

    Ok(outcome)
}

/// Reads an ordered file list: one path per line, blank lines and `#` comment
/// lines skipped.
pub fn read_file_list(path: &Path) -> Result<Vec<PathBuf>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Error reading file list {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect())
}
