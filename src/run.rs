//! Batch drivers for the two passes.
//!
//! Both visit the selected files sequentially, read each fully, transform it
//! in memory and hand the result to the [`Writer`]. Nothing is rolled back:
//! when a run aborts, files already written stay written.

use crate::defs::Definitions;
use crate::error::{Error, Result};
use crate::inject::Injector;
use crate::params::NameCharset;
use crate::scanner;
use crate::tree::{Selection, SourceTree};
use crate::writer::{Committed, LineEndings, Writer};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration for [`run_params`].
#[derive(Debug, Clone)]
pub struct ParamsConfig {
    pub selection: Selection,
    pub charset: NameCharset,
    pub dry_run: bool,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        ParamsConfig {
            selection: Selection::recursive(&["js"]),
            charset: NameCharset::Strict,
            dry_run: false,
        }
    }
}

/// Configuration for [`run_inject`].
#[derive(Debug, Clone)]
pub struct InjectConfig {
    pub selection: Selection,
    /// Collect per-file failures instead of stopping at the first one.
    pub keep_going: bool,
    pub dry_run: bool,
}

impl Default for InjectConfig {
    fn default() -> Self {
        InjectConfig {
            selection: Selection::at_depth(2, &["js", "ts"]),
            keep_going: false,
            dry_run: false,
        }
    }
}

/// Counters for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Files visited.
    pub scanned: usize,
    /// Files that had a definition entry (inject only).
    pub targeted: usize,
    /// Files written (or that would be, on a dry run).
    pub rewritten: usize,
    /// Doc blocks replaced (inject only).
    pub replaced: usize,
    /// Declarations with content but no adjacent doc block (inject only).
    pub missed: usize,
}

impl RunReport {
    fn record(&mut self, committed: Committed) {
        if committed != Committed::Unchanged {
            self.rewritten += 1;
        }
    }
}

/// Normalize `name - description` lines in every selected file.
pub fn run_params<T: SourceTree + ?Sized>(tree: &T, config: &ParamsConfig) -> Result<RunReport> {
    let writer = Writer::new(tree, LineEndings::Normalize, config.dry_run);
    let mut report = RunReport::default();

    for path in tree.files(&config.selection)? {
        let path = path?;
        report.scanned += 1;
        let original = tree.read(&path)?;
        let output = rewrite_params(&original, config.charset);
        report.record(writer.commit(&path, &original, &output)?);
    }

    Ok(report)
}

/// Apply the line-mode scanner to a whole file's text.
pub fn rewrite_params(text: &str, charset: NameCharset) -> String {
    let text = LineEndings::Normalize.apply(text);
    scanner::scan_lines(text.split('\n'), charset).join("\n")
}

/// Inject definition content into every selected file that has an entry.
pub fn run_inject<T: SourceTree + ?Sized>(
    tree: &T,
    defs: &Definitions,
    config: &InjectConfig,
) -> Result<RunReport> {
    let injector = Injector::new(defs);
    let writer = Writer::new(tree, LineEndings::Preserve, config.dry_run);
    let mut report = RunReport::default();
    let mut failures: Vec<(PathBuf, Error)> = Vec::new();

    for path in tree.files(&config.selection)? {
        let path = path?;
        report.scanned += 1;
        match inject_one(tree, &injector, &writer, &path, &mut report) {
            Ok(()) => {}
            Err(err) if config.keep_going => {
                warn!(path = %path.display(), error = %err, "skipping file");
                failures.push((path, err));
            }
            Err(err) => return Err(err),
        }
    }

    if failures.is_empty() {
        Ok(report)
    } else {
        Err(Error::Batch { failures })
    }
}

fn inject_one<T: SourceTree + ?Sized>(
    tree: &T,
    injector: &Injector<'_>,
    writer: &Writer<'_, T>,
    path: &Path,
    report: &mut RunReport,
) -> Result<()> {
    let original = tree.read(path)?;
    let Some(injected) = injector.inject_file(path, &original)? else {
        debug!(path = %path.display(), "no definition entry");
        return Ok(());
    };
    report.targeted += 1;
    report.replaced += injected.stats.replaced();
    report.missed += injected.stats.missed.len();
    report.record(writer.commit(path, &original, &injected.content)?);
    Ok(())
}
