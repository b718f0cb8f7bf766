//! Writer: commits a file's final content back to the tree.

use crate::error::Result;
use crate::tree::SourceTree;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Newline convention applied on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEndings {
    /// CRLF and lone CR become LF.
    Normalize,
    /// Bytes are written exactly as produced.
    Preserve,
}

impl LineEndings {
    pub fn apply<'a>(self, text: &'a str) -> Cow<'a, str> {
        match self {
            LineEndings::Normalize if text.contains('\r') => {
                Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
            }
            _ => Cow::Borrowed(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Committed {
    Unchanged,
    Written,
    /// Dry run: the file would have been written.
    Skipped,
}

pub struct Writer<'t, T: ?Sized> {
    tree: &'t T,
    endings: LineEndings,
    dry_run: bool,
}

impl<'t, T: SourceTree + ?Sized> Writer<'t, T> {
    pub fn new(tree: &'t T, endings: LineEndings, dry_run: bool) -> Self {
        Writer {
            tree,
            endings,
            dry_run,
        }
    }

    /// Write `output` for `path` unless it is byte-identical to `original`.
    pub fn commit(&self, path: &Path, original: &str, output: &str) -> Result<Committed> {
        let output = self.endings.apply(output);
        if output == original {
            return Ok(Committed::Unchanged);
        }
        if self.dry_run {
            info!(path = %path.display(), "would rewrite");
            return Ok(Committed::Skipped);
        }
        self.tree.write(path, &output)?;
        info!(path = %path.display(), "rewrote");
        Ok(Committed::Written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemoryTree;

    #[test]
    fn normalize_converts_crlf_and_cr() {
        assert_eq!(LineEndings::Normalize.apply("a\r\nb\rc\n"), "a\nb\nc\n");
        assert!(matches!(LineEndings::Normalize.apply("a\nb"), Cow::Borrowed(_)));
    }

    #[test]
    fn preserve_keeps_bytes() {
        assert_eq!(LineEndings::Preserve.apply("a\r\nb"), "a\r\nb");
    }

    #[test]
    fn unchanged_output_is_not_written() {
        let tree = MemoryTree::new().with_file("a.js", "x\n");
        let writer = Writer::new(&tree, LineEndings::Preserve, false);
        let done = writer.commit(Path::new("a.js"), "x\n", "x\n").unwrap();
        assert_eq!(done, Committed::Unchanged);
        assert!(tree.writes().is_empty());
    }

    #[test]
    fn line_ending_change_alone_counts_as_a_change() {
        let tree = MemoryTree::new().with_file("a.js", "x\r\n");
        let writer = Writer::new(&tree, LineEndings::Normalize, false);
        let done = writer.commit(Path::new("a.js"), "x\r\n", "x\r\n").unwrap();
        assert_eq!(done, Committed::Written);
        assert_eq!(tree.get("a.js").as_deref(), Some("x\n"));
    }

    #[test]
    fn dry_run_never_writes() {
        let tree = MemoryTree::new().with_file("a.js", "x");
        let writer = Writer::new(&tree, LineEndings::Preserve, true);
        let done = writer.commit(Path::new("a.js"), "x", "y").unwrap();
        assert_eq!(done, Committed::Skipped);
        assert_eq!(tree.get("a.js").as_deref(), Some("x"));
    }
}
