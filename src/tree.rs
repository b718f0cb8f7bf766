//! Source tree access: which files a pass visits, and how their bytes are
//! read and written.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Which files under the root a pass visits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every file with one of the extensions, at any depth.
    Recursive { extensions: Vec<String> },
    /// Files exactly `depth` path segments below the root
    /// (`depth = 2` selects `<dir>/<file>`).
    AtDepth { depth: usize, extensions: Vec<String> },
}

impl Selection {
    pub fn recursive<S: AsRef<str>>(extensions: &[S]) -> Self {
        Selection::Recursive {
            extensions: owned(extensions),
        }
    }

    pub fn at_depth<S: AsRef<str>>(depth: usize, extensions: &[S]) -> Self {
        Selection::AtDepth {
            depth,
            extensions: owned(extensions),
        }
    }

    fn extensions(&self) -> &[String] {
        match self {
            Selection::Recursive { extensions } | Selection::AtDepth { extensions, .. } => extensions,
        }
    }

    /// Does `relative` (a path below the root) belong to the selection?
    pub fn matches(&self, relative: &Path) -> bool {
        let ext_ok = relative
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().iter().any(|want| want == ext));
        if !ext_ok {
            return false;
        }
        match self {
            Selection::Recursive { .. } => true,
            Selection::AtDepth { depth, .. } => {
                let segments = relative
                    .components()
                    .filter(|c| matches!(c, Component::Normal(_)))
                    .count();
                segments == *depth
            }
        }
    }

    /// Glob pattern covering the selection; extension filtering happens in
    /// [`Selection::matches`] so one walk serves every extension.
    fn pattern(&self, root: &Path) -> Result<String> {
        let root_str = root.to_str().ok_or_else(|| Error::Pattern {
            pattern: root.display().to_string(),
            reason: "root is not valid UTF-8".to_string(),
        })?;
        let mut pattern = glob::Pattern::escape(root_str);
        if !pattern.ends_with('/') {
            pattern.push('/');
        }
        match self {
            Selection::Recursive { .. } => pattern.push_str("**/*"),
            Selection::AtDepth { depth, .. } => {
                for _ in 1..*depth {
                    pattern.push_str("*/");
                }
                pattern.push('*');
            }
        }
        Ok(pattern)
    }
}

fn owned<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.as_ref().trim_start_matches('.').to_string())
        .collect()
}

pub type FileIter<'a> = Box<dyn Iterator<Item = Result<PathBuf>> + 'a>;

/// Walker plus whole-file store.
pub trait SourceTree {
    /// Lazily enumerate the selected files, in a stable order.
    fn files<'a>(&'a self, selection: &'a Selection) -> Result<FileIter<'a>>;
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

// -- Filesystem ---------------------------------------------------------------

/// The real filesystem below `root`.
#[derive(Debug, Clone)]
pub struct FsTree {
    root: PathBuf,
}

impl FsTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsTree { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceTree for FsTree {
    fn files<'a>(&'a self, selection: &'a Selection) -> Result<FileIter<'a>> {
        let pattern = selection.pattern(&self.root)?;
        let paths = glob::glob(&pattern).map_err(|e| Error::Pattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        let iter = paths.filter_map(move |entry| match entry {
            Ok(path) => {
                let relative = path.strip_prefix(&self.root).unwrap_or(&path);
                (path.is_file() && selection.matches(relative)).then_some(Ok(path))
            }
            Err(e) => Some(Err(Error::Io {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })),
        });
        Ok(Box::new(iter))
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

// -- In memory ----------------------------------------------------------------

/// A fixture tree held in memory. Paths are relative to an implicit root.
/// Records every write so tests can check what a run touched.
#[derive(Debug, Default)]
pub struct MemoryTree {
    files: RefCell<BTreeMap<PathBuf, String>>,
    writes: RefCell<Vec<PathBuf>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), content.into());
        self
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Paths written so far, in write order.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.borrow().clone()
    }
}

impl SourceTree for MemoryTree {
    fn files<'a>(&'a self, selection: &'a Selection) -> Result<FileIter<'a>> {
        let selected: Vec<PathBuf> = self
            .files
            .borrow()
            .keys()
            .filter(|p| selection.matches(p))
            .cloned()
            .collect();
        Ok(Box::new(selected.into_iter().map(Ok)))
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.get(path).ok_or_else(|| Error::Io {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        self.writes.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
