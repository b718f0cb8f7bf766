//! Definition loader: the symbol table that drives injection.
//!
//! The file is a JSON object keyed by symbol name:
//!
//! ```json
//! {
//!   "mxActor": [
//!     ["/**", " * Actor shape.", " */"],
//!     { "redraw(c)": ["Redraws the shape.", ["/**", " * @param c canvas", " */"]] }
//!   ]
//! }
//! ```
//!
//! `null`, `[]` and `""` all mean "leave this declaration alone".

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Immutable symbol table, loaded once per run.
#[derive(Debug, Default)]
pub struct Definitions {
    entries: BTreeMap<String, DefinitionEntry>,
}

/// Replacement content for one symbol (one source file).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DefinitionEntry {
    /// Lines that replace the class-level doc block. Empty = no-op.
    pub class_lines: Vec<String>,
    /// Member signature -> replacement, iterated in signature order.
    pub members: BTreeMap<String, MemberEntry>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub short: String,
    /// Lines that replace the member's doc block. Empty = no-op.
    pub lines: Vec<String>,
}

// -- Wire format --------------------------------------------------------------

#[derive(Deserialize)]
struct RawEntry(Option<RawLines>, Option<BTreeMap<String, RawMember>>);

#[derive(Deserialize)]
struct RawMember(Option<String>, Option<RawLines>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLines {
    List(Vec<String>),
    Text(String),
}

impl RawLines {
    fn into_lines(self) -> Vec<String> {
        match self {
            RawLines::List(lines) => lines,
            RawLines::Text(text) if text.is_empty() => Vec::new(),
            RawLines::Text(text) => text.lines().map(str::to_string).collect(),
        }
    }
}

fn lines_of(raw: Option<RawLines>) -> Vec<String> {
    raw.map(RawLines::into_lines).unwrap_or_default()
}

// -- Loading ------------------------------------------------------------------

impl Definitions {
    /// Read and parse the definition file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::DefinitionsRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &content)
    }

    /// Parse definitions from JSON text. `origin` is only used in errors.
    pub fn from_json(origin: &Path, content: &str) -> Result<Self> {
        let malformed = |reason: String| Error::Definitions {
            path: PathBuf::from(origin),
            reason,
        };

        let raw: BTreeMap<String, RawEntry> =
            serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;

        let mut entries = BTreeMap::new();
        for (symbol, RawEntry(class, members)) in raw {
            if symbol.trim().is_empty() {
                return Err(malformed("empty symbol name".to_string()));
            }
            let members = members
                .unwrap_or_default()
                .into_iter()
                .map(|(signature, RawMember(short, lines))| {
                    let member = MemberEntry {
                        short: short.unwrap_or_default(),
                        lines: lines_of(lines),
                    };
                    (signature, member)
                })
                .collect();
            entries.insert(
                symbol,
                DefinitionEntry {
                    class_lines: lines_of(class),
                    members,
                },
            );
        }

        Ok(Definitions { entries })
    }

    pub fn get(&self, symbol: &str) -> Option<&DefinitionEntry> {
        self.entries.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, DefinitionEntry)> for Definitions {
    fn from_iter<T: IntoIterator<Item = (String, DefinitionEntry)>>(iter: T) -> Self {
        Definitions {
            entries: iter.into_iter().collect(),
        }
    }
}

impl DefinitionEntry {
    /// True when neither the class nor any member would be touched.
    pub fn is_noop(&self) -> bool {
        self.class_lines.is_empty() && self.members.values().all(|m| m.lines.is_empty())
    }
}
