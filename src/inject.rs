//! Block injector. Replaces the doc blocks above a class and its members
//! with content from the definition table.

use crate::defs::{DefinitionEntry, Definitions, MemberEntry};
use crate::error::{Error, Result};
use crate::escape;
use crate::locate::{Declaration, PairMatcher, TextualMatcher};
use std::path::Path;
use tracing::debug;

const MEMBER_INDENT: &str = "  ";

/// What happened to one file's entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InjectStats {
    pub class_replaced: bool,
    pub members_replaced: usize,
    /// Declarations with replacement content but no adjacent doc block.
    pub missed: Vec<String>,
}

impl InjectStats {
    pub fn replaced(&self) -> usize {
        self.members_replaced + usize::from(self.class_replaced)
    }
}

#[derive(Debug)]
pub struct Injected {
    pub content: String,
    pub stats: InjectStats,
}

pub struct Injector<'d, M = TextualMatcher> {
    defs: &'d Definitions,
    matcher: M,
}

impl<'d> Injector<'d> {
    pub fn new(defs: &'d Definitions) -> Self {
        Injector {
            defs,
            matcher: TextualMatcher,
        }
    }
}

impl<'d, M: PairMatcher> Injector<'d, M> {
    pub fn with_matcher(defs: &'d Definitions, matcher: M) -> Self {
        Injector { defs, matcher }
    }

    /// Inject into one file. Returns `Ok(None)` when the file's symbol has no
    /// entry, in which case the content is not inspected at all.
    pub fn inject_file(&self, path: &Path, content: &str) -> Result<Option<Injected>> {
        let Some(symbol) = symbol_for(path) else {
            return Ok(None);
        };
        let Some(entry) = self.defs.get(symbol) else {
            return Ok(None);
        };
        if content.contains("\r\n") {
            return Err(Error::CarriageReturn {
                path: path.to_path_buf(),
            });
        }
        Ok(Some(self.apply(symbol, entry, content)))
    }

    /// Apply one entry to LF-only `content`.
    pub fn apply(&self, symbol: &str, entry: &DefinitionEntry, content: &str) -> Injected {
        let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        let mut stats = InjectStats::default();

        if !entry.class_lines.is_empty() {
            let decl = Declaration::class(symbol);
            if self.replace_class(&mut lines, &decl, &entry.class_lines) {
                stats.class_replaced = true;
            } else {
                debug!(symbol, "no doc block directly above class declaration");
                stats.missed.push(format!("class {symbol}"));
            }
        }

        for (signature, member) in &entry.members {
            if member.lines.is_empty() {
                continue;
            }
            let Some(decl) = Declaration::member(signature) else {
                debug!(symbol, %signature, "skipping blank member signature");
                continue;
            };
            if self.replace_member(&mut lines, &decl, member) {
                stats.members_replaced += 1;
            } else {
                debug!(symbol, %signature, "no doc block directly above member");
                stats.missed.push(format!("{symbol}.{signature}"));
            }
        }

        Injected {
            content: lines.join("\n"),
            stats,
        }
    }

    fn replace_class(&self, lines: &mut Vec<String>, decl: &Declaration<'_>, class_lines: &[String]) -> bool {
        let Some(span) = self.matcher.find(lines.as_slice(), decl) else {
            return false;
        };
        let mut replacement = escape::strip_escapes_all(class_lines);
        replacement.push(lines[span.decl].clone());
        lines.splice(span.open..=span.decl, replacement);
        true
    }

    fn replace_member(&self, lines: &mut Vec<String>, decl: &Declaration<'_>, member: &MemberEntry) -> bool {
        let Some(span) = self.matcher.find(lines.as_slice(), decl) else {
            return false;
        };
        let mut replacement: Vec<String> = member
            .lines
            .iter()
            .map(|line| indent_member_line(&escape::strip_escapes(line)))
            .collect();
        let short = escape::strip_escapes(&member.short);
        let short = short.split_whitespace().collect::<Vec<_>>().join(" ");
        if !short.is_empty() {
            replacement.push(format!("{MEMBER_INDENT}// {short}"));
        }
        replacement.push(lines[span.decl].clone());
        lines.splice(span.open..=span.decl, replacement);
        true
    }
}

fn indent_member_line(line: &str) -> String {
    if line.is_empty() {
        String::new()
    } else {
        format!("{MEMBER_INDENT}{line}")
    }
}

/// Symbol a file's definitions are keyed under: its base name without
/// extension. `src/shape/mxActor.ts` → `mxActor`.
pub fn symbol_for(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn strings(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    fn member(short: &str, lines: &[&str]) -> MemberEntry {
        MemberEntry {
            short: short.to_string(),
            lines: strings(lines),
        }
    }

    fn defs_with(symbol: &str, entry: DefinitionEntry) -> Definitions {
        [(symbol.to_string(), entry)].into_iter().collect()
    }

    #[test]
    fn replaces_class_block() {
        let defs = defs_with(
            "Foo",
            DefinitionEntry {
                class_lines: strings(&["/**", " * A widget."]),
                members: BTreeMap::new(),
            },
        );
        let out = Injector::new(&defs)
            .inject_file(Path::new("src/Foo.js"), "/** old */\nclass Foo {")
            .unwrap()
            .unwrap();
        assert_eq!(out.content, "/**\n * A widget.\nclass Foo {");
        assert!(out.stats.class_replaced);
        assert_eq!(out.stats.replaced(), 1);
    }

    #[test]
    fn replaces_member_block_with_short_description() {
        let mut members = BTreeMap::new();
        members.insert(
            "visit = (visitor) =>;".to_string(),
            member("Visits all entries.", &["/**", " * @param {Function} visitor", " */"]),
        );
        let entry = DefinitionEntry {
            class_lines: Vec::new(),
            members,
        };
        let input = "class mxDictionary {\n  /**\n   * Function: visit\n   */\n  visit = (visitor) => {\n  };\n}\n";
        let defs = defs_with("mxDictionary", entry);
        let out = Injector::new(&defs)
            .inject_file(Path::new("util/mxDictionary.js"), input)
            .unwrap()
            .unwrap();
        assert_eq!(
            out.content,
            "class mxDictionary {\n  /**\n   * @param {Function} visitor\n   */\n  // Visits all entries.\n  visit = (visitor) => {\n  };\n}\n"
        );
        assert_eq!(out.stats.members_replaced, 1);
    }

    #[test]
    fn empty_member_replacement_leaves_block_unchanged() {
        let mut members = BTreeMap::new();
        members.insert("get()".to_string(), member("Gets.", &[]));
        let defs = defs_with(
            "Foo",
            DefinitionEntry {
                class_lines: Vec::new(),
                members,
            },
        );
        let input = "class Foo {\n  /**\n   * Function: get\n   */\n  get() {}\n}\n";
        let out = Injector::new(&defs)
            .inject_file(Path::new("a/Foo.ts"), input)
            .unwrap()
            .unwrap();
        assert_eq!(out.content.as_bytes(), input.as_bytes());
        assert_eq!(out.stats, InjectStats::default());
    }

    #[test]
    fn missing_block_is_counted_not_fatal() {
        let defs = defs_with(
            "Foo",
            DefinitionEntry {
                class_lines: strings(&["/** new */"]),
                members: BTreeMap::new(),
            },
        );
        let input = "// no doc block\nclass Foo {}\n";
        let out = Injector::new(&defs)
            .inject_file(Path::new("a/Foo.js"), input)
            .unwrap()
            .unwrap();
        assert_eq!(out.content, input);
        assert_eq!(out.stats.missed, vec!["class Foo"]);
    }

    #[test]
    fn escape_markers_are_stripped_from_injected_text() {
        let mut members = BTreeMap::new();
        members.insert("x".to_string(), member(r"Arrow \u2192", &[r" /** \x41 */"]));
        let defs = defs_with(
            "Foo",
            DefinitionEntry {
                class_lines: strings(&[r"/** \u00e9 */"]),
                members,
            },
        );
        let input = "/** a */\nclass Foo {\n  /** b */\n  x = 1;\n}";
        let out = Injector::new(&defs)
            .inject_file(Path::new("a/Foo.js"), input)
            .unwrap()
            .unwrap();
        assert_eq!(
            out.content,
            "/** 00e9 */\nclass Foo {\n   /** 41 */\n  // Arrow 2192\n  x = 1;\n}"
        );
        assert!(!out.content.contains(r"\u") && !out.content.contains(r"\x"));
    }

    #[test]
    fn crlf_in_targeted_file_is_rejected() {
        let defs = defs_with("Foo", DefinitionEntry::default());
        let err = Injector::new(&defs)
            .inject_file(Path::new("a/Foo.js"), "/** a */\r\nclass Foo {}\r\n")
            .unwrap_err();
        assert!(matches!(err, Error::CarriageReturn { .. }));
    }

    #[test]
    fn crlf_in_untargeted_file_is_ignored() {
        let defs = defs_with("Foo", DefinitionEntry::default());
        let out = Injector::new(&defs)
            .inject_file(Path::new("a/Bar.js"), "x\r\n")
            .unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn blank_member_signature_is_skipped() {
        let mut members = BTreeMap::new();
        members.insert(";".to_string(), member("Nothing.", &["/** x */"]));
        let defs = defs_with(
            "Foo",
            DefinitionEntry {
                class_lines: Vec::new(),
                members,
            },
        );
        let input = "/** a */\n  ;\n";
        let out = Injector::new(&defs)
            .inject_file(Path::new("a/Foo.js"), input)
            .unwrap()
            .unwrap();
        assert_eq!(out.content, input);
        assert!(out.stats.missed.is_empty());
    }

    #[test]
    fn symbol_is_file_stem() {
        assert_eq!(symbol_for(Path::new("view/mxGraphView.ts")), Some("mxGraphView"));
        assert_eq!(symbol_for(Path::new("mxEvent.js")), Some("mxEvent"));
    }
}
