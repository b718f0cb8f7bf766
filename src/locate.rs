//! Adjacent-pair matcher: finds a `/** ... */` block whose closing line is
//! directly followed by a given declaration.
//!
//! Matching is textual. A block-plus-declaration that happens to sit inside a
//! string literal matches just the same; a tokenizing matcher can be dropped in
//! behind [`PairMatcher`] without touching the injector.

const OPEN: &str = "/**";
const CLOSE: &str = "*/";

const CLASS_KEYWORD: &str = "class";
const MEMBER_INDENT: &str = "  ";

/// The declaration a doc block must sit directly above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration<'a> {
    /// `class <name>` at column 0.
    Class { name: &'a str },
    /// `  <signature>` at exactly two spaces of indentation.
    Member { signature: &'a str },
}

impl<'a> Declaration<'a> {
    pub fn class(name: &'a str) -> Self {
        Declaration::Class { name }
    }

    /// Build a member declaration, trimming whitespace and trailing `;`.
    /// Returns `None` when nothing is left.
    pub fn member(signature: &'a str) -> Option<Self> {
        let signature = signature.trim().trim_end_matches(';').trim_end();
        if signature.is_empty() {
            None
        } else {
            Some(Declaration::Member { signature })
        }
    }

    /// Indentation shared by the block's open line and the declaration.
    pub fn indent(&self) -> &'static str {
        match self {
            Declaration::Class { .. } => "",
            Declaration::Member { .. } => MEMBER_INDENT,
        }
    }

    fn matches(&self, line: &str) -> bool {
        let Some(rest) = strip_indent(line, self.indent()) else {
            return false;
        };
        match self {
            Declaration::Class { name } => {
                let Some(after_kw) = rest.strip_prefix(CLASS_KEYWORD) else {
                    return false;
                };
                if !after_kw.starts_with(char::is_whitespace) {
                    return false;
                }
                after_kw
                    .trim_start()
                    .strip_prefix(name)
                    .is_some_and(ends_identifier)
            }
            Declaration::Member { signature } => match rest.strip_prefix(signature) {
                Some(after) if signature.ends_with(is_ident_char) => ends_identifier(after),
                Some(_) => true,
                None => false,
            },
        }
    }

    fn opens_block(&self, line: &str) -> bool {
        strip_indent(line, self.indent()).is_some_and(|rest| rest.starts_with(OPEN))
    }
}

/// Line range of a matched block: `open..=decl`, declaration line included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub open: usize,
    pub decl: usize,
}

impl BlockSpan {
    pub fn block_len(&self) -> usize {
        self.decl - self.open
    }
}

/// Locates the first doc block directly preceding a declaration.
pub trait PairMatcher {
    fn find(&self, lines: &[String], decl: &Declaration<'_>) -> Option<BlockSpan>;
}

/// Line-based matcher with no knowledge of the host language's strings or
/// comments beyond the two markers.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextualMatcher;

impl PairMatcher for TextualMatcher {
    fn find(&self, lines: &[String], decl: &Declaration<'_>) -> Option<BlockSpan> {
        (1..lines.len())
            .filter(|&i| decl.matches(&lines[i]))
            .find_map(|i| {
                let close = i - 1;
                if !lines[close].trim_end().ends_with(CLOSE) {
                    return None;
                }
                find_open(lines, close, decl).map(|open| BlockSpan { open, decl: i })
            })
    }
}

/// Walk back from the closing line to the matching open line. Any earlier
/// line that closes a comment means the blocks aren't one span.
fn find_open(lines: &[String], close: usize, decl: &Declaration<'_>) -> Option<usize> {
    if decl.opens_block(&lines[close]) {
        return Some(close);
    }
    for j in (0..close).rev() {
        let line = &lines[j];
        if line.contains(CLOSE) {
            return None;
        }
        if decl.opens_block(line) {
            return Some(j);
        }
    }
    None
}

/// Strip exactly `indent`; the next character must not be more whitespace.
fn strip_indent<'l>(line: &'l str, indent: &str) -> Option<&'l str> {
    line.strip_prefix(indent)
        .filter(|rest| !rest.starts_with(char::is_whitespace))
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn ends_identifier(rest: &str) -> bool {
    !rest.starts_with(is_ident_char)
}
