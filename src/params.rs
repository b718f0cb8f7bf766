//! Parameter line transformer.
//!
//! Rewrites one line of a `Parameters:` section from the informal
//! `* name - description` form into `* @param name description`.

use regex::Regex;
use std::sync::LazyLock;

static RE_PARAM_STRICT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\* ([A-Za-z0-9_]+) - (.*)$").unwrap());

// `A-z` spans the six punctuation characters between `Z` and `a` as well.
static RE_PARAM_LEGACY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\* ([0-9A-z_]+) - (.*)$").unwrap());

/// Which characters a parameter name may consist of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameCharset {
    /// ASCII letters, digits and underscore.
    #[default]
    Strict,
    /// The historical `[0-9A-z_]` range, which also admits `[`, `\`, `]`, `^`
    /// and the backtick.
    Legacy,
}

impl NameCharset {
    fn pattern(self) -> &'static Regex {
        match self {
            NameCharset::Strict => &*RE_PARAM_STRICT,
            NameCharset::Legacy => &*RE_PARAM_LEGACY,
        }
    }
}

/// Rewrite a single parameter line.
///
/// Lines that don't look like `<indent>* <name> - <description>` are returned
/// unchanged, so every input line yields exactly one output line.
pub fn transform_line(line: &str, charset: NameCharset) -> String {
    match charset.pattern().captures(line) {
        Some(caps) => format!("{}* @param {} {}", &caps[1], &caps[2], &caps[3]),
        None => line.to_string(),
    }
}
