//! Line-mode scanner, a three-state machine over the lines of one file.
//!
//! Only lines inside a `* Parameters:` section of a `/**` comment are handed
//! to the parameter transformer; everything else is copied through as-is.

use crate::params::{self, NameCharset};

const COMMENT_OPEN: &str = "/**";
const COMMENT_CLOSE: &str = "*/";
const PARAMS_MARKER: &str = "* Parameters:";
const BARE_CONTINUATION: &str = "*";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Outside any tracked comment.
    #[default]
    Between,
    /// Inside a comment, before the parameter marker.
    CommentOpen,
    /// Inside the parameter section.
    Params,
}

#[derive(Debug, Default)]
pub struct Scanner {
    mode: Mode,
    charset: NameCharset,
}

impl Scanner {
    pub fn new(charset: NameCharset) -> Self {
        Scanner {
            mode: Mode::Between,
            charset,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Feed one line, returning the line to emit in its place.
    pub fn feed(&mut self, line: &str) -> String {
        let marker = line.trim();
        match self.mode {
            Mode::Between => {
                if marker == COMMENT_OPEN {
                    self.mode = Mode::CommentOpen;
                }
                line.to_string()
            }
            Mode::CommentOpen => {
                if marker == PARAMS_MARKER {
                    self.mode = Mode::Params;
                }
                line.to_string()
            }
            Mode::Params => {
                if marker == COMMENT_CLOSE {
                    self.mode = Mode::Between;
                    line.to_string()
                } else if marker == BARE_CONTINUATION {
                    line.to_string()
                } else {
                    params::transform_line(line, self.charset)
                }
            }
        }
    }
}

/// Run a fresh scanner over `lines`.
pub fn scan_lines<'a, I>(lines: I, charset: NameCharset) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scanner = Scanner::new(charset);
    lines.into_iter().map(|line| scanner.feed(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Vec<String> {
        scan_lines(input.lines(), NameCharset::Strict)
    }

    #[test]
    fn rewrites_inside_parameter_section() {
        let input = "\
/**
 * Constructs a new actor shape.
 *
 * Parameters:
 *
 * bounds - <mxRectangle> that defines the bounds.
 * fill - String that defines the fill color.
 */
class mxActor {}";
        assert_eq!(
            scan(input),
            vec![
                "/**",
                " * Constructs a new actor shape.",
                " *",
                " * Parameters:",
                " *",
                " * @param bounds <mxRectangle> that defines the bounds.",
                " * @param fill String that defines the fill color.",
                " */",
                "class mxActor {}",
            ]
        );
    }

    #[test]
    fn lines_outside_parameter_section_are_untouched() {
        let input = "\
// * node - not in a comment
/**
 * node - still before the marker
 */
const x = 1;";
        let out = scan(input);
        assert_eq!(out, input.lines().collect::<Vec<_>>());
    }

    #[test]
    fn close_marker_ends_parameter_section() {
        let input = "\
  /**
   * Parameters:
   *
   * key - The key.
   */
   * value - after the close";
        let out = scan(input);
        assert_eq!(out[3], "   * @param key The key.");
        assert_eq!(out[5], "   * value - after the close");
    }

    #[test]
    fn bare_continuation_never_altered() {
        let mut scanner = Scanner::new(NameCharset::Strict);
        scanner.feed("/**");
        scanner.feed("* Parameters:");
        assert_eq!(scanner.mode(), Mode::Params);
        assert_eq!(scanner.feed("   *   "), "   *   ");
        assert_eq!(scanner.mode(), Mode::Params);
    }

    #[test]
    fn indented_comment_open_is_recognized() {
        let mut scanner = Scanner::new(NameCharset::Strict);
        scanner.feed("    /**  ");
        assert_eq!(scanner.mode(), Mode::CommentOpen);
    }

    #[test]
    fn open_marker_with_text_is_not_an_open() {
        let mut scanner = Scanner::new(NameCharset::Strict);
        scanner.feed("/** Class: mxActor");
        assert_eq!(scanner.mode(), Mode::Between);
    }

    #[test]
    fn comment_without_parameters_keeps_waiting_for_marker() {
        let input = "\
/**
 * Nothing here.
 */
function a() {}
/**
 * Parameters:
 *
 * b - The b.
 */";
        let out = scan(input);
        assert_eq!(out[2], " */");
        assert_eq!(out[7], " * @param b The b.");
    }

    #[test]
    fn unterminated_section_runs_to_end_of_file() {
        let out = scan("/**\n * Parameters:\n * x - The x.");
        assert_eq!(out[2], " * @param x The x.");
    }
}
