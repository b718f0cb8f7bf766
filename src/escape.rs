//! Escape normalizer for injected text.

/// Two-character sequences that would start a unicode or hex escape.
pub const ESCAPE_MARKERS: &[&str] = &["\\u", "\\x"];

/// Delete every escape introducer from `text`. The characters that followed
/// a marker are kept verbatim; nothing is decoded.
///
/// Repeats until no marker is left, since removing `\u` from `\\uu` leaves
/// a fresh `\u` behind.
pub fn strip_escapes(text: &str) -> String {
    let mut current = strip_once(text);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match ESCAPE_MARKERS.iter().find(|m| tail.starts_with(**m)) {
            Some(marker) => rest = &tail[marker.len()..],
            None => {
                out.push('\\');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn strip_escapes_all(lines: &[String]) -> Vec<String> {
    lines.iter().map(|l| strip_escapes(l)).collect()
}
