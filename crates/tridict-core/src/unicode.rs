//! Character-level helpers for CJK text.

/// Length in Unicode scalar values. Word-length heuristics count characters, not bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Strip a leading UTF-8 byte order mark, as found at the top of some corpus dumps.
pub fn strip_bom(line: &str) -> &str {
    line.strip_prefix('\u{feff}').unwrap_or(line)
}
