mod engine;
mod matches;
mod pattern;

pub use self::engine::{Engine, FlagSet, Search};
pub use self::matches::{Captures, GroupResult, MatchResult};
pub use self::pattern::CompiledPattern;

/// Returns the smallest character boundary of `text` at or after `offset`,
/// or `None` when `offset` lies beyond the end of `text`.
pub(crate) fn align_offset(text: &str, offset: usize) -> Option<usize> {
    if offset > text.len() {
        return None;
    }

    (offset..=text.len()).find(|&off| text.is_char_boundary(off))
}

/// Returns the offset of the character following the one at `offset`.
pub(crate) fn next_char(text: &str, offset: usize) -> usize {
    offset + text[offset..].chars().next().map_or(1, char::len_utf8)
}
