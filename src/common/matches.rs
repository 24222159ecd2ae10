use std::ops::Range;

use derive_more::{Deref, From, Into};

/// Engine-native capture positions of one match.
///
/// Slot 0 holds the whole match, slot `n` the `n`-th capture group,
/// `None` marks a group that did not participate in the match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref, From, Into)]
pub struct Captures(Vec<Option<Range<usize>>>);

impl Captures {
    /// Returns the range of the whole match.
    pub fn span(&self) -> Range<usize> {
        self.0.first().cloned().flatten().unwrap_or(0..0)
    }

    /// Normalizes the captures into a `MatchResult` over `subject`.
    ///
    /// Groups that did not participate in the match are omitted.
    pub fn to_match(&self, subject: &str) -> MatchResult {
        let span = self.span();

        MatchResult {
            begin: span.start,
            end: span.end,
            value: subject[span].to_owned(),
            groups: self
                .0
                .iter()
                .enumerate()
                .skip(1)
                .filter_map(|(index, range)| {
                    range.clone().map(|range| GroupResult {
                        index,
                        begin: range.start,
                        end: range.end,
                        value: subject[range].to_owned(),
                    })
                })
                .collect(),
        }
    }
}

/// One match occurrence, with byte offsets into the subject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    /// The starting byte offset of the match.
    pub begin: usize,
    /// The ending byte offset of the match.
    pub end: usize,
    /// The matched text, `subject[begin..end]`.
    pub value: String,
    /// The participating capture groups, in declaration order.
    pub groups: Vec<GroupResult>,
}

impl MatchResult {
    /// Returns the range over the starting and ending byte offsets of the match.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }

    /// Returns true if the match is zero-width.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns the capture group with the given 1-based index, if it participated.
    pub fn group(&self, index: usize) -> Option<&GroupResult> {
        self.groups.iter().find(|group| group.index == index)
    }
}

impl From<MatchResult> for Range<usize> {
    fn from(m: MatchResult) -> Range<usize> {
        m.range()
    }
}

/// One capture group within a `MatchResult`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupResult {
    /// The 1-based index of the group in the pattern.
    pub index: usize,
    /// The starting byte offset of the group.
    pub begin: usize,
    /// The ending byte offset of the group.
    pub end: usize,
    /// The captured text, `subject[begin..end]`.
    pub value: String,
}

impl GroupResult {
    /// Returns the range over the starting and ending byte offsets of the group.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }
}
