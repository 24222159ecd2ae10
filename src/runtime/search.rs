use crate::common::{align_offset, next_char, Engine, MatchResult, Search};
use crate::Result;

/// An iterator over all successive non-overlapping matches in a subject.
///
/// After a zero-width match the iterator first retries at the same offset for a
/// non-empty match, and otherwise moves one character forward, so it always
/// terminates. An engine error is yielded once and ends the iteration.
///
/// `'r` is the lifetime of the compiled engine and `'t` is the lifetime of the subject.
pub struct Matches<'r, 't, E> {
    engine: &'r E,
    text: &'t str,
    state: State,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Search forward from the offset.
    Search(usize),
    /// The last match was empty at the offset.
    AfterEmpty(usize),
    Done,
}

/// Returns an iterator over every non-overlapping match of `engine` in `subject`,
/// starting at `start`.
pub fn search_all<'r, 't, E: Engine>(engine: &'r E, subject: &'t str, start: usize) -> Matches<'r, 't, E> {
    let state = align_offset(subject, start).map_or(State::Done, State::Search);

    Matches {
        engine,
        text: subject,
        state,
    }
}

impl<'r, 't, E> Matches<'r, 't, E> {
    /// Return the text being searched.
    pub fn text(&self) -> &'t str {
        self.text
    }
}

impl<'r, 't, E: Engine> Matches<'r, 't, E> {
    fn step(&mut self) -> Result<Option<MatchResult>> {
        loop {
            let (pos, captures) = match self.state {
                State::Done => return Ok(None),
                State::Search(pos) => (pos, self.engine.exec(self.text, pos, Search::Unanchored)?),
                State::AfterEmpty(pos) if pos >= self.text.len() => return Ok(None),
                State::AfterEmpty(pos) => match self.engine.exec(self.text, pos, Search::NonEmptyAtStart)? {
                    Some(captures) if !captures.span().is_empty() => (pos, Some(captures)),
                    _ => {
                        self.state = State::Search(next_char(self.text, pos));
                        continue;
                    }
                },
            };

            let captures = match captures {
                Some(captures) => captures,
                None => return Ok(None),
            };

            let span = captures.span();

            self.state = if span.start == span.end {
                State::AfterEmpty(span.end)
            } else if span.end <= pos {
                State::Search(next_char(self.text, pos))
            } else {
                State::Search(span.end)
            };

            trace!("{} matched {:?} searching from {}", E::NAME, span, pos);

            return Ok(Some(captures.to_match(self.text)));
        }
    }
}

impl<'r, 't, E: Engine> Iterator for Matches<'r, 't, E> {
    type Item = Result<MatchResult>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Some(m)) => Some(Ok(m)),
            Ok(None) => {
                self.state = State::Done;
                None
            }
            Err(err) => {
                self.state = State::Done;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use regex::Regex;

    use crate::prelude::*;
    use crate::standard::Flags as StdFlags;
    use crate::tests::*;

    use super::*;

    fn ranges<E: Engine>(engine: &E, subject: &str, start: usize) -> Vec<(usize, usize)> {
        let matches = search_all(engine, subject, start).collect::<Result<Vec<_>>>().unwrap();

        validate_matches(subject, &matches);

        matches.iter().map(|m| (m.begin, m.end)).collect()
    }

    #[test]
    fn test_empty_matches_advance() {
        let _ = pretty_env_logger::try_init();

        let expected = vec![(0, 0), (1, 1), (2, 2), (3, 3)];

        let re = StdRegex::compile("a*", StdFlags::empty()).unwrap();
        assert_eq!(ranges(&re, "bbb", 0), expected);

        let re = Pcre2Regex::compile("a*", Default::default()).unwrap();
        assert_eq!(ranges(&re, "bbb", 0), expected);
    }

    #[test]
    fn test_empty_then_non_empty_at_same_offset() {
        let expected = vec![(0, 2), (2, 2), (3, 4), (4, 4)];

        let re = Pcre2Regex::compile("a*", Default::default()).unwrap();
        assert_eq!(ranges(&re, "aaba", 0), expected);

        let re = StdRegex::compile("a*", StdFlags::empty()).unwrap();
        assert_eq!(ranges(&re, "aaba", 0), expected);
    }

    #[test]
    fn test_empty_matches_advance_by_character() {
        let subject = "é€x";

        let re = Pcre2Regex::compile("", Default::default()).unwrap();
        assert_eq!(ranges(&re, subject, 0), vec![(0, 0), (2, 2), (5, 5), (6, 6)]);

        let re = StdRegex::compile("", StdFlags::empty()).unwrap();
        assert_eq!(ranges(&re, subject, 0), vec![(0, 0), (2, 2), (5, 5), (6, 6)]);
    }

    #[test]
    fn test_empty_subject() {
        let re = Pcre2Regex::compile("x*", Default::default()).unwrap();
        assert_eq!(ranges(&re, "", 0), vec![(0, 0)]);

        let re = Pcre2Regex::compile("x", Default::default()).unwrap();
        assert_eq!(ranges(&re, "", 0), vec![]);
    }

    #[test]
    fn test_search_from_offset() {
        let re = Pcre2Regex::compile(r"\d+", Default::default()).unwrap();

        assert_eq!(ranges(&re, "1 22 333", 2), vec![(2, 4), (5, 8)]);
        assert_eq!(ranges(&re, "1 22 333", 9), vec![]);
    }

    #[test]
    fn test_agrees_with_regex_crate() {
        let subject = "The quick brown fox, 42 jumps over 7 lazy dogs;  and   9 more words too.";

        for pattern in &[r"\w+", r"\d*", r"[aeiou]", r"o\w?", r"\s*"] {
            let expected = Regex::new(pattern)
                .unwrap()
                .find_iter(subject)
                .map(|m| (m.start(), m.end()))
                .collect::<Vec<_>>();

            let re = Pcre2Regex::compile(pattern, Default::default()).unwrap();
            let found = ranges(&re, subject, 0);

            // the regex crate skips an empty match adjacent to the previous match
            let found = found
                .iter()
                .enumerate()
                .filter(|&(i, &(b, e))| !(b == e && i > 0 && found[i - 1].1 == b))
                .map(|(_, &r)| r)
                .collect::<Vec<_>>();

            assert_eq!(found, expected, "pattern: {}", pattern);
        }
    }

    #[test]
    fn test_captures_are_reported() {
        let re = Pcre2Regex::compile(r"(\w+)=(\d+)?", Default::default()).unwrap();
        let subject = "a=1 b= c=33";

        let matches = search_all(&re, subject, 0).collect::<Result<Vec<_>>>().unwrap();

        validate_matches(subject, &matches);

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].groups.len(), 2);
        assert_eq!(matches[1].groups.len(), 1);
        assert_eq!(matches[1].group(1).map(|g| g.value.as_str()), Some("b"));
        assert_eq!(matches[2].group(2).map(|g| g.range()), Some(9..11));
    }
}
