mod replace;
mod search;

pub use self::replace::substitute;
pub use self::search::{search_all, Matches};

use crate::common::{align_offset, Engine, MatchResult, Search};
use crate::Result;

/// Runs a single match attempt of `engine` over `subject` from `start`.
///
/// With `whole` set the match must span from `start` to the end of `subject`,
/// otherwise the first match at or after `start` is returned.
/// A `start` beyond the end of `subject` never matches.
pub fn try_match<E: Engine>(engine: &E, subject: &str, start: usize, whole: bool) -> Result<Option<MatchResult>> {
    let start = match align_offset(subject, start) {
        Some(start) => start,
        None => return Ok(None),
    };
    let search = if whole { Search::Whole } else { Search::Unanchored };

    Ok(engine.exec(subject, start, search)?.map(|captures| captures.to_match(subject)))
}

#[cfg(test)]
pub mod tests {
    use crate::prelude::*;

    use super::*;

    #[test]
    fn test_try_match_anchoring() {
        let _ = pretty_env_logger::try_init();

        let re = StdRegex::compile("b", Default::default()).unwrap();

        assert_eq!(try_match(&re, "abc", 0, true).unwrap(), None);
        assert_eq!(try_match(&re, "abc", 0, false).unwrap().map(|m| m.begin), Some(1));
        assert_eq!(try_match(&re, "abc", 4, false).unwrap(), None);

        let re = Pcre2Regex::compile("b", Default::default()).unwrap();

        assert_eq!(try_match(&re, "abc", 0, true).unwrap(), None);
        assert_eq!(try_match(&re, "abc", 0, false).unwrap().map(|m| m.begin), Some(1));
        assert_eq!(try_match(&re, "abc", 2, false).unwrap(), None);
    }

    #[test]
    fn test_try_match_whole_from_offset() {
        let re = Pcre2Regex::compile(r"\d+", Default::default()).unwrap();

        let m = try_match(&re, "ab123", 2, true).unwrap().unwrap();

        assert_eq!(m.range(), 2..5);
        assert_eq!(try_match(&re, "ab123x", 2, true).unwrap(), None);

        let re = StdRegex::compile(r"\d+", Default::default()).unwrap();

        let m = try_match(&re, "ab123", 2, true).unwrap().unwrap();

        assert_eq!(m.range(), 2..5);
        assert_eq!(try_match(&re, "ab123x", 2, true).unwrap(), None);
    }

    #[test]
    fn test_try_match_unaligned_start() {
        let re = Pcre2Regex::compile(".", Default::default()).unwrap();

        // offset 2 falls inside `ñ`, the search resumes at the next character
        let m = try_match(&re, "añb", 2, false).unwrap().unwrap();

        assert_eq!(m.value, "b");
        assert_eq!(m.begin, 3);
    }
}
