use crate::common::Engine;
use crate::runtime::search_all;
use crate::Result;

/// Replaces the first, or every, match of `engine` in `subject` with `replacement`.
///
/// The replacement is inserted verbatim, with no group references expanded.
/// Text between matches is copied unchanged, and an unmatched subject is returned as is.
pub fn substitute<E: Engine>(engine: &E, subject: &str, replacement: &str, all: bool) -> Result<String> {
    let mut out = String::with_capacity(subject.len());
    let mut last = 0;

    for m in search_all(engine, subject, 0).take(if all { usize::MAX } else { 1 }) {
        let m = m?;

        out.push_str(&subject[last..m.begin]);
        out.push_str(replacement);

        last = m.end;
    }

    out.push_str(&subject[last..]);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::standard::Flags as StdFlags;

    use super::*;

    #[test]
    fn test_substitute_first_and_all() {
        let _ = pretty_env_logger::try_init();

        let re = StdRegex::compile("o", StdFlags::empty()).unwrap();

        assert_eq!(substitute(&re, "foo boo", "0", false).unwrap(), "f0o boo");
        assert_eq!(substitute(&re, "foo boo", "0", true).unwrap(), "f00 b00");
        assert_eq!(substitute(&re, "xyz", "0", true).unwrap(), "xyz");
    }

    #[test]
    fn test_substitute_is_literal() {
        let re = StdRegex::compile(r"(\w+)", StdFlags::empty()).unwrap();

        assert_eq!(substitute(&re, "ab cd", r"[$1\1]", true).unwrap(), r"[$1\1] [$1\1]");
    }

    #[test]
    fn test_substitute_empty_matches() {
        let re = StdRegex::compile("x*", StdFlags::empty()).unwrap();

        assert_eq!(substitute(&re, "abc", "-", true).unwrap(), "-a-b-c-");
        assert_eq!(substitute(&re, "axc", "-", true).unwrap(), "-a--c-");
        assert_eq!(substitute(&re, "", "-", true).unwrap(), "-");
    }
}
