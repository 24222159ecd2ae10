use std::fmt;
use std::result::Result as StdResult;
use std::sync::OnceLock;

use onig::{Region, RegexOptions, SearchOptions, Syntax};

use crate::common::{Captures, Engine, Search};
use crate::standard::Flags;
use crate::{CompileError, Result};

/// A compiled Oniguruma regular expression.
///
/// The variant used for non-empty matching is compiled on first use and kept
/// for the lifetime of the regex.
pub struct StdRegex {
    regex: onig::Regex,
    expr: String,
    flags: Flags,
    not_empty: OnceLock<StdResult<onig::Regex, CompileError>>,
}

impl fmt::Debug for StdRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRegex")
            .field("expr", &self.expr)
            .field("flags", &self.flags)
            .finish()
    }
}

fn syntax(grammar: Flags) -> &'static Syntax {
    match grammar {
        Flags::BASIC => Syntax::posix_basic(),
        Flags::EXTENDED | Flags::AWK => Syntax::posix_extended(),
        Flags::GREP => Syntax::grep(),
        Flags::EGREP => Syntax::gnu_regex(),
        _ => Syntax::perl_ng(),
    }
}

fn options(flags: Flags) -> RegexOptions {
    let mut options = RegexOptions::REGEX_OPTION_CAPTURE_GROUP;

    if flags.contains(Flags::IGNORECASE) {
        options |= RegexOptions::REGEX_OPTION_IGNORECASE;
    }

    options
}

fn build(pattern: &str, expr: &str, flags: Flags, extra: RegexOptions) -> StdResult<onig::Regex, CompileError> {
    onig::Regex::with_options(pattern, options(flags) | extra, syntax(flags.grammar())).map_err(|err| CompileError {
        engine: StdRegex::NAME,
        pattern: expr.to_owned(),
        offset: None,
        message: err.description().to_owned(),
    })
}

impl StdRegex {
    /// Returns the flags the regex was compiled with.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Returns the number of capture groups in the pattern.
    pub fn captures_len(&self) -> usize {
        self.regex.captures_len()
    }

    fn not_empty(&self) -> Result<&onig::Regex> {
        self.not_empty
            .get_or_init(|| {
                trace!("compile not-empty variant of `{}`", self.expr);

                build(&self.expr, &self.expr, self.flags, RegexOptions::REGEX_OPTION_FIND_NOT_EMPTY)
            })
            .as_ref()
            .map_err(|err| err.clone().into())
    }

    fn captures(&self, region: &Region) -> Captures {
        (0..=self.captures_len())
            .map(|i| region.pos(i).map(|(begin, end)| begin..end))
            .collect::<Vec<_>>()
            .into()
    }
}

impl Engine for StdRegex {
    type Flags = Flags;

    const NAME: &'static str = "standard";

    fn compile(expr: &str, flags: Flags) -> Result<Self> {
        let regex = build(expr, expr, flags, RegexOptions::REGEX_OPTION_NONE)?;

        Ok(StdRegex {
            regex,
            expr: expr.to_owned(),
            flags,
            not_empty: OnceLock::new(),
        })
    }

    fn exec(&self, subject: &str, start: usize, search: Search) -> Result<Option<Captures>> {
        let mut region = Region::new();

        trace!("{:?} `{}` from {}", search, self.expr, start);

        let matched = match search {
            Search::Unanchored => self
                .regex
                .search_with_options(
                    subject,
                    start,
                    subject.len(),
                    SearchOptions::SEARCH_OPTION_NONE,
                    Some(&mut region),
                )
                .is_some(),
            Search::NonEmptyAtStart => self
                .not_empty()?
                .match_with_options(subject, start, SearchOptions::SEARCH_OPTION_NONE, Some(&mut region))
                .is_some(),
            // a match that stops short of the end backtracks into the next alternative
            Search::Whole => self
                .regex
                .match_with_options(subject, start, SearchOptions::SEARCH_OPTION_WHOLE_STRING, Some(&mut region))
                .is_some(),
        };

        Ok(if matched { Some(self.captures(&region)) } else { None })
    }
}
