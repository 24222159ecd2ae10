use std::fmt;

use crate::common::Captures;
use crate::{runtime, Error, Result};

/// How a single match attempt is anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Search {
    /// Search forward from the start offset.
    Unanchored,
    /// The match must start at the start offset and must not be empty.
    NonEmptyAtStart,
    /// The match must start at the start offset and end at the end of the subject.
    Whole,
}

/// A typed set of compile flags, named by keyword tokens.
pub trait FlagSet: Copy + Default + fmt::Debug + PartialEq + 'static {
    /// Keyword, flag and description of every accepted token, in display order.
    const TOKENS: &'static [(&'static str, Self, &'static str)];

    /// The union of two flag sets.
    fn union(self, other: Self) -> Self;

    /// Looks up a single keyword, with or without the leading `:`.
    fn from_token(token: &str) -> Option<Self> {
        let token = token.strip_prefix(':').unwrap_or(token);

        Self::TOKENS
            .iter()
            .find(|&&(name, _, _)| name == token)
            .map(|&(_, flag, _)| flag)
    }

    /// The accepted tokens, formatted as `[:a :b]`.
    fn allowed() -> String {
        let tokens = Self::TOKENS
            .iter()
            .map(|(name, _, _)| format!(":{}", name))
            .collect::<Vec<_>>();

        format!("[{}]", tokens.join(" "))
    }

    /// The names of the tokens contained in this set.
    fn names(self) -> Vec<String> {
        Self::TOKENS
            .iter()
            .filter(|&&(_, flag, _)| flag != Self::default() && self.union(flag) == self)
            .map(|(name, _, _)| (*name).to_owned())
            .collect()
    }

    /// Checks combinations of flags that may not be used together.
    fn validate(self) -> Result<Self> {
        Ok(self)
    }
}

/// A regular expression engine adapter.
///
/// An engine owns its compiled state exclusively. Matching never mutates it, so
/// a compiled engine may be shared between threads.
pub trait Engine: Sized {
    /// The engine specific flag set.
    type Flags: FlagSet;

    /// Name of the engine
    const NAME: &'static str;

    /// Compiles `expr` once with the given flags.
    fn compile(expr: &str, flags: Self::Flags) -> Result<Self>;

    /// Runs exactly one match attempt at `start`, which must be a character boundary of `subject`.
    ///
    /// The returned captures hold one slot per capture group, slot 0 being the whole match.
    fn exec(&self, subject: &str, start: usize, search: Search) -> Result<Option<Captures>>;

    /// Replaces the first, or every, match in `subject` with the verbatim `replacement`.
    fn substitute(&self, subject: &str, replacement: &str, all: bool) -> Result<String> {
        runtime::substitute(self, subject, replacement, all)
    }

    /// Parses flag tokens into the engine's flag set and the normalized token names.
    ///
    /// Names keep the order of the arguments, duplicated tokens are recorded once.
    fn parse_flags<S: AsRef<str>>(tokens: &[S]) -> Result<(Self::Flags, Vec<String>)> {
        let mut flags = Self::Flags::default();
        let mut names = Vec::with_capacity(tokens.len());

        for token in tokens {
            let token = token.as_ref();
            let name = token.strip_prefix(':').unwrap_or(token);
            let flag = Self::Flags::from_token(name).ok_or_else(|| Error::InvalidFlag {
                engine: Self::NAME,
                flag: name.to_owned(),
                allowed: Self::Flags::allowed(),
            })?;

            flags = flags.union(flag);

            if !names.iter().any(|n| n == name) {
                names.push(name.to_owned());
            }
        }

        Ok((flags.validate()?, names))
    }
}
