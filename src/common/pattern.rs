use std::fmt;

use crate::common::{Engine, FlagSet, MatchResult};
use crate::{runtime, Error, Result};

/// A compiled regular expression together with the text and flags it was built from.
///
/// The pattern owns its engine state exclusively. `release` frees it early and may be
/// called any number of times; dropping the pattern releases it as well.
pub struct CompiledPattern<E: Engine> {
    expression: String,
    flags: Vec<String>,
    engine: Option<E>,
}

impl<E: Engine> CompiledPattern<E> {
    /// Compiles `expr` with flags given as keyword tokens, e.g. `["ignorecase"]`.
    ///
    /// Every token must belong to the engine's allowed set.
    pub fn new<S: AsRef<str>>(expr: &str, tokens: &[S]) -> Result<Self> {
        let (flags, names) = E::parse_flags(tokens)?;

        Self::build(expr, flags, names)
    }

    /// Compiles `expr` with a typed flag set.
    pub fn with_flags(expr: &str, flags: E::Flags) -> Result<Self> {
        let flags = flags.validate()?;

        Self::build(expr, flags, flags.names())
    }

    fn build(expr: &str, flags: E::Flags, names: Vec<String>) -> Result<Self> {
        let engine = E::compile(expr, flags)?;

        debug!("{} pattern `{}` compiled with flags {:?}", E::NAME, expr, names);

        Ok(CompiledPattern {
            expression: expr.to_owned(),
            flags: names,
            engine: Some(engine),
        })
    }

    /// Returns the original pattern text, or an empty string once released.
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// Returns the normalized flag names the pattern was compiled with.
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Returns the compiled engine state.
    pub fn engine(&self) -> Result<&E> {
        self.engine.as_ref().ok_or(Error::Released)
    }

    /// Returns true once the engine state has been released.
    pub fn is_released(&self) -> bool {
        self.engine.is_none()
    }

    /// Frees the engine state and the stored text and flags.
    ///
    /// Subsequent calls are no-ops.
    pub fn release(&mut self) {
        if let Some(engine) = self.engine.take() {
            trace!("release {} pattern `{}`", E::NAME, self.expression);

            drop(engine);

            self.expression = String::new();
            self.flags = Vec::new();
        }
    }

    /// Returns true if the pattern matches anywhere in `subject` at or after `start`.
    pub fn is_match_at(&self, subject: &str, start: usize) -> Result<bool> {
        runtime::try_match(self.engine()?, subject, start, false).map(|m| m.is_some())
    }

    /// Returns true if the pattern matches anywhere in `subject`.
    pub fn is_match(&self, subject: &str) -> Result<bool> {
        self.is_match_at(subject, 0)
    }

    /// Matches the pattern against the whole of `subject` from `start` to its end.
    pub fn match_whole_at(&self, subject: &str, start: usize) -> Result<Option<MatchResult>> {
        runtime::try_match(self.engine()?, subject, start, true)
    }

    /// Matches the pattern against the whole of `subject`.
    pub fn match_whole(&self, subject: &str) -> Result<Option<MatchResult>> {
        self.match_whole_at(subject, 0)
    }

    /// Returns the first match in `subject` at or after `start`.
    pub fn find_at(&self, subject: &str, start: usize) -> Result<Option<MatchResult>> {
        runtime::try_match(self.engine()?, subject, start, false)
    }

    /// Returns the first match in `subject`.
    pub fn find(&self, subject: &str) -> Result<Option<MatchResult>> {
        self.find_at(subject, 0)
    }

    /// Returns an iterator over the successive non-overlapping matches in `subject`,
    /// starting at `start`.
    pub fn find_iter<'r, 't>(&'r self, subject: &'t str, start: usize) -> Result<runtime::Matches<'r, 't, E>> {
        Ok(runtime::search_all(self.engine()?, subject, start))
    }

    /// Collects every non-overlapping match in `subject`.
    pub fn find_all(&self, subject: &str) -> Result<Vec<MatchResult>> {
        self.find_iter(subject, 0)?.collect()
    }

    /// Replaces the first match in `subject` with `replacement`, inserted verbatim.
    pub fn replace(&self, subject: &str, replacement: &str) -> Result<String> {
        self.engine()?.substitute(subject, replacement, false)
    }

    /// Replaces every match in `subject` with `replacement`, inserted verbatim.
    pub fn replace_all(&self, subject: &str, replacement: &str) -> Result<String> {
        self.engine()?.substitute(subject, replacement, true)
    }
}

impl<E: Engine> Drop for CompiledPattern<E> {
    fn drop(&mut self) {
        self.release()
    }
}

impl<E: Engine> fmt::Display for CompiledPattern<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_released() {
            return f.write_str("no pattern");
        }

        write!(f, "pattern: '{}' flags: (", self.expression)?;

        for (i, flag) in self.flags.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, ":{}", flag)?;
        }

        f.write_str(")")
    }
}

impl<E: Engine> fmt::Debug for CompiledPattern<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("engine", &E::NAME)
            .field("expression", &self.expression)
            .field("flags", &self.flags)
            .field("released", &self.is_released())
            .finish()
    }
}
