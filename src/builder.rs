use std::marker::PhantomData;

use crate::common::{CompiledPattern, Engine, FlagSet};
use crate::{pcre2, standard, Result};

/// A configurable builder for a compiled pattern.
///
/// A builder can be used to configure how the pattern is built,
/// for example, by setting the case-insensitive flag or choosing a grammar.
pub struct Builder<E: Engine> {
    expr: String,
    flags: E::Flags,
    names: Vec<String>,
    phantom: PhantomData<E>,
}

impl<E: Engine> Builder<E> {
    /// Create a new builder with the given pattern.
    ///
    /// If the pattern is invalid, then an error will be returned when build is called.
    pub fn new<S: Into<String>>(pattern: S) -> Self {
        Builder {
            expr: pattern.into(),
            flags: E::Flags::default(),
            names: Vec::new(),
            phantom: PhantomData,
        }
    }

    /// Add flags given as keyword tokens, e.g. `":ignorecase"`.
    pub fn flags<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<&mut Self> {
        let (flags, names) = E::parse_flags(tokens)?;

        self.flags = self.flags.union(flags);
        self.names.extend(names);
        self.sync_names();

        Ok(self)
    }

    /// Consume the builder and compile the pattern.
    ///
    /// Flags are listed in the order they were first set.
    pub fn build(&self) -> Result<CompiledPattern<E>> {
        CompiledPattern::new(&self.expr, &self.names)
    }

    // drops names of cleared flags and appends newly set ones
    fn sync_names(&mut self) {
        let flags = self.flags;
        let mut names: Vec<String> = Vec::with_capacity(self.names.len());

        for name in self.names.drain(..).chain(flags.names()) {
            let set = E::Flags::from_token(&name).map_or(false, |flag| flags.union(flag) == flags);

            if set && !names.contains(&name) {
                names.push(name);
            }
        }

        self.names = names;
    }
}

impl Builder<standard::StdRegex> {
    fn toggle(&mut self, flag: standard::Flags, yes: bool) -> &mut Self {
        if yes {
            self.flags.insert(flag)
        } else {
            self.flags.remove(flag)
        }
        self.sync_names();
        self
    }

    /// Set the value for the case insensitive flag.
    ///
    /// When enabled, letters in the pattern will match both upper case and lower case variants.
    pub fn case_insensitive(&mut self, yes: bool) -> &mut Self {
        self.toggle(standard::Flags::IGNORECASE, yes)
    }

    /// Select the grammar of the pattern, replacing any grammar set before.
    pub fn grammar(&mut self, grammar: standard::Flags) -> &mut Self {
        self.toggle(standard::Flags::GRAMMAR, false)
            .toggle(grammar & standard::Flags::GRAMMAR, true)
    }
}

impl Builder<pcre2::Pcre2Regex> {
    /// Set the value for the case insensitive flag.
    ///
    /// When enabled, letters in the pattern will match both upper case and lower case variants.
    pub fn case_insensitive(&mut self, yes: bool) -> &mut Self {
        self.flags.set(pcre2::Flags::IGNORECASE, yes);
        self.sync_names();
        self
    }
}
