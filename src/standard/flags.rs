use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;

use crate::common::FlagSet;
use crate::{Error, Result};

bitflags! {
    /// Compile flags of the standard engine.
    ///
    /// At most one grammar flag may be set, no grammar flag selects `ECMASCRIPT`.
    pub struct Flags: u32 {
        /// Character matching should be performed without regard to case.
        const IGNORECASE = 1 << 0;
        /// Matching should be faster, at the expense of slower construction.
        const OPTIMIZE = 1 << 1;
        /// Character ranges of the form `[a-b]` should be locale sensitive.
        const COLLATE = 1 << 2;
        /// Perl and ECMAScript like grammar.
        const ECMASCRIPT = 1 << 8;
        /// The basic POSIX grammar.
        const BASIC = 1 << 9;
        /// The extended POSIX grammar.
        const EXTENDED = 1 << 10;
        /// The grammar used by the awk utility in POSIX.
        const AWK = 1 << 11;
        /// The grammar used by the grep utility.
        const GREP = 1 << 12;
        /// The grammar used by the egrep utility.
        const EGREP = 1 << 13;

        /// All grammar flags.
        const GRAMMAR = Self::ECMASCRIPT.bits
            | Self::BASIC.bits
            | Self::EXTENDED.bits
            | Self::AWK.bits
            | Self::GREP.bits
            | Self::EGREP.bits;
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::empty()
    }
}

impl Flags {
    /// Returns the selected grammar.
    pub fn grammar(self) -> Flags {
        match self & Flags::GRAMMAR {
            grammar if grammar.is_empty() => Flags::ECMASCRIPT,
            grammar => grammar,
        }
    }
}

impl FlagSet for Flags {
    const TOKENS: &'static [(&'static str, Self, &'static str)] = &[
        (
            "ignorecase",
            Flags::IGNORECASE,
            "Character matching should be performed without regard to case.",
        ),
        (
            "optimize",
            Flags::OPTIMIZE,
            "Instructs the regular expression engine to make matching faster, at the expense of slower construction.",
        ),
        (
            "collate",
            Flags::COLLATE,
            "Character ranges of the form '[a-b]' will be locale sensitive.",
        ),
        ("ecmascript", Flags::ECMASCRIPT, "Default match type"),
        ("basic", Flags::BASIC, "Use the basic POSIX regular expression grammar."),
        ("extended", Flags::EXTENDED, "Use the extended POSIX regular expression grammar."),
        (
            "awk",
            Flags::AWK,
            "Use the regular expression grammar used by the awk utility in POSIX.",
        ),
        ("grep", Flags::GREP, "Use the regular expression grammar used by the grep utility."),
        ("egrep", Flags::EGREP, "Use the regular expression grammar used by the egrep utility."),
    ];

    fn union(self, other: Self) -> Self {
        self | other
    }

    fn validate(self) -> Result<Self> {
        let mut grammars = Self::TOKENS
            .iter()
            .filter(|&&(_, flag, _)| Flags::GRAMMAR.contains(flag) && self.contains(flag));

        match (grammars.next(), grammars.next()) {
            (Some(&(first, _, _)), Some(&(second, _, _))) => Err(Error::ConflictingFlags {
                engine: <super::StdRegex as crate::Engine>::NAME,
                first,
                second,
            }),
            _ => Ok(self),
        }
    }
}

impl FromStr for Flags {
    type Err = Error;

    /// Parses space or comma separated flag names, e.g. `":ignorecase :grep"`.
    fn from_str(s: &str) -> Result<Self> {
        let tokens = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>();

        <super::StdRegex as crate::Engine>::parse_flags(&tokens).map(|(flags, _)| flags)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names().iter().map(|name| format!(":{}", name)).collect::<Vec<_>>();

        write!(f, "{}", names.join(" "))
    }
}
