use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;
use pcre2_sys as ffi;

use crate::common::FlagSet;
use crate::{Error, Result};

bitflags! {
    /// Compile flags of the PCRE2 engine.
    pub struct Flags: u32 {
        /// Character matching should be performed without regard to case.
        const IGNORECASE = ffi::PCRE2_CASELESS;
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::empty()
    }
}

impl FlagSet for Flags {
    const TOKENS: &'static [(&'static str, Self, &'static str)] = &[(
        "ignorecase",
        Flags::IGNORECASE,
        "Character matching should be performed without regard to case.",
    )];

    fn union(self, other: Self) -> Self {
        self | other
    }
}

impl FromStr for Flags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let tokens = s.split_whitespace().collect::<Vec<_>>();

        <super::Pcre2Regex as crate::Engine>::parse_flags(&tokens).map(|(flags, _)| flags)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Flags::IGNORECASE) {
            write!(f, ":ignorecase")?
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        assert_eq!(":ignorecase".parse::<Flags>().unwrap(), Flags::IGNORECASE);
        assert_eq!(Flags::IGNORECASE.to_string(), ":ignorecase");
        assert_eq!(Flags::empty().to_string(), "");

        assert_eq!(
            "ignorecase grep".parse::<Flags>().unwrap_err().to_string(),
            ":grep is not a valid PCRE2 flag.\n  Flags should be from list [:ignorecase]"
        );
    }
}
