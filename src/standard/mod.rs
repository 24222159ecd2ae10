//! The standard engine: Oniguruma with selectable grammars.

mod flags;
mod regex;

pub use self::flags::Flags;
pub use self::regex::StdRegex;
