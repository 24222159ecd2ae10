//! Two regular expression engines behind one match protocol.
//!
//! `dualre` exposes a backtracking engine with selectable grammars (Oniguruma) and
//! PCRE2 (with its JIT compiler when available) through the same compiled-pattern
//! handle, the same normalized `MatchResult` shape and the same global search and
//! substitution semantics. The `lua` module turns both into a Lua module.
//!
//! # Examples
//!
//! ```
//! use dualre::prelude::*;
//!
//! let pattern = Pcre2Pattern::new(r"(\w+)@(\w+)", &["ignorecase"]).unwrap();
//!
//! let m = pattern.find("mail ME@HOST now").unwrap().unwrap();
//! assert_eq!(m.begin, 5);
//! assert_eq!(m.value, "ME@HOST");
//! assert_eq!(m.groups[1].value, "HOST");
//!
//! let all = pattern.find_all("a@b c@d").unwrap();
//! assert_eq!(all.len(), 2);
//! ```
#![deny(missing_docs, rust_2018_compatibility, rust_2018_idioms)]

#[macro_use]
extern crate log;

mod builder;
mod common;
mod error;
pub mod lua;
pub mod pcre2;
mod runtime;
pub mod standard;

pub use crate::builder::Builder;
pub use crate::common::{Captures, CompiledPattern, Engine, FlagSet, GroupResult, MatchResult, Search};
pub use crate::error::{CompileError, Error, Result};
pub use crate::runtime::{search_all, substitute, try_match, Matches};

/// Compiled pattern for the standard (Oniguruma) engine.
pub type StdPattern = CompiledPattern<standard::StdRegex>;

/// Compiled pattern for the PCRE2 engine.
pub type Pcre2Pattern = CompiledPattern<pcre2::Pcre2Regex>;

/// The `dualre` Prelude
pub mod prelude {
    pub use crate::{
        pcre2::Pcre2Regex, standard::StdRegex, Builder, CompiledPattern, Engine, Error, MatchResult, Pcre2Pattern,
        StdPattern,
    };
}
