use std::fmt;
use std::result::Result as StdResult;

use thiserror::Error;

/// The type returned by dualre methods.
pub type Result<T> = StdResult<T, Error>;

/// dualre Error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A flag token outside of the engine's allowed set.
    #[error(":{flag} is not a valid {engine} flag.\n  Flags should be from list {allowed}")]
    InvalidFlag {
        /// Name of the engine the flag was given to.
        engine: &'static str,
        /// The rejected token.
        flag: String,
        /// The allowed tokens, formatted as `[:a :b]`.
        allowed: String,
    },

    /// Two grammar flags were given for the same pattern.
    #[error("{engine} grammar flags :{first} and :{second} are mutually exclusive")]
    ConflictingFlags {
        /// Name of the engine the flags were given to.
        engine: &'static str,
        /// The grammar selected first.
        first: &'static str,
        /// The grammar that conflicts with it.
        second: &'static str,
    },

    /// The pattern failed to compile.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The engine failed while matching.
    #[error("{engine} matching failed with error {code}: {message}")]
    Match {
        /// Name of the engine.
        engine: &'static str,
        /// Engine-native error code.
        code: i32,
        /// Engine diagnostic.
        message: String,
    },

    /// The substitution failed, even after growing the output buffer.
    #[error("substitution failed with error {code}: {message}")]
    Substitute {
        /// Engine-native error code.
        code: i32,
        /// Engine diagnostic.
        message: String,
    },

    /// The compiled pattern was released before use.
    #[error("pattern has been released")]
    Released,

    /// The engine produced an invalid UTF-8 string
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Parse integer error
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),
}

/// Providing details of a pattern compile failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileError {
    /// Name of the engine that rejected the pattern.
    pub engine: &'static str,
    /// The rejected pattern.
    pub pattern: String,
    /// Byte offset of the syntax error, when the engine reports one.
    pub offset: Option<usize>,
    /// A human-readable message describing the error.
    pub message: String,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} compilation failed, pattern: '{}'", self.engine, self.pattern)?;

        if let Some(offset) = self.offset {
            write!(f, ", offset {}", offset)?;
        }

        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for CompileError {}

pub trait AsResult
where
    Self: Sized,
{
    type Output;
    type Error: fmt::Debug;

    fn ok(self) -> StdResult<Self::Output, Self::Error>;

    fn map<U, F: FnOnce(Self::Output) -> U>(self, op: F) -> StdResult<U, Self::Error> {
        self.ok().map(op)
    }
}
