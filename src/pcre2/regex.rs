use std::fmt;
use std::ptr;

use foreign_types::ForeignType;
use pcre2_sys as ffi;

use crate::common::{Captures, Engine, Search};
use crate::error::AsResult;
use crate::pcre2::code::{Code, MatchData, Status, UNSET};
use crate::pcre2::{error_message, Flags};
use crate::{Error, Result};

/// Size of the output buffer for the first substitution attempt.
pub(crate) const SUBSTITUTE_BUFFER_LEN: usize = 256;

/// Match options the JIT matcher does not handle.
const JIT_UNSUPPORTED: u32 = ffi::PCRE2_ANCHORED | ffi::PCRE2_ENDANCHORED;

/// A compiled PCRE2 regular expression in UTF mode.
pub struct Pcre2Regex {
    code: Code,
    expr: String,
    flags: Flags,
    jit: bool,
    captures: usize,
}

impl fmt::Debug for Pcre2Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pcre2Regex")
            .field("expr", &self.expr)
            .field("flags", &self.flags)
            .field("jit", &self.jit)
            .finish()
    }
}

impl Pcre2Regex {
    pub(crate) fn with_jit(expr: &str, flags: Flags, jit: bool) -> Result<Self> {
        let mut code = Code::compile(expr, ffi::PCRE2_UTF | flags.bits())?;
        let captures = code.capture_count()?;

        let jit = jit
            && match code.jit_compile() {
                Ok(()) => true,
                Err(err) => {
                    debug!("JIT compilation of `{}` failed, fall back to the interpreter: {}", expr, err);
                    false
                }
            };

        Ok(Pcre2Regex {
            code,
            expr: expr.to_owned(),
            flags,
            jit,
            captures,
        })
    }

    /// Returns true if the JIT compilation of the pattern succeeded.
    pub fn jit(&self) -> bool {
        self.jit
    }

    /// Returns the flags the regex was compiled with.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Returns the number of capture groups in the pattern.
    pub fn captures_len(&self) -> usize {
        self.captures
    }

    fn substitute_into(
        &self,
        subject: &str,
        replacement: &str,
        options: u32,
        data: &MatchData,
        buf: &mut Vec<u8>,
    ) -> (libc::c_int, usize) {
        let mut len = buf.len();

        let rc = unsafe {
            ffi::pcre2_substitute_8(
                self.code.as_ptr(),
                subject.as_ptr(),
                subject.len(),
                0,
                options,
                data.as_ptr(),
                ptr::null_mut(),
                replacement.as_ptr(),
                replacement.len(),
                buf.as_mut_ptr(),
                &mut len,
            )
        };

        (rc, len)
    }
}

impl Engine for Pcre2Regex {
    type Flags = Flags;

    const NAME: &'static str = "PCRE2";

    fn compile(expr: &str, flags: Flags) -> Result<Self> {
        Self::with_jit(expr, flags, true)
    }

    fn exec(&self, subject: &str, start: usize, search: Search) -> Result<Option<Captures>> {
        let options = match search {
            Search::Unanchored => 0,
            Search::NonEmptyAtStart => ffi::PCRE2_ANCHORED | ffi::PCRE2_NOTEMPTY_ATSTART,
            Search::Whole => ffi::PCRE2_ANCHORED | ffi::PCRE2_ENDANCHORED,
        };
        let data = MatchData::for_code(&self.code)?;
        let jit = self.jit && options & JIT_UNSUPPORTED == 0;

        trace!("{:?} `{}` from {}, jit = {}", search, self.expr, start, jit);

        let rc = unsafe {
            if jit {
                ffi::pcre2_jit_match_8(
                    self.code.as_ptr(),
                    subject.as_ptr(),
                    subject.len(),
                    start,
                    options,
                    data.as_ptr(),
                    ptr::null_mut(),
                )
            } else {
                ffi::pcre2_match_8(
                    self.code.as_ptr(),
                    subject.as_ptr(),
                    subject.len(),
                    start,
                    options | ffi::PCRE2_NO_UTF_CHECK,
                    data.as_ptr(),
                    ptr::null_mut(),
                )
            }
        };

        let count = match Status(rc).ok()? {
            Some(count) => count,
            None => return Ok(None),
        };

        let ovector = data.ovector();

        // `\K` in a lookaround may report a start after the end
        if ovector[0] > ovector[1] {
            return Err(Error::Match {
                engine: Self::NAME,
                code: 0,
                message: format!("match start {} is after its end {}", ovector[0], ovector[1]),
            });
        }

        let captures = (0..=self.captures)
            .map(|i| match (ovector[2 * i], ovector[2 * i + 1]) {
                (begin, end) if i < count.max(1) && begin != UNSET && begin <= end => Some(begin..end),
                _ => None,
            })
            .collect::<Vec<_>>();

        Ok(Some(captures.into()))
    }

    fn substitute(&self, subject: &str, replacement: &str, all: bool) -> Result<String> {
        let replacement = replacement.replace('$', "$$");
        let mut options = ffi::PCRE2_SUBSTITUTE_OVERFLOW_LENGTH;

        if all {
            options |= ffi::PCRE2_SUBSTITUTE_GLOBAL;
        }

        let data = MatchData::for_code(&self.code)?;
        let mut buf = vec![0u8; SUBSTITUTE_BUFFER_LEN];

        let (mut rc, mut len) = self.substitute_into(subject, &replacement, options, &data, &mut buf);

        if rc == ffi::PCRE2_ERROR_NOMEMORY {
            debug!("substitution output needs {} bytes, retry", len);

            buf.resize(len, 0);

            let (retry, retry_len) = self.substitute_into(subject, &replacement, options, &data, &mut buf);

            rc = retry;
            len = retry_len;
        }

        if rc < 0 {
            return Err(Error::Substitute {
                code: rc,
                message: error_message(rc),
            });
        }

        buf.truncate(len);

        Ok(String::from_utf8(buf)?)
    }
}
