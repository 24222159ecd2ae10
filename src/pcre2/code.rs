use std::ptr;
use std::slice;

use foreign_types::{foreign_type, ForeignType, ForeignTypeRef};
use libc::c_void;
use pcre2_sys as ffi;

use crate::error::AsResult;
use crate::pcre2::{error_message, Pcre2Regex};
use crate::{CompileError, Engine, Error, Result};

/// Offset of an unset capture group in the output vector.
pub const UNSET: usize = usize::MAX;

foreign_type! {
    /// A compiled PCRE2 pattern.
    pub unsafe type Code: Send + Sync {
        type CType = ffi::pcre2_code_8;

        fn drop = free_code;
    }
}

unsafe fn free_code(code: *mut ffi::pcre2_code_8) {
    ffi::pcre2_code_free_8(code)
}

foreign_type! {
    /// A block holding the offsets of one match.
    pub unsafe type MatchData: Send {
        type CType = ffi::pcre2_match_data_8;

        fn drop = free_match_data;
    }
}

unsafe fn free_match_data(data: *mut ffi::pcre2_match_data_8) {
    ffi::pcre2_match_data_free_8(data)
}

/// The return code of a PCRE2 call.
pub struct Status(pub libc::c_int);

impl AsResult for Status {
    type Output = Option<usize>;
    type Error = Error;

    fn ok(self) -> Result<Self::Output> {
        match self.0 {
            ffi::PCRE2_ERROR_NOMATCH => Ok(None),
            rc if rc >= 0 => Ok(Some(rc as usize)),
            rc => Err(Error::Match {
                engine: Pcre2Regex::NAME,
                code: rc,
                message: error_message(rc),
            }),
        }
    }
}

impl Code {
    /// Compiles `expr` with the given PCRE2 options.
    pub fn compile(expr: &str, options: u32) -> std::result::Result<Code, CompileError> {
        let mut code = 0;
        let mut offset = 0;

        unsafe {
            let p = ffi::pcre2_compile_8(
                expr.as_ptr(),
                expr.len(),
                options,
                &mut code,
                &mut offset,
                ptr::null_mut(),
            );

            if p.is_null() {
                Err(CompileError {
                    engine: Pcre2Regex::NAME,
                    pattern: expr.to_owned(),
                    offset: Some(offset),
                    message: error_message(code),
                })
            } else {
                Ok(Code::from_ptr(p))
            }
        }
    }

    /// Runs the JIT compiler over the pattern.
    pub fn jit_compile(&mut self) -> std::result::Result<(), String> {
        let rc = unsafe { ffi::pcre2_jit_compile_8(self.as_ptr(), ffi::PCRE2_JIT_COMPLETE) };

        if rc < 0 {
            Err(error_message(rc))
        } else {
            Ok(())
        }
    }
}

impl CodeRef {
    /// Returns the number of capture groups in the pattern.
    pub fn capture_count(&self) -> Result<usize> {
        let mut count: u32 = 0;

        let rc = unsafe {
            ffi::pcre2_pattern_info_8(
                self.as_ptr(),
                ffi::PCRE2_INFO_CAPTURECOUNT,
                &mut count as *mut u32 as *mut c_void,
            )
        };

        Status(rc).map(|_| count as usize)
    }
}

impl MatchData {
    /// Allocates a match data block large enough for every group of `code`.
    pub fn for_code(code: &CodeRef) -> Result<MatchData> {
        unsafe {
            let p = ffi::pcre2_match_data_create_from_pattern_8(code.as_ptr(), ptr::null_mut());

            if p.is_null() {
                Err(Error::Match {
                    engine: Pcre2Regex::NAME,
                    code: ffi::PCRE2_ERROR_NOMEMORY,
                    message: error_message(ffi::PCRE2_ERROR_NOMEMORY),
                })
            } else {
                Ok(MatchData::from_ptr(p))
            }
        }
    }
}

impl MatchDataRef {
    /// Returns the output vector, two offsets per group.
    pub fn ovector(&self) -> &[usize] {
        unsafe {
            let p = ffi::pcre2_get_ovector_pointer_8(self.as_ptr());
            let n = ffi::pcre2_get_ovector_count_8(self.as_ptr()) as usize;

            slice::from_raw_parts(p, n * 2)
        }
    }
}
