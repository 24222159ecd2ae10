//! The PCRE2 engine, with its JIT compiler when available.

use std::ptr;

use libc::c_void;
use pcre2_sys as ffi;
use semver::Version;

use crate::Result;

mod code;
mod flags;
mod regex;

pub use self::flags::Flags;
pub use self::regex::Pcre2Regex;

/// Returns the text of a PCRE2 error code.
pub(crate) fn error_message(code: libc::c_int) -> String {
    let mut buf = [0u8; 256];

    let rc = unsafe { ffi::pcre2_get_error_message_8(code, buf.as_mut_ptr(), buf.len()) };

    if rc < 0 {
        format!("unknown error {}", code)
    } else {
        String::from_utf8_lossy(&buf[..rc as usize]).into_owned()
    }
}

/// Returns the version of the linked PCRE2 library.
pub fn version() -> Result<Version> {
    let s = unsafe {
        let len = ffi::pcre2_config_8(ffi::PCRE2_CONFIG_VERSION, ptr::null_mut());
        let mut buf = vec![0u8; len.max(0) as usize];

        ffi::pcre2_config_8(ffi::PCRE2_CONFIG_VERSION, buf.as_mut_ptr() as *mut c_void);

        buf.retain(|&b| b != 0);

        String::from_utf8(buf)?
    };

    // e.g. "10.42 2022-12-11"
    let mut parts = s.split_whitespace().next().unwrap_or_default().split('.');
    let major = parts.next().unwrap_or_default().parse()?;
    let minor = parts.next().unwrap_or_default().parse()?;

    Ok(Version::new(major, minor, 0))
}

/// Returns true if the linked PCRE2 library was built with JIT support.
pub fn jit_available() -> bool {
    let mut jit: u32 = 0;

    let rc = unsafe { ffi::pcre2_config_8(ffi::PCRE2_CONFIG_JIT, &mut jit as *mut u32 as *mut c_void) };

    rc >= 0 && jit == 1
}
