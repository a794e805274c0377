use core::ffi::c_void;
use core::mem::MaybeUninit;
use core::ptr::NonNull;

use tracing::debug;
use widestring::U16CString;
use windows_sys::Win32::{
    Foundation::{GetLastError, LocalFree},
    Security::{Authorization::ConvertStringSidToSidW, PSID},
};

use crate::authority::SidParser;

/// SID allocated by `ConvertStringSidToSidW`.
///
/// Owns the allocation; dropping it calls `LocalFree` exactly once.
#[derive(Debug)]
pub struct LocalSid {
    ptr: NonNull<c_void>,
}

impl LocalSid {
    /// Returns the underlying raw `PSID` pointer.
    ///
    /// The pointer is valid as long as `self` is alive.
    #[inline]
    #[must_use]
    pub const fn as_raw(&self) -> PSID {
        self.ptr.as_ptr()
    }
}

impl Drop for LocalSid {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: `ptr` was allocated by `ConvertStringSidToSidW` (LocalAlloc), is owned
        // by `self` and is freed only here.
        unsafe {
            LocalFree(self.ptr.as_ptr());
        }
    }
}

/// Parses SDDL SID strings with `ConvertStringSidToSidW`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSidParser;

impl SidParser for StringSidParser {
    type Sid = LocalSid;

    #[inline]
    fn parse(&self, sddl: &str) -> Option<LocalSid> {
        // Interior NULs cannot be passed to the API.
        let wide = U16CString::from_str(sddl).ok()?;
        let mut raw: MaybeUninit<PSID> = MaybeUninit::uninit();

        // SAFETY:
        // - `wide` is a NUL-terminated UTF-16 buffer alive for the whole call.
        // - `raw.as_mut_ptr()` is a valid out-parameter of type `*mut PSID`.
        let ok = unsafe { ConvertStringSidToSidW(wide.as_ptr(), raw.as_mut_ptr()) };
        if ok == 0 {
            // SAFETY: GetLastError can be called immediately after a failing FFI call.
            let error = unsafe { GetLastError() };
            debug!(error, sddl, "ConvertStringSidToSidW rejected the SID");
            return None;
        }

        // SAFETY: the call succeeded, so the out-parameter has been written.
        let raw = unsafe { raw.assume_init() };
        NonNull::new(raw).map(|ptr| LocalSid { ptr })
    }
}
