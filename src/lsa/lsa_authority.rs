use core::ptr::{NonNull, null_mut};

use windows_sys::Win32::Security::Authentication::Identity::{
    LSA_SID_NAME_MAPPING_OPERATION_ADD_INPUT, LSA_SID_NAME_MAPPING_OPERATION_INPUT,
    LSA_SID_NAME_MAPPING_OPERATION_OUTPUT, LSA_SID_NAME_MAPPING_OPERATION_REMOVE_INPUT,
    LSA_UNICODE_STRING, LsaFreeMemory, LsaManageSidNameMapping,
};

use super::LocalSid;
use crate::{
    NativeText,
    authority::{AuthorityResponse, OutputRecord, SidNameAuthority},
    operation::{MappingRequest, NtStatus},
};

/// Counted string view over `text`.
///
/// The returned record borrows the buffer of `text`; it must not outlive it.
fn unicode_string(text: &NativeText) -> LSA_UNICODE_STRING {
    LSA_UNICODE_STRING {
        Length: text.byte_len(),
        MaximumLength: text.byte_len(),
        // The authority only reads input strings.
        Buffer: text.as_slice().as_ptr().cast_mut(),
    }
}

/// Output record allocated by `LsaManageSidNameMapping`.
///
/// Dropping it calls `LsaFreeMemory` exactly once.
#[derive(Debug)]
pub struct LsaOutput {
    ptr: NonNull<LSA_SID_NAME_MAPPING_OPERATION_OUTPUT>,
}

impl OutputRecord for LsaOutput {
    #[inline]
    fn error_code(&self) -> i32 {
        // SAFETY: `ptr` points to a record written by the authority and alive until
        // drop. Every variant of the output union is a generic output record, so
        // reading the Add variant is valid whatever operation was submitted.
        unsafe { (*self.ptr.as_ptr()).AddOutput.ErrorCode }
    }
}

impl Drop for LsaOutput {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: `ptr` was allocated by the LSA for this caller and is freed only here.
        unsafe {
            LsaFreeMemory(self.ptr.as_ptr().cast());
        }
    }
}

/// The local security authority, through `LsaManageSidNameMapping`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LsaAuthority;

impl SidNameAuthority<LocalSid> for LsaAuthority {
    type Output = LsaOutput;

    #[inline]
    fn manage(&self, request: &MappingRequest<'_, LocalSid>) -> AuthorityResponse<LsaOutput> {
        let input = match request {
            MappingRequest::Add {
                domain,
                account,
                sid,
            } => LSA_SID_NAME_MAPPING_OPERATION_INPUT {
                AddInput: LSA_SID_NAME_MAPPING_OPERATION_ADD_INPUT {
                    DomainName: unicode_string(domain),
                    AccountName: unicode_string(account),
                    Sid: sid.as_raw(),
                    Flags: 0,
                },
            },
            MappingRequest::Remove { domain, account } => LSA_SID_NAME_MAPPING_OPERATION_INPUT {
                RemoveInput: LSA_SID_NAME_MAPPING_OPERATION_REMOVE_INPUT {
                    DomainName: unicode_string(domain),
                    AccountName: unicode_string(account),
                },
            },
        };
        let mut output: *mut LSA_SID_NAME_MAPPING_OPERATION_OUTPUT = null_mut();

        // SAFETY:
        // - `input` and the text buffers it points to are alive for the whole call.
        // - The SID pointer of an Add request is owned by the caller's `LocalSid`.
        // - `output` is a valid out-parameter; it stays null if nothing is allocated.
        let status = unsafe {
            LsaManageSidNameMapping(
                request.operation_type().into(),
                &raw const input,
                &raw mut output,
            )
        };

        AuthorityResponse {
            status: NtStatus(status),
            output: NonNull::new(output).map(|ptr| LsaOutput { ptr }),
        }
    }
}
