//! Seams to the external collaborators: SID parser, authority and status translator.
//!
//! The Windows implementations live in `lsa`; tests plug in recording stubs.
//! Native resources are expressed as owned values whose `Drop` releases them, so a
//! handle is freed exactly once whatever path the caller takes.

use crate::operation::{MappingRequest, NtStatus};

/// Converts SDDL text (`S-1-5-99`) into an owned native SID.
pub trait SidParser {
    /// Owned SID handle. Dropping it releases the native allocation.
    type Sid;

    /// Parses `sddl`, returning `None` when the parser rejects it.
    ///
    /// Nothing is allocated on failure.
    fn parse(&self, sddl: &str) -> Option<Self::Sid>;
}

/// Output record returned by the authority.
pub trait OutputRecord {
    /// Raw `LSA_SID_NAME_MAPPING_OPERATION_ERROR` carried by the record.
    fn error_code(&self) -> i32;
}

/// Raw result of one authority call.
#[derive(Debug)]
pub struct AuthorityResponse<O> {
    /// Status returned by the call.
    pub status: NtStatus,
    /// Output record, present even on some failures. Dropping it releases it.
    pub output: Option<O>,
}

impl<O> AuthorityResponse<O> {
    /// A response with a status and no output record.
    #[inline]
    pub const fn status_only(status: NtStatus) -> Self {
        Self {
            status,
            output: None,
        }
    }
}

/// The local security authority managing SID to name mappings.
///
/// `S` is the SID handle type accepted for Add requests.
pub trait SidNameAuthority<S> {
    /// Owned output record.
    type Output: OutputRecord;

    /// Submits one request. Blocks until the authority answers.
    fn manage(&self, request: &MappingRequest<'_, S>) -> AuthorityResponse<Self::Output>;
}

/// Maps an authority status to a human readable message.
pub trait StatusTranslator {
    /// Describes `status`.
    fn describe(&self, status: NtStatus) -> String;
}

/// Translator that only prints the status value.
///
/// Used where no system message table is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexStatusTranslator;

impl StatusTranslator for HexStatusTranslator {
    #[inline]
    fn describe(&self, status: NtStatus) -> String {
        format!("NTSTATUS {status}")
    }
}

impl<T: SidParser + ?Sized> SidParser for &T {
    type Sid = T::Sid;

    #[inline]
    fn parse(&self, sddl: &str) -> Option<Self::Sid> {
        (**self).parse(sddl)
    }
}

impl<S, T: SidNameAuthority<S> + ?Sized> SidNameAuthority<S> for &T {
    type Output = T::Output;

    #[inline]
    fn manage(&self, request: &MappingRequest<'_, S>) -> AuthorityResponse<Self::Output> {
        (**self).manage(request)
    }
}

impl<T: StatusTranslator + ?Sized> StatusTranslator for &T {
    #[inline]
    fn describe(&self, status: NtStatus) -> String {
        (**self).describe(status)
    }
}
