//! Windows implementation of the collaborators, backed by `advapi32`.
//!
//! - [`StringSidParser`] wraps `ConvertStringSidToSidW`; the resulting [`LocalSid`]
//!   is freed with `LocalFree` on drop.
//! - [`LsaAuthority`] wraps `LsaManageSidNameMapping`; the output record
//!   ([`LsaOutput`]) is freed with `LsaFreeMemory` on drop.
//! - [`LsaStatusTranslator`] maps an `NTSTATUS` to the system message.

mod local_sid;
mod lsa_authority;
mod status;

pub use local_sid::{LocalSid, StringSidParser};
pub use lsa_authority::{LsaAuthority, LsaOutput};
pub use status::LsaStatusTranslator;

use crate::MappingClient;

/// Client bound to the local LSA.
pub type LsaClient = MappingClient<StringSidParser, LsaAuthority, LsaStatusTranslator>;

impl MappingClient<StringSidParser, LsaAuthority, LsaStatusTranslator> {
    /// Client submitting to the local LSA.
    ///
    /// Adding or removing mappings requires administrative rights; without them
    /// each request fails with `STATUS_ACCESS_DENIED`.
    #[inline]
    #[must_use]
    pub const fn local() -> Self {
        Self::new(StringSidParser, LsaAuthority, LsaStatusTranslator)
    }
}
