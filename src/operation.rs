//! Native operation vocabulary: operation types, output error codes, `NTSTATUS`
//! and the borrowed request view handed to the authority.

use core::fmt::{self, Display};

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::NativeText;

/// Values of `LSA_SID_NAME_MAPPING_OPERATION_TYPE`.
///
/// # see also
/// See Microsoft docs for [LsaManageSidNameMapping](https://learn.microsoft.com/windows/win32/api/ntlsa/nf-ntlsa-lsamanagesidnamemapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
pub enum MappingOperationType {
    /// Add a single mapping.
    Add = 0,

    /// Remove a single mapping.
    Remove = 1,

    /// Add several mappings in one call. Never submitted by this crate.
    AddMultiple = 2,
}

/// Values of `LSA_SID_NAME_MAPPING_OPERATION_ERROR`, carried by the output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
pub enum MappingErrorCode {
    /// The operation succeeded.
    Success = 0,

    /// The failure is not specific to mappings (see the returned status).
    NonMappingError = 1,

    /// The name is already mapped to another SID.
    NameCollision = 2,

    /// The SID is already mapped to another name.
    SidCollision = 3,

    /// The domain of an account mapping does not exist.
    DomainNotFound = 4,

    /// The account SID is not inside the domain SID.
    DomainSidPrefixMismatch = 5,

    /// No mapping exists for the name to remove.
    MappingNotFound = 6,
}

/// Raw `NTSTATUS` returned by the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NtStatus(pub i32);

impl NtStatus {
    /// `STATUS_SUCCESS`.
    pub const SUCCESS: Self = Self(0);

    /// Non-negative statuses are success (including informational ones).
    #[inline]
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 0
    }

    /// Builds a status from its documented unsigned form (e.g. `0xC0000022`).
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_wrap,
        reason = "NTSTATUS values are reinterpreted bit for bit"
    )]
    pub const fn from_code(code: u32) -> Self {
        Self(code as i32)
    }

    /// The status bits as an unsigned value, the form used in documentation.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_sign_loss,
        reason = "NTSTATUS values are reinterpreted bit for bit"
    )]
    pub const fn code(self) -> u32 {
        self.0 as u32
    }
}

impl Display for NtStatus {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.code())
    }
}

impl From<i32> for NtStatus {
    #[inline]
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Borrowed view of one request, built right before the authority call.
///
/// Every text is always present; an absent account is an empty [`NativeText`].
#[derive(Debug)]
pub enum MappingRequest<'a, S> {
    /// Add `domain\account` for `sid`.
    Add {
        /// Domain name.
        domain: &'a NativeText,
        /// Account name, possibly empty.
        account: &'a NativeText,
        /// SID handle owned by the caller.
        sid: &'a S,
    },
    /// Remove the mapping of `domain\account`.
    Remove {
        /// Domain name.
        domain: &'a NativeText,
        /// Account name, possibly empty.
        account: &'a NativeText,
    },
}

impl<S> MappingRequest<'_, S> {
    /// Operation type submitted for this request.
    #[inline]
    #[must_use]
    pub const fn operation_type(&self) -> MappingOperationType {
        match self {
            Self::Add { .. } => MappingOperationType::Add,
            Self::Remove { .. } => MappingOperationType::Remove,
        }
    }

    /// Domain name of the request.
    #[inline]
    #[must_use]
    pub const fn domain(&self) -> &NativeText {
        match self {
            Self::Add { domain, .. } | Self::Remove { domain, .. } => domain,
        }
    }

    /// Account name of the request (empty when absent).
    #[inline]
    #[must_use]
    pub const fn account(&self) -> &NativeText {
        match self {
            Self::Add { account, .. } | Self::Remove { account, .. } => account,
        }
    }
}
