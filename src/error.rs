use thiserror::Error;

use crate::operation::NtStatus;

/// Errors that can occur while building or submitting a single mapping request.
///
/// Every variant is local to one command line item: the caller reports it and
/// moves on to the next item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// An Add spec did not contain exactly one `=` separator.
    #[error("Mapping must be SID=Name")]
    MalformedSpec,

    /// The SID half of an Add spec was rejected by the SID parser.
    ///
    /// Contains the offending text.
    #[error("Invalid SDDL SID {0}")]
    InvalidSid(String),

    /// The authority returned a negative status.
    #[error("{message}")]
    AuthorityRejected {
        /// Raw status returned by the authority.
        status: NtStatus,
        /// Human readable form of `status`.
        message: String,
    },

    /// A text field does not fit in a native counted string.
    #[error("String too long for UnicodeString")]
    TextTooLong {
        /// Length of the rejected text in UTF-16 code units.
        length: usize,
    },
}

impl MappingError {
    /// Status returned by the authority, if the error came from it.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> Option<NtStatus> {
        match self {
            Self::AuthorityRejected { status, .. } => Some(*status),
            Self::MalformedSpec | Self::InvalidSid(_) | Self::TextTooLong { .. } => None,
        }
    }
}
