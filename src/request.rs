//! Request builder: turns command line text into typed requests.
//!
//! - Add: `SID=Domain[\Account]`, exactly one `=`; the SID half is parsed
//!   immediately and the resulting handle is owned by the [`MappingSpec`].
//! - Remove: `Domain[\Account]`, never fails.

use crate::{AccountName, MappingError, NativeText, authority::SidParser};

/// A parsed Add request.
///
/// Owns the SID handle until the request is consumed by the invoker.
#[derive(Debug)]
pub struct MappingSpec<S> {
    /// Native SID returned by the parser.
    pub sid: S,
    /// Name to associate with `sid`.
    pub name: AccountName,
    /// The command line text the request was built from.
    pub source: String,
}

/// A parsed Remove request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmapSpec {
    /// Name whose mapping is removed.
    pub name: AccountName,
    /// The command line text the request was built from.
    pub source: String,
}

/// Either kind of request.
#[derive(Debug)]
pub enum Request<S> {
    /// Add a mapping.
    Add(MappingSpec<S>),
    /// Remove a mapping.
    Remove(UnmapSpec),
}

impl<S> Request<S> {
    /// The command line text the request was built from.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Add(spec) => &spec.source,
            Self::Remove(spec) => &spec.source,
        }
    }
}

/// Splits `SID=Name` into its two halves.
fn split_mapping(spec: &str) -> Result<(&str, &str), MappingError> {
    let mut parts = spec.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(sid), Some(name), None) => Ok((sid, name)),
        _ => Err(MappingError::MalformedSpec),
    }
}

/// Builds an Add request from `SID=Domain[\Account]`.
///
/// # Errors
/// - [`MappingError::MalformedSpec`] without exactly one `=`.
/// - [`MappingError::TextTooLong`] if the SID half cannot be passed natively.
/// - [`MappingError::InvalidSid`] if `parser` rejects the SID half.
#[inline]
pub fn build_add_request<P: SidParser>(
    parser: &P,
    spec: &str,
) -> Result<MappingSpec<P::Sid>, MappingError> {
    let (sid_text, name_text) = split_mapping(spec)?;
    NativeText::check_len(sid_text)?;
    let sid = parser
        .parse(sid_text)
        .ok_or_else(|| MappingError::InvalidSid(sid_text.to_owned()))?;
    Ok(MappingSpec {
        sid,
        name: AccountName::split(name_text),
        source: spec.to_owned(),
    })
}

/// Builds a Remove request from `Domain[\Account]`.
///
/// # Examples
/// ```rust
/// # use win_sid_mapping::build_remove_request;
/// let spec = build_remove_request(r"ABC\User");
/// assert_eq!(spec.name.domain, "ABC");
/// assert_eq!(spec.name.account.as_deref(), Some("User"));
/// ```
#[inline]
#[must_use]
pub fn build_remove_request(spec: &str) -> UnmapSpec {
    UnmapSpec {
        name: AccountName::split(spec),
        source: spec.to_owned(),
    }
}
