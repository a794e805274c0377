//! # Custom SID to name mappings for the Windows LSA
//!
//! Marshalling layer around `LsaManageSidNameMapping`: it turns textual specs
//! into the fixed-layout records the local security authority expects, submits
//! them, translates the returned status and releases every native allocation
//! exactly once.
//!
//! The crate provides:
//! - [`build_add_request`] / [`build_remove_request`]: parse `SID=Domain[\Account]`
//!   and `Domain[\Account]` into [`MappingSpec`] / [`UnmapSpec`].
//! - [`MappingClient`]: submits requests and reports an [`OperationOutcome`].
//! - [`SidParser`], [`SidNameAuthority`], [`StatusTranslator`]: the seams to the
//!   native collaborators, so everything above them runs on any platform.
//! - (Windows) `lsa`: the `advapi32` implementations of those seams.
//!
//! ## Resource ownership
//! Native handles are owned values released in `Drop`:
//! - the SID returned by the parser lives in the [`MappingSpec`] and is dropped by
//!   [`MappingClient::add`] right after the authority call;
//! - the authority's output record is dropped as soon as the call returns, whether
//!   the status is a success or not.
//!
//! ## Examples
//! ```rust
//! use win_sid_mapping::{AccountName, build_remove_request};
//!
//! let spec = build_remove_request(r"ABC\User");
//! assert_eq!(spec.name, AccountName::new("ABC", Some("User".to_owned())));
//! ```
//!
//! ### (Windows) Add a mapping
//! ```no_run
//! # #[cfg(windows)]
//! # {
//! use win_sid_mapping::lsa::LsaClient;
//!
//! let client = LsaClient::local();
//! let outcome = client.add_mapping(r"S-1-5-99-1-2-3=ABC\User");
//! if !outcome.succeeded {
//!     eprintln!("{outcome}");
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

mod error;
pub use error::MappingError;

mod native_text;
pub use native_text::NativeText;

mod name;
/// `Domain[\Account]` pair of a mapping.
pub use name::AccountName;

pub mod operation;
pub use operation::{MappingErrorCode, MappingOperationType, MappingRequest, NtStatus};

pub mod authority;
pub use authority::{
    AuthorityResponse, HexStatusTranslator, OutputRecord, SidNameAuthority, SidParser,
    StatusTranslator,
};

mod request;
pub use request::{MappingSpec, Request, UnmapSpec, build_add_request, build_remove_request};

mod invoker;
pub use invoker::{FAILURE_VERB, MappingClient, OperationOutcome};

pub mod cli;

#[cfg_attr(docsrs, doc(cfg(windows)))]
#[cfg(windows)]
pub mod lsa;
