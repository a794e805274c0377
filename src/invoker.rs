//! Operation invoker: submits requests and turns the authority's answer into an
//! [`OperationOutcome`].
//!
//! Each request goes through `Parsing -> Invoking -> Cleanup` on its own. The SID
//! handle and the output record are owned values; they are dropped (and thus
//! released) right after the single call they serve, on every path.

use core::fmt::{self, Display};

use tracing::{debug, info, warn};

use crate::{
    AccountName, MappingError, NativeText,
    authority::{
        AuthorityResponse, HexStatusTranslator, OutputRecord, SidNameAuthority, SidParser,
        StatusTranslator,
    },
    operation::{MappingErrorCode, MappingRequest, NtStatus},
    request::{MappingSpec, Request, UnmapSpec, build_add_request, build_remove_request},
};

/// Verb used in every failure line, for Add and Remove alike.
///
/// The removal path keeps "adding" so that scripts matching the tool's output
/// keep working.
pub const FAILURE_VERB: &str = "adding";

/// Result of one Add or Remove item, ready to be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    /// Whether the authority accepted the request.
    pub succeeded: bool,
    /// Status returned by the authority, `None` if the item never reached it.
    pub status: Option<NtStatus>,
    /// Line to report to the user.
    pub message: String,
}

impl OperationOutcome {
    fn success(done: &str, source: &str, status: NtStatus) -> Self {
        Self {
            succeeded: true,
            status: Some(status),
            message: format!("{done} {source}"),
        }
    }

    fn failure(source: &str, error: &MappingError) -> Self {
        Self {
            succeeded: false,
            status: error.status(),
            message: format!("Error {FAILURE_VERB} {source} - {error}"),
        }
    }

    fn from_result(done: &str, source: &str, result: Result<NtStatus, MappingError>) -> Self {
        match result {
            Ok(status) => {
                info!(%status, "{done} {source}");
                Self::success(done, source, status)
            }
            Err(error) => {
                warn!(status = ?error.status(), "{FAILURE_VERB} {source} failed: {error}");
                Self::failure(source, &error)
            }
        }
    }
}

impl Display for OperationOutcome {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Binds a SID parser, an authority and a status translator together.
///
/// The client holds no per-request state; every call is independent.
#[derive(Debug, Clone)]
pub struct MappingClient<P, A, T = HexStatusTranslator> {
    parser: P,
    authority: A,
    translator: T,
}

impl<P, A, T> MappingClient<P, A, T>
where
    P: SidParser,
    A: SidNameAuthority<P::Sid>,
    T: StatusTranslator,
{
    /// Creates a client from its three collaborators.
    #[inline]
    pub const fn new(parser: P, authority: A, translator: T) -> Self {
        Self {
            parser,
            authority,
            translator,
        }
    }

    /// The SID parser used for Add specs.
    #[inline]
    pub const fn parser(&self) -> &P {
        &self.parser
    }

    /// The authority requests are submitted to.
    #[inline]
    pub const fn authority(&self) -> &A {
        &self.authority
    }

    /// Submits an Add request, then releases its SID handle.
    #[inline]
    pub fn add(&self, spec: MappingSpec<P::Sid>) -> OperationOutcome {
        let MappingSpec { sid, name, source } = spec;
        let result = self.submit_add(&sid, &name);
        drop(sid);
        OperationOutcome::from_result("Added", &source, result)
    }

    /// Submits a Remove request.
    #[inline]
    pub fn remove(&self, spec: UnmapSpec) -> OperationOutcome {
        let UnmapSpec { name, source } = spec;
        let result = self.submit_remove(&name);
        OperationOutcome::from_result("Removed", &source, result)
    }

    /// Submits an already built request.
    #[inline]
    pub fn execute(&self, request: Request<P::Sid>) -> OperationOutcome {
        match request {
            Request::Add(spec) => self.add(spec),
            Request::Remove(spec) => self.remove(spec),
        }
    }

    /// Parses `SID=Domain[\Account]` and submits it.
    ///
    /// Parse failures are reported as a failed outcome.
    #[inline]
    pub fn add_mapping(&self, text: &str) -> OperationOutcome {
        match build_add_request(&self.parser, text) {
            Ok(spec) => self.execute(Request::Add(spec)),
            Err(error) => OperationOutcome::from_result("Added", text, Err(error)),
        }
    }

    /// Parses `Domain[\Account]` and submits its removal.
    #[inline]
    pub fn remove_mapping(&self, text: &str) -> OperationOutcome {
        self.execute(Request::Remove(build_remove_request(text)))
    }

    fn submit_add(&self, sid: &P::Sid, name: &AccountName) -> Result<NtStatus, MappingError> {
        let domain = NativeText::new(&name.domain)?;
        let account = NativeText::from_optional(name.account.as_deref())?;
        self.submit(&MappingRequest::Add {
            domain: &domain,
            account: &account,
            sid,
        })
    }

    fn submit_remove(&self, name: &AccountName) -> Result<NtStatus, MappingError> {
        let domain = NativeText::new(&name.domain)?;
        let account = NativeText::from_optional(name.account.as_deref())?;
        self.submit(&MappingRequest::Remove {
            domain: &domain,
            account: &account,
        })
    }

    fn submit(&self, request: &MappingRequest<'_, P::Sid>) -> Result<NtStatus, MappingError> {
        debug!(
            operation = ?request.operation_type(),
            domain = %request.domain().to_string_lossy(),
            account = %request.account().to_string_lossy(),
            "submitting mapping request"
        );
        let AuthorityResponse { status, output } = self.authority.manage(request);
        if let Some(output) = output {
            let raw = output.error_code();
            match MappingErrorCode::try_from(raw) {
                Ok(code) => debug!(?code, "mapping operation output"),
                Err(_) => debug!(raw, "unknown mapping operation error code"),
            }
        }
        if status.is_success() {
            Ok(status)
        } else {
            Err(MappingError::AuthorityRejected {
                status,
                message: self.translator.describe(status),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Counters {
        sids_allocated: Cell<usize>,
        sids_freed: Cell<usize>,
        outputs_freed: Cell<usize>,
    }

    struct Sid(u32, Rc<Counters>);

    impl Drop for Sid {
        fn drop(&mut self) {
            self.1.sids_freed.set(self.1.sids_freed.get() + 1);
        }
    }

    struct Parser(Rc<Counters>);

    impl SidParser for Parser {
        type Sid = Sid;

        fn parse(&self, sddl: &str) -> Option<Sid> {
            let last = sddl.strip_prefix("S-1-")?.rsplit('-').next()?.parse().ok()?;
            self.0.sids_allocated.set(self.0.sids_allocated.get() + 1);
            Some(Sid(last, Rc::clone(&self.0)))
        }
    }

    struct Output(Rc<Counters>);

    impl OutputRecord for Output {
        fn error_code(&self) -> i32 {
            MappingErrorCode::NameCollision.into()
        }
    }

    impl Drop for Output {
        fn drop(&mut self) {
            self.0.outputs_freed.set(self.0.outputs_freed.get() + 1);
        }
    }

    /// Answers with a fixed status and always returns an output record.
    struct Authority {
        status: NtStatus,
        counters: Rc<Counters>,
        seen: RefCell<Vec<(String, String, Option<u32>)>>,
    }

    impl SidNameAuthority<Sid> for Authority {
        type Output = Output;

        fn manage(&self, request: &MappingRequest<'_, Sid>) -> AuthorityResponse<Output> {
            let sid = match request {
                MappingRequest::Add { sid, .. } => Some(sid.0),
                MappingRequest::Remove { .. } => None,
            };
            self.seen.borrow_mut().push((
                request.domain().to_string_lossy(),
                request.account().to_string_lossy(),
                sid,
            ));
            AuthorityResponse {
                status: self.status,
                output: Some(Output(Rc::clone(&self.counters))),
            }
        }
    }

    fn client(status: NtStatus) -> (MappingClient<Parser, Authority>, Rc<Counters>) {
        let counters = Rc::new(Counters::default());
        let authority = Authority {
            status,
            counters: Rc::clone(&counters),
            seen: RefCell::default(),
        };
        (
            MappingClient::new(Parser(Rc::clone(&counters)), authority, HexStatusTranslator),
            counters,
        )
    }

    const ACCESS_DENIED: NtStatus = NtStatus::from_code(0xC000_0022);

    #[test]
    fn add_success_releases_everything_once() {
        let (client, counters) = client(NtStatus::SUCCESS);
        let outcome = client.add_mapping(r"S-1-5-99-7=ABC\User");
        assert!(outcome.succeeded);
        assert_eq!(outcome.status, Some(NtStatus::SUCCESS));
        assert_eq!(
            client.authority().seen.borrow().as_slice(),
            [("ABC".to_owned(), "User".to_owned(), Some(7))]
        );
        assert_eq!(counters.sids_allocated.get(), 1);
        assert_eq!(counters.sids_freed.get(), 1);
        assert_eq!(counters.outputs_freed.get(), 1);
    }

    #[test]
    fn add_failure_releases_everything_once() {
        let (client, counters) = client(ACCESS_DENIED);
        let outcome = client.add_mapping("S-1-5-99=ABC");
        assert!(!outcome.succeeded);
        assert_eq!(outcome.status, Some(ACCESS_DENIED));
        assert_eq!(
            outcome.message,
            "Error adding S-1-5-99=ABC - NTSTATUS 0xC0000022"
        );
        assert_eq!(counters.sids_freed.get(), 1);
        assert_eq!(counters.outputs_freed.get(), 1);
    }

    #[test]
    fn absent_account_is_sent_as_empty_text() {
        let (client, _) = client(NtStatus::SUCCESS);
        assert!(client.add_mapping("S-1-5-99=ABC").succeeded);
        assert_eq!(
            client.authority().seen.borrow().as_slice(),
            [("ABC".to_owned(), String::new(), Some(99))]
        );
    }

    #[test]
    fn parse_failures_never_reach_the_authority() {
        let (client, counters) = client(NtStatus::SUCCESS);
        let malformed = client.add_mapping("A=B=C");
        assert_eq!(malformed.message, "Error adding A=B=C - Mapping must be SID=Name");
        assert_eq!(malformed.status, None);
        let invalid = client.add_mapping("notasid=Domain");
        assert_eq!(
            invalid.message,
            "Error adding notasid=Domain - Invalid SDDL SID notasid"
        );
        assert!(client.authority().seen.borrow().is_empty());
        assert_eq!(counters.sids_allocated.get(), 0);
        assert_eq!(counters.outputs_freed.get(), 0);
    }

    #[test]
    fn oversized_name_releases_the_sid() {
        let (client, counters) = client(NtStatus::SUCCESS);
        let spec = format!("S-1-5-99={}", "x".repeat(NativeText::MAX_LEN + 1));
        let outcome = client.add_mapping(&spec);
        assert!(!outcome.succeeded);
        assert!(outcome.message.ends_with("String too long for UnicodeString"));
        assert!(client.authority().seen.borrow().is_empty());
        assert_eq!(counters.sids_allocated.get(), 1);
        assert_eq!(counters.sids_freed.get(), 1);
    }

    #[test]
    fn remove_failure_keeps_the_adding_wording() {
        let (client, counters) = client(ACCESS_DENIED);
        let outcome = client.remove_mapping(r"ABC\User");
        assert_eq!(
            outcome.to_string(),
            r"Error adding ABC\User - NTSTATUS 0xC0000022"
        );
        assert_eq!(
            client.authority().seen.borrow().as_slice(),
            [("ABC".to_owned(), "User".to_owned(), None)]
        );
        assert_eq!(counters.outputs_freed.get(), 1);
    }

    #[test]
    fn execute_dispatches_on_variant() {
        let (client, counters) = client(NtStatus::SUCCESS);
        let add = build_add_request(client.parser(), "S-1-5-99=ABC").unwrap();
        assert_eq!(client.execute(Request::Add(add)).message, "Added S-1-5-99=ABC");
        let remove = build_remove_request("ABC");
        assert_eq!(client.execute(Request::Remove(remove)).message, "Removed ABC");
        assert_eq!(counters.sids_freed.get(), 1);
        assert_eq!(counters.outputs_freed.get(), 2);
    }
}
