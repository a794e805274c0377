// Windows-only checks of the advapi32 collaborators that do not need admin rights.
#![cfg(windows)]
#![allow(clippy::expect_used, reason = "Expect is not an issue in tests")]
#![allow(clippy::unwrap_used, reason = "Unwrap is not an issue in tests")]

use win_sid_mapping::{
    HexStatusTranslator, NtStatus, SidParser, StatusTranslator,
    lsa::{LsaStatusTranslator, StringSidParser},
};

#[test]
fn parses_sddl_sids() {
    let sid = StringSidParser.parse("S-1-5-99-1-2-3").expect("valid SID");
    assert!(!sid.as_raw().is_null());
    // Released by drop.
    drop(sid);
    assert!(StringSidParser.parse("S-1-5-32-544").is_some());
}

#[test]
fn rejects_invalid_sids() {
    assert!(StringSidParser.parse("notasid").is_none());
    assert!(StringSidParser.parse("").is_none());
    assert!(StringSidParser.parse("S-1-5\0-99").is_none());
}

#[test]
fn translates_access_denied() {
    let message = LsaStatusTranslator.describe(NtStatus::from_code(0xC000_0022));
    assert!(!message.is_empty());
    assert!(!message.ends_with('\n'), "message is trimmed: {message:?}");
    assert_ne!(
        message,
        HexStatusTranslator.describe(NtStatus::from_code(0xC000_0022))
    );
}
