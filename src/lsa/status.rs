use cfg_if::cfg_if;
use windows_sys::Win32::{
    Foundation::ERROR_MR_MID_NOT_FOUND, Security::Authentication::Identity::LsaNtStatusToWinError,
};

use crate::{
    authority::{HexStatusTranslator, StatusTranslator},
    operation::NtStatus,
};

/// Translates an `NTSTATUS` into the matching Win32 system message.
///
/// Statuses without a Win32 equivalent fall back to [`HexStatusTranslator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LsaStatusTranslator;

impl StatusTranslator for LsaStatusTranslator {
    #[inline]
    fn describe(&self, status: NtStatus) -> String {
        // SAFETY: LsaNtStatusToWinError is a pure lookup on its argument.
        let code = unsafe { LsaNtStatusToWinError(status.0) };
        if code == ERROR_MR_MID_NOT_FOUND {
            return HexStatusTranslator.describe(status);
        }
        cfg_if! {
            if #[cfg(feature = "windows_result")] {
                let hresult = windows_result::HRESULT::from_win32(code);
                let message = windows_result::Error::from_hresult(hresult).message();
                let message = message.trim_end();
                if message.is_empty() {
                    HexStatusTranslator.describe(status)
                } else {
                    message.to_owned()
                }
            } else {
                format!("Win32 error {code} ({})", HexStatusTranslator.describe(status))
            }
        }
    }
}
