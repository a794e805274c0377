//! `DOMAIN[\Account]` pairs as accepted by the authority.
//!
//! - The split happens on the **first** `\`; later separators belong to the account.
//! - Without a separator the whole text is the domain and the account is absent.
//! - No further validation: empty parts are passed through unchanged.

use core::{
    convert::Infallible,
    fmt::{self, Display},
    str::FromStr,
};

/// Domain and optional account name of a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AccountName {
    /// The domain part (before the first `\`).
    pub domain: String,
    /// The account part (after the first `\`), if any.
    pub account: Option<String>,
}

impl AccountName {
    /// Non-splitting constructor.
    #[inline]
    pub fn new<D: Into<String>>(domain: D, account: Option<String>) -> Self {
        Self {
            domain: domain.into(),
            account,
        }
    }

    /// Splits `text` on its first `\`.
    ///
    /// # Examples
    /// ```rust
    /// # use win_sid_mapping::AccountName;
    /// let name = AccountName::split(r"ABC\User\Extra");
    /// assert_eq!(name.domain, "ABC");
    /// assert_eq!(name.account.as_deref(), Some(r"User\Extra"));
    ///
    /// let domain_only = AccountName::split("ABC");
    /// assert_eq!(domain_only.account, None);
    /// ```
    #[inline]
    #[must_use]
    pub fn split(text: &str) -> Self {
        match text.split_once('\\') {
            Some((domain, account)) => Self::new(domain, Some(account.to_owned())),
            None => Self::new(text, None),
        }
    }

    /// The account part, or `""` when absent.
    #[inline]
    #[must_use]
    pub fn account_or_empty(&self) -> &str {
        self.account.as_deref().unwrap_or_default()
    }
}

impl Display for AccountName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.account {
            Some(account) => write!(f, "{}\\{account}", self.domain),
            None => f.write_str(&self.domain),
        }
    }
}

impl FromStr for AccountName {
    type Err = Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::split(s))
    }
}
