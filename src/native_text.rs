//! UTF-16 text sized for a native counted string (`UNICODE_STRING`).
//!
//! A counted string stores its length in bytes as a `u16`, so the text can hold
//! at most `u16::MAX / 2` UTF-16 code units. [`NativeText`] enforces that bound
//! once, at construction, so the wire record built from it can never truncate.

use widestring::U16String;

use crate::MappingError;

/// Owned UTF-16 buffer whose length fits in a counted string.
///
/// The buffer is not NUL terminated; the counted string carries the length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NativeText {
    wide: U16String,
}

impl NativeText {
    /// Maximum number of UTF-16 code units a counted string can describe.
    pub const MAX_LEN: usize = (u16::MAX / 2) as usize;

    /// Encodes `text` as UTF-16.
    ///
    /// # Errors
    /// [`MappingError::TextTooLong`] if the encoded text exceeds [`Self::MAX_LEN`].
    ///
    /// # Examples
    /// ```rust
    /// # use win_sid_mapping::NativeText;
    /// let text = NativeText::new("ABC").unwrap();
    /// assert_eq!(text.len(), 3);
    /// assert_eq!(text.byte_len(), 6);
    /// ```
    #[inline]
    pub fn new(text: &str) -> Result<Self, MappingError> {
        Self::check_len(text)?;
        Ok(Self {
            wide: U16String::from_str(text),
        })
    }

    /// Encodes an optional part; `None` becomes an empty text.
    ///
    /// # Errors
    /// Same as [`Self::new`].
    #[inline]
    pub fn from_optional(text: Option<&str>) -> Result<Self, MappingError> {
        text.map_or_else(|| Ok(Self::default()), Self::new)
    }

    /// Checks that `text` would fit without encoding it.
    ///
    /// Returns the length in UTF-16 code units.
    ///
    /// # Errors
    /// [`MappingError::TextTooLong`] if the text exceeds [`Self::MAX_LEN`].
    #[inline]
    pub fn check_len(text: &str) -> Result<usize, MappingError> {
        let length = text.encode_utf16().count();
        if length > Self::MAX_LEN {
            return Err(MappingError::TextTooLong { length });
        }
        Ok(length)
    }

    /// Number of UTF-16 code units.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.wide.len()
    }

    /// Returns `true` if the text has no code units.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wide.is_empty()
    }

    /// Length in bytes, as stored in the counted string header.
    #[inline]
    #[must_use]
    pub fn byte_len(&self) -> u16 {
        // `len() <= MAX_LEN` so the doubled length always fits.
        u16::try_from(self.wide.len() * 2).unwrap_or(u16::MAX - 1)
    }

    /// The UTF-16 code units.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        self.wide.as_slice()
    }

    /// Lossy conversion back to a Rust string.
    #[inline]
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        self.wide.to_string_lossy()
    }
}
