#![forbid(unsafe_code)]

//! Plain text paired with the format labels that apply to all of it.

use boxtext_style::StyleFlags;
use std::fmt;

/// A plain string plus the style flags that apply uniformly to it.
///
/// Produced once by the markup parser and passed down unchanged; every line
/// the wrapper emits carries the flags of the text it was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StyledText {
    text: String,
    flags: StyleFlags,
}

impl StyledText {
    #[must_use]
    pub fn new(text: impl Into<String>, flags: StyleFlags) -> Self {
        Self {
            text: text.into(),
            flags,
        }
    }

    /// Unstyled text.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(text, StyleFlags::empty())
    }

    /// Text with all markup removed.
    #[inline]
    #[must_use]
    pub fn plain(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn flags(&self) -> StyleFlags {
        self.flags
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn into_plain(self) -> String {
        self.text
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
