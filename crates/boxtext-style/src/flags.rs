#![forbid(unsafe_code)]

//! Format labels that style a whole line of text.

bitflags::bitflags! {
    /// Set of format labels applied uniformly to a line.
    ///
    /// Equality and hashing depend only on membership, never on the order in
    /// which flags were inserted, so a flag set is safe to use in cache keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased weight.
        const BOLD      = 0b0000_0001;
        /// Italic text.
        const ITALIC    = 0b0000_0010;
        /// Underlined text.
        const UNDERLINE = 0b0000_0100;
    }
}

impl StyleFlags {
    /// Single flags in the order the markup parser tries them.
    pub const LABELS: [StyleFlags; 3] = [Self::BOLD, Self::ITALIC, Self::UNDERLINE];

    /// Markup character that encloses a line to apply this flag.
    ///
    /// Returns `None` unless `self` is exactly one flag.
    #[must_use]
    pub const fn marker(self) -> Option<char> {
        match self.bits() {
            0b0000_0001 => Some('*'),
            0b0000_0010 => Some('/'),
            0b0000_0100 => Some('_'),
            _ => None,
        }
    }
}
