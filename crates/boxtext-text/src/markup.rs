#![forbid(unsafe_code)]

//! Format-label markup for single diagram text lines.
//!
//! A line is styled as a whole by enclosing it in marker characters. The
//! parser never fails: anything it does not recognize is passed through
//! literally.
//!
//! # Syntax
//!
//! ## Format labels
//! - `*text*` - Bold
//! - `/text/` - Italic
//! - `_text_` - Underline
//!
//! Labels nest in any order (`*/text/*`, `_*text*_`) and each applies at most
//! once. Markers only count when they enclose the whole remaining line and
//! leave at least one character between them, so `a*b`, `**` and `*x` stay
//! literal.
//!
//! ## Stereotype brackets
//! - `<<` - `«`
//! - `>>` - `»`
//!
//! ## Escaping
//! - `\*`, `\/`, `\_` - Literal marker character (never a label)
//! - `\<`, `\>` - Literal bracket (never part of a `<<`/`>>` pair)
//! - `\\` - Literal `\` character
//!
//! Any other backslash is kept as is.
//!
//! # Example
//! ```
//! use boxtext_style::StyleFlags;
//! use boxtext_text::markup::parse_markup;
//!
//! let text = parse_markup("*<<interface>>*");
//! assert_eq!(text.plain(), "«interface»");
//! assert_eq!(text.flags(), StyleFlags::BOLD);
//!
//! let text = parse_markup(r"\*not bold*");
//! assert_eq!(text.plain(), "*not bold*");
//! assert!(text.flags().is_empty());
//! ```

use crate::styled::StyledText;
use boxtext_style::StyleFlags;

/// Escape character.
pub const ESCAPE: char = '\\';

/// Characters that may follow [`ESCAPE`] to be taken literally.
const ESCAPABLE: [char; 6] = ['*', '/', '_', '<', '>', ESCAPE];

/// One output character and whether it came from an escape sequence.
#[derive(Debug, Clone, Copy)]
struct Token {
    ch: char,
    escaped: bool,
}

impl Token {
    #[inline]
    fn plain(ch: char) -> Self {
        Self { ch, escaped: false }
    }

    #[inline]
    fn escaped(ch: char) -> Self {
        Self { ch, escaped: true }
    }

    #[inline]
    fn is_marker(self, marker: char) -> bool {
        !self.escaped && self.ch == marker
    }
}

/// Parse a raw line into plain text plus its format labels.
#[must_use]
pub fn parse_markup(raw: &str) -> StyledText {
    let tokens = tokenize(raw);
    let (flags, start, end) = strip_labels(&tokens);
    let text: String = tokens[start..end].iter().map(|t| t.ch).collect();
    StyledText::new(text, flags)
}

/// Resolve escapes and stereotype brackets.
fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => {
                if let Some(&next) = chars.peek()
                    && ESCAPABLE.contains(&next)
                {
                    chars.next();
                    tokens.push(Token::escaped(next));
                    continue;
                }
                tokens.push(Token::plain(ch));
            }
            '<' if chars.peek() == Some(&'<') => {
                chars.next();
                tokens.push(Token::plain('«'));
            }
            '>' if chars.peek() == Some(&'>') => {
                chars.next();
                tokens.push(Token::plain('»'));
            }
            _ => tokens.push(Token::plain(ch)),
        }
    }

    tokens
}

/// Peel enclosing format labels off the token stream.
///
/// Returns the collected flags and the remaining `[start, end)` token range.
fn strip_labels(tokens: &[Token]) -> (StyleFlags, usize, usize) {
    let mut flags = StyleFlags::empty();
    let mut start = 0;
    let mut end = tokens.len();

    loop {
        let mut applied = false;
        for flag in StyleFlags::LABELS {
            if flags.contains(flag) {
                continue;
            }
            let Some(marker) = flag.marker() else {
                continue;
            };
            if end - start > 2
                && tokens[start].is_marker(marker)
                && tokens[end - 1].is_marker(marker)
            {
                flags.insert(flag);
                start += 1;
                end -= 1;
                applied = true;
            }
        }
        if !applied {
            break;
        }
    }

    (flags, start, end)
}
