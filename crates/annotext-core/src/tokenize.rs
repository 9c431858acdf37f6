//! Character-class tokenizer shared by entity finding and rendering.
//!
//! Both [`tokenize`] and [`tokenize_pos`] run the same scan, so token `i` of
//! one call is always token `i` of the other.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// Letters are general category L and digits Nd. Whitespace is category Z plus
// the ASCII control separators. Marks, letter numerals and other numbers
// such as `²` fall into the punctuation class.
static LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}$").expect("letter class pattern"));
static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Nd}$").expect("digit class pattern"));
static SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Z}\t\n\x0B\x0C\r\x1C-\x1F]$").expect("space class pattern")
});

/// Byte range of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOffset {
    pub start: usize,
    pub end: usize,
}

impl TokenOffset {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Alphabetic,
    Numeric,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_ascii() {
            return match c {
                ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r' | '\x1C'..='\x1F' => Self::Whitespace,
                'a'..='z' | 'A'..='Z' => Self::Alphabetic,
                '0'..='9' => Self::Numeric,
                _ => Self::Other,
            };
        }

        let mut buf = [0; 4];
        let c = c.encode_utf8(&mut buf);
        if SPACE.is_match(c) {
            Self::Whitespace
        } else if LETTER.is_match(c) {
            Self::Alphabetic
        } else if DIGIT.is_match(c) {
            Self::Numeric
        } else {
            Self::Other
        }
    }
}

/// Split `text` into tokens and return their byte offsets.
///
/// A token ends wherever the character class changes. Runs of punctuation
/// are split whenever the character changes, so `"..."` stays one token
/// while `".,"` becomes two.
#[must_use]
pub fn tokenize_pos(text: &str) -> Vec<TokenOffset> {
    let mut tokens = Vec::new();
    let mut state = CharClass::Whitespace;
    let mut start = 0;
    let mut prev = '\0';

    for (idx, c) in text.char_indices() {
        let class = CharClass::of(c);

        if state == CharClass::Whitespace {
            if class != CharClass::Whitespace {
                start = idx;
            }
        } else if class != state || (class == CharClass::Other && c != prev) {
            tokens.push(TokenOffset::new(start, idx));
            start = idx;
        }

        state = class;
        prev = c;
    }

    if state != CharClass::Whitespace {
        tokens.push(TokenOffset::new(start, text.len()));
    }

    tokens
}

/// Split `text` into owned token strings.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_pos(text)
        .iter()
        .map(|offset| offset.text(text).to_string())
        .collect()
}
