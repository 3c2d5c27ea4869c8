use std::ops::Deref;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TokenKind / Token
// ---------------------------------------------------------------------------

/// Category of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Word,
    /// A single space between words.
    Space,
    /// Two adjacent spaces collapsed into one marker.
    DoubleSpace,
    /// End of a line. Every line, including the last, ends with one.
    LineBreak,
}

/// Atomic comparable unit of text produced by the tokenizer.
///
/// Tokens carry no position; two tokens are the same token when kind and
/// text are equal. The ordering only exists so token slices can feed the
/// Myers backend; it carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Text as it appears in the revision. Line breaks keep their terminator
    /// (`"\n"` or `"\r\n"`).
    pub text: String,
}

impl Token {
    pub fn word(text: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Word,
            text: text.into(),
        }
    }

    pub fn space() -> Self {
        Self {
            kind: TokenKind::Space,
            text: " ".to_string(),
        }
    }

    pub fn double_space() -> Self {
        Self {
            kind: TokenKind::DoubleSpace,
            text: "  ".to_string(),
        }
    }

    pub fn line_break() -> Self {
        Self::line_end("\n")
    }

    /// Line break carrying the revision's own terminator.
    pub fn line_end(terminator: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::LineBreak,
            text: terminator.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_space(&self) -> bool {
        self.kind == TokenKind::Space
    }
}

/// Concatenate the text of `tokens` back into plain text.
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(Token::as_str).collect()
}

// ---------------------------------------------------------------------------
// TokenSequence
// ---------------------------------------------------------------------------

/// Ordered, immutable token list for one revision of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<Token>);

impl TokenSequence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Token> {
        self.0
    }
}

impl Deref for TokenSequence {
    type Target = [Token];

    fn deref(&self) -> &[Token] {
        &self.0
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
