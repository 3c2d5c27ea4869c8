//! Line-and-space tokenizer for document revisions.
//!
//! Tokenization rules:
//! - Text is split into lines; every line, including the last, is followed by
//!   a `LineBreak` token carrying the line's terminator (`\n` or `\r\n`). A
//!   last line without a terminator gets `\n`.
//! - Within a line, words are separated by single ASCII spaces and each space
//!   is kept as a `Space` token.
//! - Two adjacent spaces collapse into one `DoubleSpace` token, so
//!   whitespace-only edits stay visible without runs of empty tokens.
//!
//! Example:
//!   "The cat  sat" →
//!   [The][ ][cat][  ][sat][\n]

use wd_core::{Token, TokenSequence};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Tokenize `text` into a [`TokenSequence`].
///
/// Lines end at `\n` or `\r\n`, and switching a line between the two is a
/// visible edit. A trailing terminator does not start an extra empty line, so
/// empty input yields an empty sequence and `"a\n"` tokenizes like `"a"`:
/// adding or removing only the final newline is not reported.
pub fn tokenize(text: &str) -> TokenSequence {
    let mut tokens = Vec::new();
    for piece in text.split_inclusive('\n') {
        let (line, terminator) = split_terminator(piece);
        tokens.extend(tokenize_line(line));
        tokens.push(Token::line_end(terminator));
    }
    TokenSequence::new(tokens)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Separate a line from its terminator; an unterminated last line ends in `\n`.
fn split_terminator(piece: &str) -> (&str, &str) {
    if let Some(line) = piece.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = piece.strip_suffix('\n') {
        (line, "\n")
    } else {
        (piece, "\n")
    }
}

/// Fold the raw word/space pieces of one line, looking back at the last
/// emitted token to collapse space pairs.
fn tokenize_line(line: &str) -> Vec<Token> {
    split_keeping_spaces(line).fold(Vec::new(), |mut acc, token| {
        match acc.last_mut() {
            Some(previous) if previous.is_space() && token.is_space() => {
                *previous = Token::double_space();
            }
            _ => acc.push(token),
        }
        acc
    })
}

/// Split on `' '`, yielding each non-empty word and each space as a token.
fn split_keeping_spaces(line: &str) -> impl Iterator<Item = Token> + '_ {
    line.split_inclusive(' ').flat_map(|piece| {
        let (word, space) = match piece.strip_suffix(' ') {
            Some(word) => (word, Some(Token::space())),
            None => (piece, None),
        };
        let word = (!word.is_empty()).then(|| Token::word(word));
        word.into_iter().chain(space)
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
