use crate::token::TokenKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The one compile-time error: the parser's lookahead did not have the
/// kind the grammar expects at that point. Compilation aborts on the
/// first mismatch; no partial automaton is ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxError {
    expected: TokenKind,
    found: TokenKind,
}

impl SyntaxError {
    pub(crate) fn new(expected: TokenKind, found: TokenKind) -> Self {
        SyntaxError { expected, found }
    }

    pub fn expected(&self) -> TokenKind {
        self.expected
    }

    pub fn found(&self) -> TokenKind {
        self.found
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "syntax error: expected {}, found {}",
            self.expected, self.found
        )
    }
}

impl Error for SyntaxError {}
