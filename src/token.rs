use std::fmt::{Display, Formatter};
use std::str::Chars;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Token {
    Character(char),
    UnionOp,
    StarOp,
    LParen,
    RParen,
    EndOfInput,
}

/// Token discriminant without the payload; what the parser compares and
/// what a [`SyntaxError`](crate::SyntaxError) reports.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Character,
    UnionOp,
    StarOp,
    LParen,
    RParen,
    EndOfInput,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Character(_) => TokenKind::Character,
            Token::UnionOp => TokenKind::UnionOp,
            Token::StarOp => TokenKind::StarOp,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::EndOfInput => TokenKind::EndOfInput,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Character => "character",
            TokenKind::UnionOp => "'|'",
            TokenKind::StarOp => "'*'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::EndOfInput => "end of input",
        };
        write!(f, "{name}")
    }
}

pub(crate) struct Lexer<'a> {
    chars: Chars<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(pattern: &'a str) -> Self {
        Self {
            chars: pattern.chars(),
        }
    }

    /// Produces exactly one token per call; keeps returning `EndOfInput`
    /// once the pattern is exhausted. A `\` consumes the following
    /// character and yields it verbatim as `Character`; a `\` with
    /// nothing after it has no character to escape and reads as end of
    /// input.
    pub fn scan(&mut self) -> Token {
        let Some(c) = self.chars.next() else {
            return Token::EndOfInput;
        };

        match c {
            '\\' => match self.chars.next() {
                Some(escaped) => Token::Character(escaped),
                None => Token::EndOfInput,
            },
            '|' => Token::UnionOp,
            '*' => Token::StarOp,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => Token::Character(c),
        }
    }
}
