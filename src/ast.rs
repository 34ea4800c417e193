use crate::error::SyntaxError;
use crate::nfa::{NfaFragment, StateAllocator, Symbol};
use crate::token::{Lexer, Token, TokenKind};

/// Pattern syntax tree. `Empty` matches only the empty string; it is what
/// an empty pattern or an empty union branch parses to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum AstNode {
    Literal(char),
    Empty,
    Concat(Box<AstNode>, Box<AstNode>),
    Union(Box<AstNode>, Box<AstNode>),
    Star(Box<AstNode>),
}

impl AstNode {
    /// Thompson construction. Fresh states come from `alloc`, which is
    /// threaded through every recursive call so sibling fragments never
    /// collide when merged.
    pub(crate) fn assemble(&self, alloc: &mut StateAllocator) -> NfaFragment {
        match self {
            AstNode::Literal(c) => NfaFragment::from_symbol(alloc, Symbol::Char(*c)),
            AstNode::Empty => NfaFragment::from_symbol(alloc, Symbol::Epsilon),
            AstNode::Concat(left, right) => {
                let left_frag = left.assemble(alloc);
                let right_frag = right.assemble(alloc);
                left_frag.concat(right_frag)
            }
            AstNode::Union(left, right) => {
                let left_frag = left.assemble(alloc);
                let right_frag = right.assemble(alloc);
                left_frag.union(right_frag, alloc)
            }
            AstNode::Star(operand) => operand.assemble(alloc).star(alloc),
        }
    }
}

/// Recursive-descent parser. Precedence: star binds tighter than
/// concatenation, concatenation tighter than union. Fails fast on the
/// first lookahead mismatch; no recovery, no partial tree.
pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    look: Token,
}

impl<'a> Parser<'a> {
    pub fn new(pattern: &'a str) -> Self {
        let mut lexer = Lexer::new(pattern);
        let look = lexer.scan();
        Parser { lexer, look }
    }

    /// expression -> subexpr EndOfInput
    pub fn parse(mut self) -> Result<AstNode, SyntaxError> {
        let node = self.parse_alternation()?;
        self.expect(TokenKind::EndOfInput)?;
        Ok(node)
    }

    fn advance(&mut self) {
        self.look = self.lexer.scan();
    }

    fn expect(&mut self, expected: TokenKind) -> Result<(), SyntaxError> {
        if self.look.kind() != expected {
            return Err(SyntaxError::new(expected, self.look.kind()));
        }
        self.advance();
        Ok(())
    }

    fn starts_atom(&self) -> bool {
        matches!(self.look.kind(), TokenKind::Character | TokenKind::LParen)
    }

    /// subexpr -> seq ('|' subexpr)?
    fn parse_alternation(&mut self) -> Result<AstNode, SyntaxError> {
        let node = self.parse_sequence()?;

        if self.look.kind() == TokenKind::UnionOp {
            self.expect(TokenKind::UnionOp)?;
            let right = self.parse_alternation()?;
            return Ok(AstNode::Union(Box::new(node), Box::new(right)));
        }

        Ok(node)
    }

    /// seq -> subseq | ''
    fn parse_sequence(&mut self) -> Result<AstNode, SyntaxError> {
        if self.starts_atom() {
            self.parse_concatenation()
        } else {
            Ok(AstNode::Empty)
        }
    }

    /// subseq -> star subseq | star
    fn parse_concatenation(&mut self) -> Result<AstNode, SyntaxError> {
        let node = self.parse_star()?;

        if self.starts_atom() {
            let rest = self.parse_concatenation()?;
            return Ok(AstNode::Concat(Box::new(node), Box::new(rest)));
        }

        Ok(node)
    }

    /// star -> factor '*'?
    fn parse_star(&mut self) -> Result<AstNode, SyntaxError> {
        let mut node = self.parse_literal_or_group()?;

        if self.look.kind() == TokenKind::StarOp {
            self.expect(TokenKind::StarOp)?;
            node = AstNode::Star(Box::new(node));
        }

        Ok(node)
    }

    /// factor -> '(' subexpr ')' | character
    fn parse_literal_or_group(&mut self) -> Result<AstNode, SyntaxError> {
        if self.look.kind() == TokenKind::LParen {
            self.expect(TokenKind::LParen)?;
            let node = self.parse_alternation()?;
            self.expect(TokenKind::RParen)?;
            return Ok(node);
        }

        match self.look {
            Token::Character(c) => {
                self.advance();
                Ok(AstNode::Literal(c))
            }
            other => Err(SyntaxError::new(TokenKind::Character, other.kind())),
        }
    }
}
