use ast::Parser;
use dfa::Dfa;
use nfa::StateAllocator;

mod ast;
mod dfa;
mod error;
mod nfa;
mod token;

pub use error::SyntaxError;
pub use token::TokenKind;

/// A pattern compiled down to a deterministic automaton. Immutable once
/// built; matching never mutates it, so one `Regex` can back any number
/// of concurrent matches.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    dfa: Dfa,
}

impl Regex {
    /// Compiles `pattern` in one step: parse, Thompson-assemble the NFA,
    /// determinize. Aborts on the first grammar mismatch with no partial
    /// automaton.
    ///
    /// Syntax: `|` for union, `*` for zero-or-more, `(` `)` for
    /// grouping, `\` to escape any single character (including the
    /// metacharacters and `\` itself). Every other code point matches
    /// itself.
    pub fn new(pattern: &str) -> Result<Self, SyntaxError> {
        let ast = Parser::new(pattern).parse()?;

        let mut alloc = StateAllocator::new();
        let nfa = ast.assemble(&mut alloc).build();

        Ok(Regex {
            pattern: pattern.to_string(),
            dfa: Dfa::from_nfa(nfa),
        })
    }

    /// Whole-string acceptance: true iff the entire input is generated
    /// by the pattern's language. Iterates by code point and never
    /// fails; symbols outside the pattern's alphabet just drive the
    /// automaton into a dead configuration.
    pub fn is_exact_match(&self, input: &str) -> bool {
        self.dfa.runtime().accepts(input)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
