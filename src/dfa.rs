use crate::nfa::{Nfa, StateSet, Symbol};

/// Subset-construction view of an NFA. A DFA state is an epsilon-closed
/// set of NFA states, compared by value; nothing is renumbered or
/// minimized. Transitions are recomputed from the NFA on every step
/// instead of being tabulated up front.
// TODO: memoize the (state set, symbol) -> state set results once a
// pattern shows up that makes the repeated closure work measurable
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Dfa {
    nfa: Nfa,
    start: StateSet,
}

impl Dfa {
    pub fn from_nfa(nfa: Nfa) -> Self {
        let start = nfa.epsilon_closure(&StateSet::from([nfa.start]));
        Dfa { nfa, start }
    }

    /// Move every state in `set` over `c`, then close the union under
    /// epsilon edges. Total: a dead configuration is the empty set.
    pub fn transition(&self, set: &StateSet, c: char) -> StateSet {
        let mut moved = StateSet::new();
        for &state in set {
            moved.extend(self.nfa.transition(state, Symbol::Char(c)));
        }
        self.nfa.epsilon_closure(&moved)
    }

    /// Evaluated on demand: a state set accepts iff it intersects the
    /// NFA accept set.
    pub fn is_accepting(&self, set: &StateSet) -> bool {
        set.iter().any(|state| self.nfa.accepts.contains(state))
    }

    pub fn runtime(&self) -> DfaRuntime<'_> {
        DfaRuntime {
            dfa: self,
            current: self.start.clone(),
        }
    }
}

/// One matching session: shares the automaton read-only, owns its
/// mutable current state set. `accepts` consumes the session, so a
/// session observes exactly one input.
pub(crate) struct DfaRuntime<'a> {
    dfa: &'a Dfa,
    current: StateSet,
}

impl DfaRuntime<'_> {
    fn step(&mut self, c: char) {
        self.current = self.dfa.transition(&self.current, c);
    }

    fn is_accepting(&self) -> bool {
        self.dfa.is_accepting(&self.current)
    }

    pub fn accepts(mut self, input: &str) -> bool {
        for c in input.chars() {
            self.step(c);
        }
        self.is_accepting()
    }
}
