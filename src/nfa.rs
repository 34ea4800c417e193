use std::collections::{BTreeSet, HashMap};

pub(crate) type StateId = usize;

/// Canonical state-set representation: sorted, comparable by value,
/// usable as a map key.
pub(crate) type StateSet = BTreeSet<StateId>;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) enum Symbol {
    Char(char),
    Epsilon,
}

/// Hands out state ids for one whole assembly pass. Ids are positive and
/// strictly increasing, so fragments built from sibling subtrees never
/// share a state.
pub(crate) struct StateAllocator {
    count: usize,
}

impl StateAllocator {
    pub fn new() -> Self {
        StateAllocator { count: 0 }
    }

    pub fn next_state(&mut self) -> StateId {
        self.count += 1;
        self.count
    }
}

/// NFA under construction: one start state, a set of accept states and
/// the transition edges collected so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NfaFragment {
    pub start: StateId,
    pub accepts: StateSet,
    map: HashMap<(StateId, Symbol), StateSet>,
}

impl NfaFragment {
    fn connect(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        self.map.entry((from, symbol)).or_default().insert(to);
    }

    /// Union of both transition maps. Sibling fragments draw their states
    /// from the same allocator, so the key ranges are disjoint and
    /// nothing is overwritten.
    fn merge(mut self, other: NfaFragment) -> NfaFragment {
        for (key, targets) in other.map {
            self.map.entry(key).or_default().extend(targets);
        }
        self
    }

    /// Two fresh states joined by a single edge; `Epsilon` gives the
    /// fragment matching only the empty string.
    pub fn from_symbol(alloc: &mut StateAllocator, symbol: Symbol) -> Self {
        let mut frag = NfaFragment {
            start: 0,
            accepts: StateSet::new(),
            map: HashMap::new(),
        };

        let s1 = alloc.next_state();
        let s2 = alloc.next_state();
        frag.connect(s1, symbol, s2);

        frag.start = s1;
        frag.accepts.insert(s2);
        frag
    }

    pub fn concat(self, right: NfaFragment) -> NfaFragment {
        let start = self.start;
        let left_accepts = self.accepts.clone();
        let right_start = right.start;
        let right_accepts = right.accepts.clone();

        let mut frag = self.merge(right);

        // left's accepts become internal, wired to right's start
        for state in left_accepts {
            frag.connect(state, Symbol::Epsilon, right_start);
        }

        frag.start = start;
        frag.accepts = right_accepts;
        frag
    }

    pub fn union(self, other: NfaFragment, alloc: &mut StateAllocator) -> NfaFragment {
        let left_start = self.start;
        let other_start = other.start;
        let mut accepts = self.accepts.clone();
        accepts.extend(other.accepts.iter().copied());

        let mut frag = self.merge(other);

        // one fresh start branching into both operands
        let s = alloc.next_state();
        frag.connect(s, Symbol::Epsilon, left_start);
        frag.connect(s, Symbol::Epsilon, other_start);

        frag.start = s;
        frag.accepts = accepts;
        frag
    }

    pub fn star(mut self, alloc: &mut StateAllocator) -> NfaFragment {
        let operand_start = self.start;
        let operand_accepts = self.accepts.clone();

        // loop back for repetition
        for state in operand_accepts {
            self.connect(state, Symbol::Epsilon, operand_start);
        }

        // fresh start, itself accepting, for zero repetitions
        let s = alloc.next_state();
        self.connect(s, Symbol::Epsilon, operand_start);

        self.start = s;
        self.accepts.insert(s);
        self
    }

    pub fn build(self) -> Nfa {
        Nfa {
            start: self.start,
            accepts: self.accepts,
            map: self.map,
        }
    }

    #[cfg(test)]
    pub fn transition(&self, state: StateId, symbol: Symbol) -> StateSet {
        self.map.get(&(state, symbol)).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Nfa {
    pub start: StateId,
    pub accepts: StateSet,
    pub map: HashMap<(StateId, Symbol), StateSet>,
}

impl Nfa {
    /// Total transition function: unknown `(state, symbol)` pairs give
    /// the empty set.
    pub fn transition(&self, state: StateId, symbol: Symbol) -> StateSet {
        self.map.get(&(state, symbol)).cloned().unwrap_or_default()
    }

    /// Every state reachable from `set` through epsilon edges alone.
    /// States are marked before their neighbours are explored, so the
    /// cycles introduced by star construction terminate.
    pub fn epsilon_closure(&self, set: &StateSet) -> StateSet {
        let mut visited = StateSet::new();
        let mut stack: Vec<StateId> = set.iter().copied().collect();

        while let Some(state) = stack.pop() {
            if !visited.insert(state) {
                continue;
            }
            for next in self.transition(state, Symbol::Epsilon) {
                if !visited.contains(&next) {
                    stack.push(next);
                }
            }
        }

        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn set(states: &[StateId]) -> StateSet {
        states.iter().copied().collect()
    }

    /// Hand-built three-state NFA: (0,a)->{1,2}, (1,b)->{2}, (2,ε)->{0}.
    fn abc_loop_nfa() -> Nfa {
        let mut map = HashMap::new();
        map.insert((0, Symbol::Char('a')), set(&[1, 2]));
        map.insert((1, Symbol::Char('b')), set(&[2]));
        map.insert((2, Symbol::Epsilon), set(&[0]));
        Nfa {
            start: 0,
            accepts: set(&[2]),
            map,
        }
    }

    mod allocator {
        use super::*;

        #[test]
        fn ids_are_positive_and_strictly_increasing() {
            // given
            let mut alloc = StateAllocator::new();

            // when
            let ids: Vec<StateId> = (0..5).map(|_| alloc.next_state()).collect();

            // then
            assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        }
    }

    mod fragment_assembly {
        use super::*;

        #[test]
        fn symbol_fragment_is_two_states_and_one_edge() {
            // given
            let mut alloc = StateAllocator::new();

            // when
            let frag = NfaFragment::from_symbol(&mut alloc, Symbol::Char('a'));

            // then
            assert_eq!(frag.start, 1);
            assert_eq!(frag.accepts, set(&[2]));
            assert_eq!(frag.transition(1, Symbol::Char('a')), set(&[2]));
        }

        #[test]
        fn epsilon_fragment_connects_through_an_epsilon_edge() {
            // given
            let mut alloc = StateAllocator::new();

            // when
            let frag = NfaFragment::from_symbol(&mut alloc, Symbol::Epsilon);

            // then
            assert_eq!(frag.transition(1, Symbol::Epsilon), set(&[2]));
            assert_eq!(frag.transition(1, Symbol::Char('a')), set(&[]));
        }

        #[test]
        fn concat_wires_left_accepts_to_right_start() {
            // given: "a" over states 1,2 and "b" over states 3,4
            let mut alloc = StateAllocator::new();
            let left = NfaFragment::from_symbol(&mut alloc, Symbol::Char('a'));
            let right = NfaFragment::from_symbol(&mut alloc, Symbol::Char('b'));

            // when
            let frag = left.concat(right);

            // then
            assert_eq!(frag.start, 1);
            assert_eq!(frag.accepts, set(&[4]));
            assert_eq!(frag.transition(1, Symbol::Char('a')), set(&[2]));
            assert_eq!(frag.transition(2, Symbol::Epsilon), set(&[3]));
            assert_eq!(frag.transition(3, Symbol::Char('b')), set(&[4]));
        }

        #[test]
        fn union_branches_from_one_fresh_start() {
            // given: "a" over states 1,2 and "b" over states 3,4
            let mut alloc = StateAllocator::new();
            let left = NfaFragment::from_symbol(&mut alloc, Symbol::Char('a'));
            let right = NfaFragment::from_symbol(&mut alloc, Symbol::Char('b'));

            // when
            let frag = left.union(right, &mut alloc);

            // then
            assert_eq!(frag.start, 5);
            assert_eq!(frag.transition(5, Symbol::Epsilon), set(&[1, 3]));
            assert_eq!(frag.transition(1, Symbol::Char('a')), set(&[2]));
            assert_eq!(frag.transition(3, Symbol::Char('b')), set(&[4]));
            assert_eq!(frag.accepts, set(&[2, 4]));
        }

        #[test]
        fn star_loops_accepts_back_and_accepts_its_new_start() {
            // given: "a" over states 1,2
            let mut alloc = StateAllocator::new();
            let operand = NfaFragment::from_symbol(&mut alloc, Symbol::Char('a'));

            // when
            let frag = operand.star(&mut alloc);

            // then
            assert_eq!(frag.start, 3);
            assert_eq!(frag.transition(2, Symbol::Epsilon), set(&[1]));
            assert_eq!(frag.transition(3, Symbol::Epsilon), set(&[1]));
            assert_eq!(frag.accepts, set(&[2, 3]));
        }

        #[test]
        fn merged_fragments_keep_every_edge() {
            // given: ab|c, assembled bottom-up from one allocator
            let mut alloc = StateAllocator::new();
            let a = NfaFragment::from_symbol(&mut alloc, Symbol::Char('a'));
            let b = NfaFragment::from_symbol(&mut alloc, Symbol::Char('b'));
            let c = NfaFragment::from_symbol(&mut alloc, Symbol::Char('c'));

            // when
            let frag = a.concat(b).union(c, &mut alloc);

            // then
            assert_eq!(frag.start, 7);
            assert_eq!(frag.transition(7, Symbol::Epsilon), set(&[1, 5]));
            assert_eq!(frag.transition(1, Symbol::Char('a')), set(&[2]));
            assert_eq!(frag.transition(2, Symbol::Epsilon), set(&[3]));
            assert_eq!(frag.transition(3, Symbol::Char('b')), set(&[4]));
            assert_eq!(frag.transition(5, Symbol::Char('c')), set(&[6]));
            assert_eq!(frag.accepts, set(&[4, 6]));
        }
    }

    mod transition {
        use super::*;

        #[test]
        fn known_pairs_yield_their_targets() {
            // given
            let nfa = abc_loop_nfa();

            // when && then
            assert_eq!(nfa.transition(0, Symbol::Char('a')), set(&[1, 2]));
            assert_eq!(nfa.transition(1, Symbol::Char('b')), set(&[2]));
            assert_eq!(nfa.transition(2, Symbol::Epsilon), set(&[0]));
        }

        #[rstest]
        #[case(0, Symbol::Epsilon)]
        #[case(0, Symbol::Char('b'))]
        #[case(1, Symbol::Char('a'))]
        #[case(42, Symbol::Char('a'))]
        fn unknown_pairs_yield_the_empty_set(#[case] state: StateId, #[case] symbol: Symbol) {
            // given
            let nfa = abc_loop_nfa();

            // when && then
            assert_eq!(nfa.transition(state, symbol), set(&[]));
        }
    }

    mod epsilon_closure {
        use super::*;

        #[rstest]
        #[case(&[0], &[0])]
        #[case(&[1], &[1])]
        #[case(&[2], &[0, 2])]
        #[case(&[1, 2], &[0, 1, 2])]
        fn closure_follows_epsilon_edges(#[case] seed: &[StateId], #[case] expected: &[StateId]) {
            // given
            let nfa = abc_loop_nfa();

            // when
            let closure = nfa.epsilon_closure(&set(seed));

            // then
            assert_eq!(closure, set(expected));
        }

        #[test]
        fn closure_of_the_empty_set_is_empty() {
            // given
            let nfa = abc_loop_nfa();

            // when && then
            assert_eq!(nfa.epsilon_closure(&set(&[])), set(&[]));
        }

        #[test]
        fn closure_terminates_on_epsilon_cycles() {
            // given: 1 -ε-> 2 -ε-> 1, plus 2 -ε-> 3
            let mut map = HashMap::new();
            map.insert((1, Symbol::Epsilon), set(&[2]));
            map.insert((2, Symbol::Epsilon), set(&[1, 3]));
            let nfa = Nfa {
                start: 1,
                accepts: set(&[3]),
                map,
            };

            // when
            let closure = nfa.epsilon_closure(&set(&[1]));

            // then
            assert_eq!(closure, set(&[1, 2, 3]));
        }

        #[test]
        fn closure_depends_only_on_reachable_states_not_seed_order() {
            // given: the star-shaped graph from "a*" assembly
            let mut alloc = StateAllocator::new();
            let nfa = NfaFragment::from_symbol(&mut alloc, Symbol::Char('a'))
                .star(&mut alloc)
                .build();

            // when
            let from_pair = nfa.epsilon_closure(&set(&[2, 3]));
            let from_each: StateSet = nfa
                .epsilon_closure(&set(&[3]))
                .union(&nfa.epsilon_closure(&set(&[2])))
                .copied()
                .collect();

            // then
            assert_eq!(from_pair, from_each);
        }
    }
}
