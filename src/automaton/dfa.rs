use std::collections::BTreeMap;

use bit_set::BitSet;

use crate::prelude::*;

use super::{Deterministic, Product, ProductIndex};

/// A deterministic finite automaton (DFA) over some [`Alphabet`]. The states are numbered `0..size()`,
/// one of them is initial and an arbitrary subset of them is accepting. The transition function is total,
/// i.e. for every state and every symbol of the alphabet there is precisely one successor.
///
/// A DFA accepts a finite word if running it from the initial state ends in an accepting state. Symbols
/// that are not part of the alphabet lead to rejection.
#[derive(Clone, PartialEq, Eq)]
pub struct Dfa<S: Symbol = char> {
    alphabet: Alphabet<S>,
    initial: StateId,
    accepting: BitSet,
    // edges[q][i] is the successor of q on the i-th symbol of the alphabet
    edges: Vec<Vec<StateId>>,
}

impl<S: Symbol> Dfa<S> {
    /// Returns a [`DfaBuilder`] for constructing a DFA state by state and transition by transition.
    pub fn builder() -> DfaBuilder<S> {
        DfaBuilder::default()
    }

    /// Assembles a DFA from its parts, verifying that the transition function is total and only refers to
    /// existing states. `edges[q][i]` has to be the successor of `q` on the `i`-th symbol of `alphabet`.
    pub fn from_parts(
        alphabet: Alphabet<S>,
        initial: StateId,
        accepting: impl IntoIterator<Item = StateId>,
        edges: Vec<Vec<StateId>>,
    ) -> Result<Self, DfaError> {
        let size = edges.len();
        let symbols = alphabet.size();
        if size == 0 {
            return Err(DfaError::NoStates);
        }
        if initial >= size {
            return Err(DfaError::UnknownState(initial));
        }
        for (state, targets) in edges.iter().enumerate() {
            if targets.len() < symbols {
                return Err(DfaError::MissingTransition {
                    state,
                    symbol: alphabet[targets.len()].show(),
                });
            }
            if let Some(&target) = targets.iter().find(|&&target| target >= size) {
                return Err(DfaError::UnknownState(target));
            }
        }
        let mut accepting_states = BitSet::with_capacity(size);
        for state in accepting {
            if state >= size {
                return Err(DfaError::UnknownState(state));
            }
            accepting_states.insert(state);
        }

        Ok(Self {
            alphabet,
            initial,
            accepting: accepting_states,
            edges: edges
                .into_iter()
                .map(|mut targets| {
                    targets.truncate(symbols);
                    targets
                })
                .collect(),
        })
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// Returns the alphabet the automaton reads.
    pub fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    /// Returns the id of the initial state.
    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// Returns `true` if `state` exists and is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    /// Returns the ids of all accepting states in ascending order.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.accepting.iter()
    }

    /// Returns the ids of all rejecting states in ascending order.
    pub fn rejecting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.size()).filter(move |q| !self.accepting.contains(*q))
    }

    /// Returns the state that is reached from `state` on `symbol`. Gives back `None` if the state does not
    /// exist or the symbol is not part of the alphabet.
    pub fn successor(&self, state: StateId, symbol: &S) -> Option<StateId> {
        let pos = self.alphabet.position(symbol)?;
        self.edges.get(state).map(|targets| targets[pos])
    }

    /// Runs `word` from the initial state and returns the reached state, if there is one.
    pub fn reached_state<W: AsRef<[S]>>(&self, word: W) -> Option<StateId> {
        self.reached_state_from(self.initial, word.as_ref())
    }

    /// Returns `true` if and only if the automaton accepts `word`.
    pub fn accepts<W: AsRef<[S]>>(&self, word: W) -> bool {
        self.reached_state(word)
            .map(|q| self.is_accepting(q))
            .unwrap_or(false)
    }

    /// Iterates over all transitions as triples `(source, symbol, target)`, ordered by source state and then
    /// by symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, &S, StateId)> + '_ {
        self.edges.iter().enumerate().flat_map(move |(q, targets)| {
            self.alphabet
                .universe()
                .zip(targets.iter())
                .map(move |(sym, &p)| (q, sym, p))
        })
    }

    /// Returns the transition function as a map keyed by state and symbol.
    pub fn transition_table(&self) -> BTreeMap<(StateId, S), StateId> {
        self.transitions()
            .map(|(q, sym, p)| ((q, sym.clone()), p))
            .collect()
    }

    /// Computes the complement of `self` by swapping accepting and rejecting states.
    pub fn complement(&self) -> Self {
        Self {
            alphabet: self.alphabet.clone(),
            initial: self.initial,
            accepting: self.rejecting_states().collect(),
            edges: self.edges.clone(),
        }
    }

    /// Tries to find a word on which `self` and `other` disagree. The search explores the product of both
    /// automata breadth-first, so the returned word is the length-lexicographically least word in the
    /// symmetric difference of the two languages.
    pub fn separating_word(&self, other: &Dfa<S>) -> Option<Word<S>> {
        Product::new(self, other)
            .minimal_representatives()
            .find_map(|(word, ProductIndex(left, right))| {
                let l = left.map(|q| self.is_accepting(q)).unwrap_or(false);
                let r = right.map(|q| other.is_accepting(q)).unwrap_or(false);
                (l != r).then_some(word)
            })
    }

    /// Checks whether `self` and `other` accept the same language.
    pub fn equivalent(&self, other: &Dfa<S>) -> bool {
        self.separating_word(other).is_none()
    }

    /// Returns the length-lexicographically least accepted word, or `None` if the accepted language is empty.
    pub fn give_word(&self) -> Option<Word<S>> {
        self.minimal_representatives()
            .find_map(|(word, q)| self.is_accepting(q).then_some(word))
    }

    /// Returns true if and only if the accepted language is empty.
    pub fn is_empty_language(&self) -> bool {
        self.give_word().is_none()
    }
}

impl<S: Symbol> Deterministic for Dfa<S> {
    type Symbol = S;
    type StateIndex = StateId;

    fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    fn initial(&self) -> StateId {
        self.initial
    }

    fn successor(&self, state: StateId, symbol: &S) -> Option<StateId> {
        Dfa::successor(self, state, symbol)
    }
}

impl<S: Symbol> std::fmt::Debug for Dfa<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = tabled::builder::Builder::default();
        let mut header = vec!["DFA".to_string()];
        header.extend(self.alphabet.universe().map(|sym| sym.show()));
        builder.push_record(header);

        for q in 0..self.size() {
            let mut name = format!("q{q}");
            if q == self.initial {
                name = format!("→{name}");
            }
            if self.is_accepting(q) {
                name.push('*');
            }
            let mut row = vec![name];
            row.extend(self.edges[q].iter().map(|p| format!("q{p}")));
            builder.push_record(row);
        }

        write!(f, "{}", builder.build())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn even_a() -> Dfa {
        Dfa::builder()
            .with_state_colors([true, false])
            .with_transitions([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
            .into_dfa(0)
            .unwrap()
    }

    #[test]
    fn dfa_acceptance() {
        let dfa = even_a();
        assert_eq!(dfa.size(), 2);
        assert!(dfa.accepts([]));
        assert!(dfa.accepts(['a', 'b', 'a']));
        assert!(!dfa.accepts(['b', 'a']));
        assert!(!dfa.accepts(['c']));
        assert_eq!(dfa.reached_state(['a']), Some(1));
        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), vec![0]);
        assert_eq!(dfa.rejecting_states().collect::<Vec<_>>(), vec![1]);
        assert_eq!(dfa.transition_table().get(&(1, 'a')), Some(&0));
        assert_eq!(dfa.transitions().count(), 4);
    }

    #[test]
    fn dfa_separation() {
        let dfa = even_a();
        let complement = dfa.complement();
        assert_eq!(dfa.separating_word(&complement), Some(vec![]));
        assert!(dfa.equivalent(&dfa.clone()));

        let all = Dfa::builder()
            .with_state_colors([true])
            .with_transitions([(0, 'a', 0), (0, 'b', 0)])
            .into_dfa(0)
            .unwrap();
        assert_eq!(dfa.separating_word(&all), Some(vec!['a']));
        assert_eq!(complement.give_word(), Some(vec!['a']));
        assert!(!all.is_empty_language());
        assert!(all.complement().is_empty_language());
    }

    #[test]
    fn dfa_from_parts_validates() {
        let alphabet = alphabet!('a', 'b');
        assert_eq!(
            Dfa::from_parts(alphabet.clone(), 0, [], vec![]),
            Err(DfaError::NoStates)
        );
        assert_eq!(
            Dfa::from_parts(alphabet.clone(), 0, [], vec![vec![0]]),
            Err(DfaError::MissingTransition {
                state: 0,
                symbol: "b".to_string()
            })
        );
        assert_eq!(
            Dfa::from_parts(alphabet.clone(), 0, [3], vec![vec![0, 0]]),
            Err(DfaError::UnknownState(3))
        );
        assert!(Dfa::from_parts(alphabet, 0, [0], vec![vec![0, 0]]).is_ok());
    }
}
