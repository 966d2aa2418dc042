use crate::prelude::*;

/// Helper struct for the construction of a [`Dfa`]. It stores a list of transitions, a list of state colors
/// and optionally the alphabet. If no alphabet is given, it consists of precisely the symbols that appear on
/// some transition.
///
/// # Example
///
/// We want to create a DFA with two states 0 and 1 over the alphabet `['a', 'b']`, where reading `a`
/// toggles between the states and `b` loops. State 0 should be initial and accepting, state 1 rejecting.
/// ```
/// use automata_lstar::prelude::*;
///
/// let dfa = Dfa::builder()
///     .with_state_colors([true, false]) // colors given in the order of the states
///     .with_transitions([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
///     .into_dfa(0) // 0 is the initial state
///     .unwrap();
/// assert!(dfa.accepts(['a', 'b', 'a']));
/// ```
#[derive(Debug, Clone)]
pub struct DfaBuilder<S: Symbol> {
    alphabet: Option<Alphabet<S>>,
    transitions: Vec<(StateId, S, StateId)>,
    colors: Vec<bool>,
}

impl<S: Symbol> Default for DfaBuilder<S> {
    fn default() -> Self {
        Self {
            alphabet: None,
            transitions: vec![],
            colors: vec![],
        }
    }
}

impl<S: Symbol> DfaBuilder<S> {
    /// Fixes the alphabet of the resulting automaton. Transitions on symbols outside of it are rejected
    /// when the automaton is built.
    pub fn for_alphabet(mut self, alphabet: Alphabet<S>) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Sets the acceptance of states `0, 1, 2, ...` in this order. States without a color are rejecting.
    pub fn with_state_colors<I: IntoIterator<Item = bool>>(mut self, colors: I) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    /// Adds the given transitions, each one being a triple `(source, symbol, target)`.
    pub fn with_transitions<I: IntoIterator<Item = (StateId, S, StateId)>>(
        mut self,
        transitions: I,
    ) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Builds the automaton with `initial` as its initial state. Fails if the transition function is not
    /// total or not deterministic, or if some state index is out of range.
    pub fn into_dfa(self, initial: StateId) -> Result<Dfa<S>, DfaError> {
        let alphabet = match self.alphabet {
            Some(alphabet) => alphabet,
            None => self.transitions.iter().map(|(_, sym, _)| sym.clone()).collect(),
        };
        let size = self
            .transitions
            .iter()
            .map(|(q, _, p)| std::cmp::max(*q, *p) + 1)
            .chain([self.colors.len()])
            .max()
            .unwrap_or(0);

        let mut edges: Vec<Vec<Option<StateId>>> = vec![vec![None; alphabet.size()]; size];
        for (source, sym, target) in self.transitions {
            let pos = alphabet
                .position(&sym)
                .ok_or_else(|| DfaError::UnknownSymbol(sym.show()))?;
            match edges[source][pos] {
                Some(existing) if existing != target => {
                    return Err(DfaError::DuplicateTransition {
                        state: source,
                        symbol: sym.show(),
                    })
                }
                _ => edges[source][pos] = Some(target),
            }
        }

        let edges = edges
            .into_iter()
            .enumerate()
            .map(|(state, targets)| {
                targets
                    .into_iter()
                    .enumerate()
                    .map(|(pos, target)| {
                        target.ok_or_else(|| DfaError::MissingTransition {
                            state,
                            symbol: alphabet[pos].show(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let accepting = self
            .colors
            .iter()
            .enumerate()
            .filter_map(|(q, &accepting)| accepting.then_some(q));
        Dfa::from_parts(alphabet, initial, accepting, edges)
    }
}
