use thiserror::Error;

use crate::alphabet::{Alphabet, Symbol};

mod dfa;
pub use dfa::Dfa;

mod builder;
pub use builder::DfaBuilder;

mod reachable;
pub use reachable::{MinimalRepresentative, MinimalRepresentatives, Product, ProductIndex};

mod dot;

/// The type used for identifying states of a [`Dfa`]. States are numbered consecutively starting at `0`.
pub type StateId = usize;

/// A deterministic transition system, i.e. something that has a designated initial state and at most one
/// successor for every state and symbol. This is the minimal interface needed for exploring the states
/// reachable from the initial state, see [`MinimalRepresentatives`].
pub trait Deterministic {
    /// The type of symbols labelling the transitions.
    type Symbol: Symbol;
    /// The type used for identifying states.
    type StateIndex: Copy + Eq + std::hash::Hash + std::fmt::Debug;

    /// Returns the alphabet over which the transitions are labelled.
    fn alphabet(&self) -> &Alphabet<Self::Symbol>;

    /// Returns the designated initial state.
    fn initial(&self) -> Self::StateIndex;

    /// Returns the state reached from `state` on `symbol`, or `None` if no such transition exists.
    fn successor(&self, state: Self::StateIndex, symbol: &Self::Symbol) -> Option<Self::StateIndex>;

    /// Runs `word` starting in `origin` and returns the state that is reached, if there is one.
    fn reached_state_from(&self, origin: Self::StateIndex, word: &[Self::Symbol]) -> Option<Self::StateIndex> {
        word.iter()
            .try_fold(origin, |state, symbol| self.successor(state, symbol))
    }

    /// Returns an iterator over the minimal representatives of all states reachable from the initial
    /// state, see [`MinimalRepresentatives`].
    fn minimal_representatives(&self) -> MinimalRepresentatives<'_, Self>
    where
        Self: Sized,
    {
        MinimalRepresentatives::new(self, self.initial())
    }
}

/// Errors that can occur when constructing a [`Dfa`] from its parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DfaError {
    /// A DFA needs at least one state, namely the initial one.
    #[error("automaton has no states")]
    NoStates,
    /// A transition or the initial state refers to a state that does not exist.
    #[error("state {0} does not exist")]
    UnknownState(StateId),
    /// A transition is labelled with a symbol that is not part of the alphabet.
    #[error("symbol `{0}` is not part of the alphabet")]
    UnknownSymbol(String),
    /// Some state has two different transitions on the same symbol.
    #[error("state {state} has more than one transition on `{symbol}`")]
    DuplicateTransition {
        /// The state with the offending transitions.
        state: StateId,
        /// The symbol on which the transitions overlap.
        symbol: String,
    },
    /// Some state lacks a transition, the transition function of a DFA has to be total.
    #[error("state {state} has no transition on `{symbol}`")]
    MissingTransition {
        /// The state that lacks a transition.
        state: StateId,
        /// The symbol for which no transition exists.
        symbol: String,
    },
}
