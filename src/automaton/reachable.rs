use std::collections::VecDeque;

use crate::{math::Set, prelude::*};

use super::Deterministic;

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and its state index.
pub type MinimalRepresentative<Ts> = (
    Vec<<Ts as Deterministic>::Symbol>,
    <Ts as Deterministic>::StateIndex,
);

/// Struct that can return the minimal representatives of a transition system. A minimal representative
/// for a state `q` is the length-lexicographically minimal word with which `q` can be reached from a given
/// origin. States are produced in the order of their minimal representatives.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a, Ts: Deterministic> {
    ts: &'a Ts,
    seen: Set<Ts::StateIndex>,
    queue: VecDeque<MinimalRepresentative<Ts>>,
}

impl<'a, Ts: Deterministic> MinimalRepresentatives<'a, Ts> {
    /// Starts the exploration in `origin`.
    pub fn new(ts: &'a Ts, origin: Ts::StateIndex) -> Self {
        let seen = Set::from_iter([origin]);
        let queue = [(vec![], origin)].into_iter().collect();
        Self { ts, seen, queue }
    }
}

impl<'a, Ts: Deterministic> Iterator for MinimalRepresentatives<'a, Ts> {
    type Item = MinimalRepresentative<Ts>;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for sym in self.ts.alphabet().universe() {
            let Some(p) = self.ts.successor(q, sym) else {
                continue;
            };
            if self.seen.insert(p) {
                self.queue.push_back((word::extend(&access, sym), p));
            }
        }
        Some((access, q))
    }
}

/// A state of a [`Product`]. A component is `None` once the corresponding automaton has read a symbol
/// outside of its alphabet, it then behaves like a rejecting sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductIndex(pub Option<StateId>, pub Option<StateId>);

/// The synchronous product of two [`Dfa`]s over the union of their alphabets.
#[derive(Debug, Clone)]
pub struct Product<'a, S: Symbol> {
    left: &'a Dfa<S>,
    right: &'a Dfa<S>,
    alphabet: Alphabet<S>,
}

impl<'a, S: Symbol> Product<'a, S> {
    /// Builds the product of `left` and `right`.
    pub fn new(left: &'a Dfa<S>, right: &'a Dfa<S>) -> Self {
        let alphabet = left
            .alphabet()
            .universe()
            .chain(right.alphabet().universe())
            .cloned()
            .collect();
        Self {
            left,
            right,
            alphabet,
        }
    }
}

impl<'a, S: Symbol> Deterministic for Product<'a, S> {
    type Symbol = S;
    type StateIndex = ProductIndex;

    fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    fn initial(&self) -> ProductIndex {
        ProductIndex(Some(self.left.initial()), Some(self.right.initial()))
    }

    fn successor(&self, state: ProductIndex, symbol: &S) -> Option<ProductIndex> {
        let ProductIndex(l, r) = state;
        Some(ProductIndex(
            l.and_then(|q| self.left.successor(q, symbol)),
            r.and_then(|q| self.right.successor(q, symbol)),
        ))
    }
}
