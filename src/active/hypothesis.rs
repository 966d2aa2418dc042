use tracing::debug;

use crate::{math::Bijection, prelude::*};

impl<S: Symbol> ObservationTable<S> {
    /// Constructs the hypothesis induced by the table. Every distinct row of an access string becomes a state,
    /// where states are numbered in the canonical order of their least access string. In particular the
    /// state of the empty word is always `0`, which is also the initial state. A state is accepting if its row
    /// has a positive entry for the empty experiment, and reading `a` in the state of `s` leads to the state
    /// of `s·a`.
    ///
    /// Returns `None` if the table is not closed, as then some transition has no target.
    ///
    /// # Panics
    /// Panics if the table is stale.
    pub fn hypothesis(&self) -> Option<Dfa<S>> {
        let start = std::time::Instant::now();

        let mut states: Bijection<Row, StateId> = Bijection::new();
        let mut representatives = vec![];
        for s in self.access_strings() {
            let row = self.row_signature(s);
            if !states.contains_left(&row) {
                states.insert(row, representatives.len());
                representatives.push(s);
            }
        }

        let mut edges = Vec::with_capacity(representatives.len());
        for s in &representatives {
            let targets = self
                .alphabet()
                .universe()
                .map(|a| {
                    states
                        .get_by_left(&self.row_signature(&word::extend(s, a)))
                        .copied()
                })
                .collect::<Option<Vec<_>>>()?;
            edges.push(targets);
        }
        let accepting = states
            .iter()
            .filter(|(row, _)| row.accepting())
            .map(|(_, q)| *q);

        let hypothesis = Dfa::from_parts(self.alphabet().clone(), 0, accepting, edges).ok()?;
        debug!(
            "built hypothesis with {} states in {}μs",
            hypothesis.size(),
            start.elapsed().as_micros()
        );
        Some(hypothesis)
    }
}
