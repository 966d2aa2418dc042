use tracing::{info, trace};

use crate::prelude::*;

/// Where a counterexample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterexampleOrigin {
    /// A positive example that the hypothesis rejects.
    PositiveExample,
    /// A negative example that the hypothesis accepts.
    NegativeExample,
    /// The equivalence query of the teacher.
    Equivalence,
}

/// A word that the current hypothesis classifies wrongly, together with the correct classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterexample<S: Symbol> {
    /// The misclassified word.
    pub word: Word<S>,
    /// Whether `word` belongs to the target language.
    pub expected: bool,
    /// How the word was found.
    pub origin: CounterexampleOrigin,
}

/// Checks hypotheses, first against the examples of a [`Sample`] and only if all of them are classified
/// correctly by asking the equivalence query of the teacher.
#[derive(Debug, Clone, Copy)]
pub struct Verifier<'a, S: Symbol> {
    sample: &'a Sample<S>,
}

impl<'a, S: Symbol> Verifier<'a, S> {
    /// Creates a verifier that consults `sample` before the teacher.
    pub fn new(sample: &'a Sample<S>) -> Self {
        Self { sample }
    }

    /// Searches for a counterexample to `hypothesis`. Positive examples are checked before negative ones, each
    /// in canonical order. A misclassified example is confirmed with a single membership query, afterwards the
    /// equivalence query is posed. Returns `Ok(None)` if no counterexample exists.
    ///
    /// Fails with [`LearningError::ContradictingExample`] if the teacher disagrees with the label of an example
    /// and with [`LearningError::InvalidCounterexample`] if the equivalence query returns a word that the
    /// hypothesis classifies like the teacher does.
    pub fn verify<O>(
        &self,
        hypothesis: &Dfa<S>,
        oracle: &mut O,
    ) -> Result<Option<Counterexample<S>>, LearningError>
    where
        O: Oracle<Symbol = S>,
    {
        let misclassified = self
            .sample
            .positive()
            .find(|w| !hypothesis.accepts(w))
            .map(|w| (w, true, CounterexampleOrigin::PositiveExample))
            .or_else(|| {
                self.sample
                    .negative()
                    .find(|w| hypothesis.accepts(w))
                    .map(|w| (w, false, CounterexampleOrigin::NegativeExample))
            });

        if let Some((word, expected, origin)) = misclassified {
            if oracle.membership(word) != expected {
                return Err(LearningError::ContradictingExample {
                    word: word.show(),
                    expected,
                });
            }
            info!("example {} is misclassified by hypothesis", word.show());
            return Ok(Some(Counterexample {
                word: word.clone(),
                expected,
                origin,
            }));
        }
        trace!("hypothesis agrees with all {} examples", self.sample.len());

        let Some(word) = oracle.equivalence(hypothesis) else {
            return Ok(None);
        };
        let expected = oracle.membership(&word);
        if expected == hypothesis.accepts(&word) {
            return Err(LearningError::InvalidCounterexample {
                word: word.show(),
                classification: expected,
            });
        }
        info!("teacher returned counterexample {}", word.show());
        Ok(Some(Counterexample {
            word,
            expected,
            origin: CounterexampleOrigin::Equivalence,
        }))
    }
}
