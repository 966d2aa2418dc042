use crate::{prelude::*, word::WordsUpTo};

/// A trait that encapsulates a minimally adequate teacher (MAT) for active learning. It is used by the
/// [`LStar`] learner and can be implemented by wildly different types, for example an automaton, a function
/// or even a collection of words.
///
/// Both queries take `&mut self`, which allows a teacher to keep state between queries, e.g. to count them
/// or to drive a system under test. The learner never issues two queries at once and answers must be
/// deterministic: asking the same membership query twice has to produce the same answer.
pub trait Oracle {
    /// The type of symbols the teacher understands.
    type Symbol: Symbol;

    /// Answers whether `word` belongs to the target language.
    fn membership(&mut self, word: &[Self::Symbol]) -> bool;

    /// Checks whether `hypothesis` accepts precisely the target language. If it does not, a counterexample
    /// is returned, i.e. a word on which the hypothesis and the target language disagree.
    fn equivalence(&mut self, hypothesis: &Dfa<Self::Symbol>) -> Option<Word<Self::Symbol>>;
}

impl<O: Oracle + ?Sized> Oracle for &mut O {
    type Symbol = O::Symbol;

    fn membership(&mut self, word: &[Self::Symbol]) -> bool {
        (**self).membership(word)
    }

    fn equivalence(&mut self, hypothesis: &Dfa<Self::Symbol>) -> Option<Word<Self::Symbol>> {
        (**self).equivalence(hypothesis)
    }
}

/// An oracle based on a [`Dfa`]. It answers membership queries by running the word through the automaton.
/// Equivalence queries explore the product of the target and the hypothesis breadth-first, so the returned
/// counterexample is always the length-lexicographically least word on which both disagree.
#[derive(Debug, Clone)]
pub struct DfaOracle<S: Symbol = char> {
    target: Dfa<S>,
}

impl<S: Symbol> DfaOracle<S> {
    /// Creates a new instance of a [`DfaOracle`] from the given automaton.
    pub fn new(target: Dfa<S>) -> Self {
        Self { target }
    }

    /// Returns a reference to the target automaton.
    pub fn target(&self) -> &Dfa<S> {
        &self.target
    }
}

impl<S: Symbol> Oracle for DfaOracle<S> {
    type Symbol = S;

    fn membership(&mut self, word: &[S]) -> bool {
        self.target.accepts(word)
    }

    fn equivalence(&mut self, hypothesis: &Dfa<S>) -> Option<Word<S>> {
        self.target.separating_word(hypothesis)
    }
}

/// An oracle whose membership queries are answered by a function. As the target language is not known
/// explicitly, equivalence queries are approximated by testing every word up to a maximal length in
/// length-lexicographic order. Languages that only differ from the hypothesis on longer words go
/// unnoticed.
#[derive(Clone)]
pub struct BoundedOracle<S: Symbol, F> {
    alphabet: Alphabet<S>,
    max_len: usize,
    membership: F,
}

impl<S: Symbol, F: FnMut(&[S]) -> bool> BoundedOracle<S, F> {
    /// Creates an oracle answering membership queries with `membership` and equivalence queries by checking
    /// all words over `alphabet` of length at most `max_len`.
    pub fn new(alphabet: Alphabet<S>, max_len: usize, membership: F) -> Self {
        Self {
            alphabet,
            max_len,
            membership,
        }
    }
}

impl<S: Symbol, F: FnMut(&[S]) -> bool> Oracle for BoundedOracle<S, F> {
    type Symbol = S;

    fn membership(&mut self, word: &[S]) -> bool {
        (self.membership)(word)
    }

    fn equivalence(&mut self, hypothesis: &Dfa<S>) -> Option<Word<S>> {
        let membership = &mut self.membership;
        WordsUpTo::new(&self.alphabet, self.max_len)
            .find(|w| membership(w.as_slice()) != hypothesis.accepts(w))
    }
}

/// An oracle/minimally adequate teacher based on a [`Sample`]. It answers membership queries by looking up
/// the word in the sample and returning the corresponding classification. If the word is not in the sample,
/// it returns the default. Equivalence queries check whether the hypothesis classifies every word of the
/// sample correctly.
#[derive(Debug, Clone)]
pub struct SampleOracle<S: Symbol> {
    sample: Sample<S>,
    default: bool,
}

impl<S: Symbol> SampleOracle<S> {
    /// Creates a new instance of a [`SampleOracle`] with the given sample and default classification.
    pub fn new(sample: Sample<S>, default: bool) -> Self {
        Self { sample, default }
    }

    /// Returns a reference to the underlying sample.
    pub fn sample(&self) -> &Sample<S> {
        &self.sample
    }
}

impl<S: Symbol> From<(Sample<S>, bool)> for SampleOracle<S> {
    fn from((sample, default): (Sample<S>, bool)) -> Self {
        Self::new(sample, default)
    }
}

impl<S: Symbol> Oracle for SampleOracle<S> {
    type Symbol = S;

    fn membership(&mut self, word: &[S]) -> bool {
        self.sample.classify(word).unwrap_or(self.default)
    }

    fn equivalence(&mut self, hypothesis: &Dfa<S>) -> Option<Word<S>> {
        self.sample
            .annotated()
            .find(|(w, classification)| hypothesis.accepts(w) != *classification)
            .map(|(w, _)| w.clone())
    }
}

/// Number of queries posed to a teacher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Number of membership queries.
    pub membership: usize,
    /// Number of equivalence queries.
    pub equivalence: usize,
}

impl QueryStats {
    /// Total number of queries of either kind.
    pub fn total(&self) -> usize {
        self.membership + self.equivalence
    }
}

impl Show for QueryStats {
    fn show(&self) -> String {
        format!(
            "{} membership and {} equivalence queries",
            self.membership, self.equivalence
        )
    }
}

/// Wraps an oracle and counts the queries that pass through it.
#[derive(Debug, Clone)]
pub struct Counting<O> {
    oracle: O,
    stats: QueryStats,
}

impl<O: Oracle> Counting<O> {
    /// Starts counting the queries posed to `oracle`.
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            stats: QueryStats::default(),
        }
    }

    /// Returns the queries counted so far.
    pub fn stats(&self) -> QueryStats {
        self.stats
    }

    /// Gives back the wrapped oracle.
    pub fn into_inner(self) -> O {
        self.oracle
    }
}

impl<O: Oracle> Oracle for Counting<O> {
    type Symbol = O::Symbol;

    fn membership(&mut self, word: &[Self::Symbol]) -> bool {
        self.stats.membership += 1;
        self.oracle.membership(word)
    }

    fn equivalence(&mut self, hypothesis: &Dfa<Self::Symbol>) -> Option<Word<Self::Symbol>> {
        self.stats.equivalence += 1;
        self.oracle.equivalence(hypothesis)
    }
}
