use thiserror::Error;

/// Everything that can make a learning session fail. Words are given in their textual form, see
/// [`crate::Show`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LearningError {
    /// The alphabet of the session contains no symbols.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,
    /// Neither positive nor negative examples were given.
    #[error("at least one positive or negative example is required")]
    NoExamples,
    /// A word appears among the positive as well as the negative examples.
    #[error("example `{0}` is classified as positive and negative")]
    AmbiguousExample(String),
    /// An example contains a symbol that is not part of the alphabet.
    #[error("example `{0}` contains a symbol outside of the alphabet")]
    ForeignSymbol(String),
    /// The equivalence oracle returned a word on which the teacher and the hypothesis agree.
    #[error("invalid counterexample `{word}`: hypothesis and teacher both classify it as {classification}")]
    InvalidCounterexample {
        /// The offending word.
        word: String,
        /// The classification both sides agree on.
        classification: bool,
    },
    /// An example of the sample is classified differently by the teacher.
    #[error("example `{word}` is labelled {expected}, but the teacher disagrees")]
    ContradictingExample {
        /// The offending example.
        word: String,
        /// The classification given in the sample.
        expected: bool,
    },
    /// The iteration bound was exceeded without producing a verified hypothesis.
    #[error("learning did not converge within {0} iterations")]
    DidNotConverge(usize),
    /// A hypothesis was requested from a table that is not closed.
    #[error("observation table is not closed, `{0}` matches no access string")]
    UnclosedTable(String),
    /// A configuration value could not be parsed.
    #[error("invalid value `{value}` for `{key}`")]
    InvalidConfig {
        /// Name of the configuration key.
        key: String,
        /// The rejected value.
        value: String,
    },
}
