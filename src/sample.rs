use std::collections::BTreeSet;

use itertools::{Either, Itertools};

use crate::prelude::*;

/// A sample is a pair of finite sets of words, the positive examples which should be accepted and the negative
/// examples which should be rejected. The learner uses a sample to catch wrong hypotheses before asking the
/// (potentially expensive) equivalence query of the teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample<S: Symbol> {
    positive: BTreeSet<Word<S>>,
    negative: BTreeSet<Word<S>>,
}

impl<S: Symbol> Default for Sample<S> {
    fn default() -> Self {
        Self {
            positive: BTreeSet::new(),
            negative: BTreeSet::new(),
        }
    }
}

impl<S: Symbol> Sample<S> {
    /// Creates a sample from separate collections of positive and negative words.
    pub fn new<I, J, W, V>(positive: I, negative: J) -> Self
    where
        I: IntoIterator<Item = W>,
        J: IntoIterator<Item = V>,
        W: IntoIterator<Item = S>,
        V: IntoIterator<Item = S>,
    {
        Self {
            positive: positive.into_iter().map(|w| w.into_iter().collect()).collect(),
            negative: negative.into_iter().map(|w| w.into_iter().collect()).collect(),
        }
    }

    /// Create a new sample from an iterator over annotated words, i.e. pairs of a word (given as an iterator
    /// over its symbols) and its classification.
    pub fn new_finite<I: IntoIterator<Item = S>, J: IntoIterator<Item = (I, bool)>>(
        words: J,
    ) -> Self {
        let (positive, negative) = words.into_iter().partition_map(|(w, c)| {
            if c {
                Either::Left(w.into_iter().collect())
            } else {
                Either::Right(w.into_iter().collect())
            }
        });
        Self { positive, negative }
    }

    /// Adds `word` with the given classification.
    pub fn insert(&mut self, word: Word<S>, classification: bool) -> bool {
        if classification {
            self.positive.insert(word)
        } else {
            self.negative.insert(word)
        }
    }

    /// Iterates over the positive examples in canonical order.
    pub fn positive(&self) -> impl Iterator<Item = &Word<S>> + '_ {
        self.positive.iter()
    }

    /// Iterates over the negative examples in canonical order.
    pub fn negative(&self) -> impl Iterator<Item = &Word<S>> + '_ {
        self.negative.iter()
    }

    /// Iterates over all words of the sample together with their classification, positive examples first.
    pub fn annotated(&self) -> impl Iterator<Item = (&Word<S>, bool)> + '_ {
        self.positive
            .iter()
            .map(|w| (w, true))
            .chain(self.negative.iter().map(|w| (w, false)))
    }

    /// Returns the classification of `word`, or `None` if it is not part of the sample.
    pub fn classify(&self, word: &[S]) -> Option<bool> {
        if self.positive.contains(word) {
            Some(true)
        } else if self.negative.contains(word) {
            Some(false)
        } else {
            None
        }
    }

    /// Returns the total number of words in the sample.
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// Returns `true` if the sample contains neither positive nor negative examples.
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Returns the first word (in canonical order) that is classified as both positive and negative.
    pub fn ambiguous(&self) -> Option<&Word<S>> {
        self.positive.intersection(&self.negative).next()
    }

    /// Returns the maximum length of any word in the sample. Gives back `0` if the sample is empty.
    pub fn max_word_len(&self) -> usize {
        self.annotated().map(|(w, _)| w.len()).max().unwrap_or(0)
    }

    /// Draws a random sample by performing `per_length` random walks of every length from `1` to `max_len`
    /// over `alphabet`, classifying each word with `membership`. Duplicates are dropped, so the sample may
    /// contain fewer words than requested. The same `seed` always produces the same sample.
    #[cfg(feature = "random")]
    pub fn random<F>(
        alphabet: &Alphabet<S>,
        max_len: usize,
        per_length: usize,
        seed: u64,
        mut membership: F,
    ) -> Self
    where
        F: FnMut(&[S]) -> bool,
    {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut sample = Self::default();
        if alphabet.is_empty() {
            return sample;
        }
        for len in 1..=max_len {
            for _ in 0..per_length {
                let word: Word<S> = (0..len)
                    .map(|_| alphabet[rng.usize(..alphabet.size())].clone())
                    .collect();
                if sample.classify(&word).is_none() {
                    let classification = membership(word.as_slice());
                    sample.insert(word, classification);
                }
            }
        }
        sample
    }
}
