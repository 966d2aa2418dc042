//! Library for learning deterministic finite automata (DFA) from a minimally adequate teacher.
//!
//! The learner implemented here follows Angluin's L* algorithm. It maintains an observation table, which
//! records the answers to membership queries for a prefix-closed set of access strings `S` (together with
//! their one-letter extensions `S·Σ`) combined with a suffix-closed set of experiments `E`. Each word in the
//! table is assigned a row signature, i.e. the sequence of answers it produces for the experiments in `E`.
//! Words with equal row signatures are considered to reach the same state of the target automaton.
//!
//! Once the table is *closed* (every extension matches some access string) and *consistent* (access strings
//! with equal rows still have equal rows after appending a symbol), a hypothesis [`automaton::Dfa`] is built
//! from it. The hypothesis is first checked against a [`sample::Sample`] of known positive and negative
//! examples and then handed to the equivalence query of the teacher. Counterexamples are folded back into
//! the table and the cycle starts anew.
//!
//! The most important items are
//! - [`active::Oracle`], the contract a teacher has to satisfy,
//! - [`active::LStar`], the learner itself, and
//! - [`automaton::Dfa`], the result of a successful learning session.
//!
//! ```
//! use automata_lstar::prelude::*;
//!
//! let alphabet = alphabet!('a', 'b');
//! let target = Dfa::builder()
//!     .with_state_colors([true, false])
//!     .with_transitions([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
//!     .into_dfa(0)
//!     .unwrap();
//! let sample = Sample::new_finite([(vec!['a', 'a'], true), (vec!['a'], false)]);
//!
//! let learned = LStar::new(alphabet, sample, DfaOracle::new(target))
//!     .unwrap()
//!     .infer()
//!     .unwrap();
//! assert_eq!(learned.size(), 2);
//! assert!(learned.accepts(['b', 'a', 'a']));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_lstar::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        active::{
            BoundedOracle, CounterexampleHandling, Counting, DfaOracle, Inconsistency, LStar,
            LStarConfig, LearningError, ObservationTable, Oracle, Phase, QueryStats, Row,
            SampleOracle, SignatureIndex, SortedScan, TableStrategy,
        },
        alphabet,
        alphabet::{Alphabet, CharAlphabet, Symbol},
        automaton::{Dfa, DfaBuilder, DfaError, StateId},
        math,
        sample::Sample,
        word::{self, Word},
        Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with alphabets.
#[macro_use]
pub mod alphabet;

/// Module that contains definitions for dealing with finite words.
pub mod word;

/// Defines deterministic finite automata, their construction and some operations on them.
pub mod automaton;

/// Definitions for dealing with samples, which are pairs of collections of
/// positive and negative example words.
pub mod sample;

/// Deals with active learning, i.e. the L* algorithm and the teachers it talks to.
pub mod active;

/// Helper trait which can be used to display symbols, words and states.
pub trait Show {
    /// Returns a human readable representation of `self`. For a symbol this should simply be the
    /// symbol itself, for a word it should be the symbols separated by [`word::SEPARATOR`].
    /// This is mainly used for logging and error messages.
    fn show(&self) -> String;
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for str {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        if self.is_empty() {
            return word::EPSILON.to_string();
        }
        itertools::Itertools::join(&mut self.iter().map(|sym| sym.show()), &word::SEPARATOR.to_string())
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
