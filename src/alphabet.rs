use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::Show;

/// A symbol is an atomic token of a language, the letters that words are made of. Anything that can be
/// cloned, compared, hashed and displayed can serve as a symbol, so `char`, `&'static str` and `String`
/// all work out of the box.
pub trait Symbol: Clone + Eq + Ord + Hash + Debug + Show {}

impl<T: Clone + Eq + Ord + Hash + Debug + Show> Symbol for T {}

/// Helper macro for creating an [`Alphabet`] from a list of symbols.
///
/// # Example
/// ```
/// use automata_lstar::prelude::*;
///
/// let alphabet = alphabet!('b', 'a', 'b');
/// assert_eq!(alphabet.size(), 2);
/// assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec![&'a', &'b']);
/// ```
#[macro_export]
macro_rules! alphabet {
    ($($sym:expr),* $(,)?) => {
        $crate::alphabet::Alphabet::new([$($sym),*])
    };
}

/// An alphabet is the finite set of [`Symbol`]s a language is defined over. Symbols are stored sorted and
/// without duplicates, the order of [`Alphabet::universe`] is the canonical symbol order which is used
/// whenever the learner has to iterate deterministically over symbols.
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct Alphabet<S: Symbol = char>(Vec<S>);

/// An [`Alphabet`] where a [`Symbol`] is just a single `char`.
pub type CharAlphabet = Alphabet<char>;

impl CharAlphabet {
    /// Creates a new [`CharAlphabet`] alphabet of the given size. The symbols are just the first `size` letters
    /// of the alphabet, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self((0..size).map(|i| (b'a' + i as u8) as char).collect())
    }
}

impl<S: Symbol> FromIterator<S> for Alphabet<S> {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().unique().sorted().collect())
    }
}

impl<S: Symbol> From<Vec<S>> for Alphabet<S> {
    fn from(value: Vec<S>) -> Self {
        Self::from_iter(value)
    }
}

impl<S: Symbol> std::ops::Index<usize> for Alphabet<S> {
    type Output = S;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<S: Symbol> Alphabet<S> {
    /// Creates a new alphabet from the given symbols, removing duplicates.
    pub fn new(symbols: impl IntoIterator<Item = S>) -> Self {
        Self::from_iter(symbols)
    }

    /// Returns the number of symbols in the alphabet.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the alphabet contains no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all symbols in canonical (ascending) order.
    pub fn universe(&self) -> std::slice::Iter<'_, S> {
        self.0.iter()
    }

    /// Returns `true` if `symbol` is part of the alphabet.
    pub fn contains(&self, symbol: &S) -> bool {
        self.position(symbol).is_some()
    }

    /// Gives the position of `symbol` in the canonical order, or `None` if it is not part of the alphabet.
    pub fn position(&self, symbol: &S) -> Option<usize> {
        self.0.binary_search(symbol).ok()
    }
}

impl<S: Symbol> Show for Alphabet<S> {
    fn show(&self) -> String {
        format!("{{{}}}", self.0.iter().map(|sym| sym.show()).join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_is_sorted_and_deduplicated() {
        let alphabet = alphabet!["HELLO", "AUTH", "DATA", "CLOSE", "AUTH"];
        assert_eq!(alphabet.size(), 4);
        assert_eq!(
            alphabet.universe().cloned().collect_vec(),
            vec!["AUTH", "CLOSE", "DATA", "HELLO"]
        );
        assert_eq!(alphabet.position(&"DATA"), Some(2));
        assert!(!alphabet.contains(&"QUIT"));
        assert_eq!(alphabet.show(), "{AUTH, CLOSE, DATA, HELLO}");
    }

    #[test]
    fn char_alphabet_of_size() {
        let alphabet = CharAlphabet::of_size(3);
        assert_eq!(alphabet[2], 'c');
        assert!(!alphabet.is_empty());
        assert!(Alphabet::<char>::new([]).is_empty());
    }
}
