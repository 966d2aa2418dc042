use crate::alphabet::{Alphabet, Symbol};

/// A finite word is simply a sequence of symbols. Words are compared lexicographically by their symbols,
/// which is the canonical order used for access strings and experiments.
pub type Word<S> = Vec<S>;

/// The separator that is placed between two consecutive symbols in the textual form of a word.
pub const SEPARATOR: char = ' ';

/// How the empty word is displayed.
pub const EPSILON: &str = "ε";

/// Splits the textual form of a word into its symbols. Consecutive whitespace is treated as a single
/// separator, so the empty string and a string of blanks both denote the empty word.
///
/// ```
/// use automata_lstar::word::tokens;
/// assert_eq!(tokens("HELLO  AUTH"), vec!["HELLO", "AUTH"]);
/// assert!(tokens("").is_empty());
/// ```
pub fn tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Concatenates `left` and `right`. The empty word is the identity.
pub fn concat<S: Clone>(left: &[S], right: &[S]) -> Word<S> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    out.extend_from_slice(left);
    out.extend_from_slice(right);
    out
}

/// Appends a single symbol to `word`.
pub fn extend<S: Clone>(word: &[S], symbol: &S) -> Word<S> {
    let mut out = Vec::with_capacity(word.len() + 1);
    out.extend_from_slice(word);
    out.push(symbol.clone());
    out
}

/// Prepends a single symbol to `word`.
pub fn prepend<S: Clone>(symbol: &S, word: &[S]) -> Word<S> {
    let mut out = Vec::with_capacity(word.len() + 1);
    out.push(symbol.clone());
    out.extend_from_slice(word);
    out
}

/// Iterates over all prefixes of `word`, starting with the empty word and ending with `word` itself.
pub fn prefixes<S>(word: &[S]) -> impl Iterator<Item = &[S]> + '_ {
    (0..=word.len()).map(move |i| &word[..i])
}

/// Iterates over all non-empty suffixes of `word`, starting with `word` itself.
pub fn suffixes<S>(word: &[S]) -> impl Iterator<Item = &[S]> + '_ {
    (0..word.len()).map(move |i| &word[i..])
}

/// Iterator over all words up to a given length in length-lexicographic order, i.e. shorter words come
/// first and words of equal length are ordered by the canonical symbol order of the alphabet.
#[derive(Debug, Clone)]
pub struct WordsUpTo<'a, S: Symbol> {
    alphabet: &'a Alphabet<S>,
    max_len: usize,
    // positions of the symbols making up the next word, `None` once exhausted
    current: Option<Vec<usize>>,
}

impl<'a, S: Symbol> WordsUpTo<'a, S> {
    /// Creates the iterator over all words of length at most `max_len` over `alphabet`.
    pub fn new(alphabet: &'a Alphabet<S>, max_len: usize) -> Self {
        Self {
            alphabet,
            max_len,
            current: Some(vec![]),
        }
    }

    fn advance(&mut self) {
        let Some(positions) = self.current.as_mut() else {
            return;
        };
        let size = self.alphabet.size();
        if size == 0 {
            self.current = None;
            return;
        }
        for pos in positions.iter_mut().rev() {
            if *pos + 1 < size {
                *pos += 1;
                return;
            }
            *pos = 0;
        }
        // every position wrapped around, move on to the next length
        if positions.len() < self.max_len {
            positions.push(0);
        } else {
            self.current = None;
        }
    }
}

impl<'a, S: Symbol> Iterator for WordsUpTo<'a, S> {
    type Item = Word<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let word = self
            .current
            .as_ref()?
            .iter()
            .map(|&i| self.alphabet[i].clone())
            .collect();
        self.advance();
        Some(word)
    }
}
