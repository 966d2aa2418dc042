use std::{cell::RefCell, collections::BTreeSet, rc::Rc};

use itertools::Itertools;
use tracing::trace;

use crate::{math::Map, prelude::*};

/// The row signature of a word, i.e. the outputs of concatenating it with every experiment, ordered by the
/// canonical order of the experiments. As the empty experiment is the least word, the first entry always
/// tells whether the word itself is accepted.
///
/// Rows are cheap to clone and are shared between the signature cache and its callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Row(Rc<[bool]>);

impl Row {
    /// Returns the output for the empty experiment, which determines whether the state represented
    /// by this row is accepting.
    pub fn accepting(&self) -> bool {
        self.0.first().copied().unwrap_or(false)
    }

    /// Returns `true` if `self` and `other` refer to the very same allocation.
    pub fn ptr_eq(&self, other: &Row) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for Row {
    type Target = [bool];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<bool> for Row {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Show for Row {
    fn show(&self) -> String {
        self.0.iter().map(|b| b.show()).join("")
    }
}

/// An observation table for learning a DFA. It consists of
/// - a prefix-closed set `S` of access strings, each of which represents a state,
/// - a suffix-closed set `E` of experiments used to distinguish states, and
/// - the outputs `T`, mapping every word of `S ∪ S·Σ` and every experiment `e` of `E` to the answer of the
///   membership query for their concatenation.
///
/// The table owns a cache of row signatures, which is cleared whenever `S`, `E` or `T` change. After growing
/// `S` or `E` the table is *stale* and [`ObservationTable::update`] has to be called before rows may be read
/// again.
pub struct ObservationTable<S: Symbol> {
    alphabet: Alphabet<S>,
    base: BTreeSet<Word<S>>,
    experiments: BTreeSet<Word<S>>,
    outputs: Map<Word<S>, Map<Word<S>, bool>>,
    populated: bool,
    signatures: RefCell<Map<Word<S>, Row>>,
}

impl<S: Symbol> ObservationTable<S> {
    /// Creates a table over `alphabet` where both `S` and `E` contain only the empty word. No queries are
    /// posed, the table starts out stale.
    pub fn new(alphabet: Alphabet<S>) -> Self {
        Self {
            alphabet,
            base: BTreeSet::from([vec![]]),
            experiments: BTreeSet::from([vec![]]),
            outputs: Map::default(),
            populated: false,
            signatures: RefCell::new(Map::default()),
        }
    }

    /// The alphabet of the table.
    pub fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    /// The access strings `S` in canonical order.
    pub fn access_strings(&self) -> &BTreeSet<Word<S>> {
        &self.base
    }

    /// The experiments `E` in canonical order.
    pub fn experiments(&self) -> &BTreeSet<Word<S>> {
        &self.experiments
    }

    /// Returns `true` if `T` has been filled for the current `S` and `E`.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Returns `true` if `word` is an access string.
    pub fn is_access_string(&self, word: &[S]) -> bool {
        self.base.contains(word)
    }

    /// All words that label a row of the table, that is `S ∪ S·Σ`, in canonical order.
    pub fn rows(&self) -> BTreeSet<Word<S>> {
        self.base
            .iter()
            .flat_map(|s| {
                std::iter::once(s.clone())
                    .chain(self.alphabet.universe().map(move |a| word::extend(s, a)))
            })
            .collect()
    }

    /// The one-letter extensions of access strings which are not access strings themselves, i.e.
    /// `S·Σ \ S`, in canonical order.
    pub fn extensions(&self) -> BTreeSet<Word<S>> {
        self.rows()
            .into_iter()
            .filter(|w| !self.base.contains(w))
            .collect()
    }

    /// Adds `word` to the access strings. Returns `false` if it was present already, otherwise the table
    /// becomes stale.
    pub fn add_access_string(&mut self, word: Word<S>) -> bool {
        let added = self.base.insert(word);
        if added {
            self.invalidate();
        }
        added
    }

    /// Adds `experiment` to `E`. Returns `false` if it was present already, otherwise the table becomes stale.
    pub fn add_experiment(&mut self, experiment: Word<S>) -> bool {
        let added = self.experiments.insert(experiment);
        if added {
            self.invalidate();
        }
        added
    }

    fn invalidate(&mut self) {
        self.populated = false;
        self.signatures.get_mut().clear();
    }

    /// Discards `T` and fills it anew by posing a membership query for every word in `S ∪ S·Σ` combined
    /// with every experiment in `E`. Every query is issued exactly once per call, nothing is carried over
    /// from previous calls. Returns the number of queries that were posed.
    pub fn update<F>(&mut self, mut membership: F) -> usize
    where
        F: FnMut(&[S]) -> bool,
    {
        self.signatures.get_mut().clear();
        self.outputs.clear();

        let mut queries = 0;
        for row in self.rows() {
            let mut entries = Map::default();
            for experiment in &self.experiments {
                let query = word::concat(&row, experiment);
                let output = membership(&query);
                trace!("membership query for {} gives {}", query.show(), output);
                entries.insert(experiment.clone(), output);
                queries += 1;
            }
            self.outputs.insert(row, entries);
        }

        self.populated = true;
        queries
    }

    /// Returns the recorded output for `word` concatenated with `experiment`, or `None` if the table holds
    /// no such entry.
    pub fn output(&self, word: &[S], experiment: &[S]) -> Option<bool> {
        self.outputs.get(word)?.get(experiment).copied()
    }

    /// Returns the row signature of `word`, computing and caching it if necessary. Gives back `None` if
    /// `word` does not label a row of the table.
    ///
    /// # Panics
    /// Panics if the table is stale, i.e. `S` or `E` grew since the last [`ObservationTable::update`].
    pub fn try_row_signature(&self, word: &[S]) -> Option<Row> {
        assert!(
            self.populated,
            "observation table must be updated before reading the row of {}",
            word.show()
        );
        if let Some(row) = self.signatures.borrow().get(word) {
            return Some(row.clone());
        }

        let entries = self.outputs.get(word)?;
        let row: Row = self
            .experiments
            .iter()
            .map(|e| entries.get(e).copied())
            .collect::<Option<Rc<[bool]>>>()
            .map(Row)?;
        self.signatures
            .borrow_mut()
            .insert(word.to_vec(), row.clone());
        Some(row)
    }

    /// Returns the row signature of `word`, see [`ObservationTable::try_row_signature`].
    ///
    /// # Panics
    /// Panics if the table is stale or `word` is not in `S ∪ S·Σ`.
    pub fn row_signature(&self, word: &[S]) -> Row {
        self.try_row_signature(word)
            .unwrap_or_else(|| panic!("no row for {} in observation table", word.show()))
    }

    /// Returns the rows of all access strings, without duplicates.
    pub fn base_rows(&self) -> BTreeSet<Row> {
        self.base.iter().map(|s| self.row_signature(s)).collect()
    }
}

impl<S: Symbol> std::fmt::Debug for ObservationTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = tabled::builder::Builder::default();
        let mut header = vec!["S".to_string()];
        header.extend(self.experiments.iter().map(|e| e.show()));
        builder.push_record(header);

        let extensions = self.extensions();
        let rows = self
            .base
            .iter()
            .map(|s| (s.show(), s))
            .chain(extensions.iter().map(|w| (format!("· {}", w.show()), w)));
        for (label, word) in rows {
            let mut record = vec![label];
            for e in &self.experiments {
                record.push(match self.output(word, e) {
                    Some(output) => output.show(),
                    None => "?".to_string(),
                });
            }
            builder.push_record(record);
        }

        write!(f, "{}", builder.build())
    }
}
