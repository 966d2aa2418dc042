use itertools::Itertools;

use crate::{
    math::{Partition, Set},
    prelude::*,
};

/// Witnesses that an observation table is not consistent: `left` and `right` are access strings with the
/// same row, but appending `symbol` to both leads to different outputs on `suffix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inconsistency<S: Symbol> {
    /// The lesser of the two access strings.
    pub left: Word<S>,
    /// The greater of the two access strings.
    pub right: Word<S>,
    /// The symbol after which the rows diverge.
    pub symbol: S,
    /// The experiment on which the extended rows differ.
    pub suffix: Word<S>,
}

impl<S: Symbol> Inconsistency<S> {
    /// The experiment that resolves the inconsistency, i.e. `symbol · suffix`.
    pub fn experiment(&self) -> Word<S> {
        word::prepend(&self.symbol, &self.suffix)
    }
}

/// Decides how closedness and consistency violations are searched for in an [`ObservationTable`]. Both
/// methods must be deterministic: the same table always produces the same violation.
pub trait TableStrategy {
    /// Returns the first extension `s·a` whose row matches the row of no access string, or `None` if the table
    /// is closed. Adding the returned word to the access strings fixes this violation.
    fn find_unclosed<S: Symbol>(&self, table: &ObservationTable<S>) -> Option<Word<S>>;

    /// Returns the first pair of access strings with equal rows whose extensions by some symbol differ, or
    /// `None` if the table is consistent. Adding [`Inconsistency::experiment`] to the experiments fixes it.
    fn find_inconsistency<S: Symbol>(&self, table: &ObservationTable<S>)
        -> Option<Inconsistency<S>>;

    /// Returns `true` if the table is closed.
    fn is_closed<S: Symbol>(&self, table: &ObservationTable<S>) -> bool {
        self.find_unclosed(table).is_none()
    }

    /// Returns `true` if the table is consistent.
    fn is_consistent<S: Symbol>(&self, table: &ObservationTable<S>) -> bool {
        self.find_inconsistency(table).is_none()
    }
}

/// Scans access strings in canonical order, comparing every pair `left < right`. Symbols and experiments
/// are visited in canonical order as well and the first violation that is found is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortedScan;

/// Groups the access strings by their rows using a hash index and only compares each member of a group with
/// the least member of that group, which suffices as row equality is transitive. Groups are visited in the
/// order of their least member, so the violations found are the ones [`SortedScan`] finds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignatureIndex;

impl TableStrategy for SortedScan {
    fn find_unclosed<S: Symbol>(&self, table: &ObservationTable<S>) -> Option<Word<S>> {
        let base = table.base_rows();
        table.access_strings().iter().find_map(|s| {
            table.alphabet().universe().find_map(|a| {
                let extension = word::extend(s, a);
                (!base.contains(&table.row_signature(&extension))).then_some(extension)
            })
        })
    }

    fn find_inconsistency<S: Symbol>(
        &self,
        table: &ObservationTable<S>,
    ) -> Option<Inconsistency<S>> {
        let base = table.access_strings().iter().collect_vec();
        for (i, left) in base.iter().enumerate() {
            let row = table.row_signature(left);
            for right in &base[i + 1..] {
                if row != table.row_signature(right) {
                    continue;
                }
                if let Some(inconsistency) = first_divergence(table, left, right) {
                    return Some(inconsistency);
                }
            }
        }
        None
    }
}

impl TableStrategy for SignatureIndex {
    fn find_unclosed<S: Symbol>(&self, table: &ObservationTable<S>) -> Option<Word<S>> {
        let index: Set<Row> = table
            .access_strings()
            .iter()
            .map(|s| table.row_signature(s))
            .collect();
        table.access_strings().iter().find_map(|s| {
            table.alphabet().universe().find_map(|a| {
                let extension = word::extend(s, a);
                (!index.contains(&table.row_signature(&extension))).then_some(extension)
            })
        })
    }

    fn find_inconsistency<S: Symbol>(
        &self,
        table: &ObservationTable<S>,
    ) -> Option<Inconsistency<S>> {
        let groups = Partition::by_key(table.access_strings().iter(), |s| table.row_signature(s));
        groups.iter().find_map(|group| {
            let mut members = group.iter();
            let least = members.next()?;
            members.find_map(|other| first_divergence(table, least, other))
        })
    }
}

/// Finds the first symbol and experiment (both in canonical order) on which the extensions of `left` and
/// `right` differ.
fn first_divergence<S: Symbol>(
    table: &ObservationTable<S>,
    left: &[S],
    right: &[S],
) -> Option<Inconsistency<S>> {
    table.alphabet().universe().find_map(|a| {
        let left_row = table.row_signature(&word::extend(left, a));
        let right_row = table.row_signature(&word::extend(right, a));
        table
            .experiments()
            .iter()
            .zip(left_row.iter().zip(right_row.iter()))
            .find(|(_, (l, r))| l != r)
            .map(|(suffix, _)| Inconsistency {
                left: left.to_vec(),
                right: right.to_vec(),
                symbol: a.clone(),
                suffix: suffix.clone(),
            })
    })
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    // accepts exactly the words that end in `a b`
    fn ends_in_ab(w: &[char]) -> bool {
        w.ends_with(&['a', 'b'])
    }

    #[test_log::test]
    fn unclosed_extension_is_found() {
        let mut table = ObservationTable::new(alphabet!('a', 'b'));
        table.update(|w| w == ['a']);
        // ε and b are rejected, a is accepted
        assert_eq!(SortedScan.find_unclosed(&table), Some(vec!['a']));
        assert_eq!(SignatureIndex.find_unclosed(&table), Some(vec!['a']));

        table.add_access_string(vec!['a']);
        table.update(|w| w == ['a']);
        assert!(SortedScan.is_closed(&table));
        assert!(SignatureIndex.is_closed(&table));
    }

    #[test_log::test]
    fn inconsistency_is_found() {
        let mut table = ObservationTable::new(alphabet!('a', 'b'));
        // ε and a share the row `-`, but a·b is accepted whereas b is not
        table.add_access_string(vec!['a']);
        table.update(ends_in_ab);

        let expected = Inconsistency {
            left: vec![],
            right: vec!['a'],
            symbol: 'b',
            suffix: vec![],
        };
        assert_eq!(SortedScan.find_inconsistency(&table), Some(expected.clone()));
        assert_eq!(SignatureIndex.find_inconsistency(&table), Some(expected.clone()));
        assert_eq!(expected.experiment(), vec!['b']);

        table.add_experiment(expected.experiment());
        table.update(ends_in_ab);
        assert!(SortedScan.is_consistent(&table));
        assert!(SignatureIndex.is_consistent(&table));
    }

    #[test]
    fn index_compares_with_least_member() {
        let mut table = ObservationTable::new(alphabet!('a', 'b'));
        for s in [vec!['b'], vec!['b', 'b'], vec!['a']] {
            table.add_access_string(s);
        }
        table.update(ends_in_ab);
        // all four access strings share a row, only a diverges after reading b
        let found = SignatureIndex.find_inconsistency(&table).unwrap();
        assert_eq!(found.left, Vec::<char>::new());
        assert_eq!(found.right, vec!['a']);
        assert_eq!(found.symbol, 'b');
    }
}
