use std::{ops::ControlFlow, time::Instant};

use tracing::{info, trace};

use crate::prelude::*;

use super::{Counterexample, Verifier};

/// The phases the learner cycles through. Fixing the table is repeated until it is closed and consistent,
/// then a hypothesis is built and verified. A counterexample leads back to fixing the table, otherwise
/// the hypothesis is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Resolving a closedness or consistency violation.
    FixingTable,
    /// Building a hypothesis from the closed and consistent table.
    Hypothesizing,
    /// Checking the hypothesis against the examples and the teacher.
    Verifying,
    /// The hypothesis has been accepted.
    Accepted,
}

/// The loop state of a session. A hypothesis only exists while it is being verified.
enum Step<S: Symbol> {
    FixingTable,
    Hypothesizing,
    Verifying(Dfa<S>),
}

impl<S: Symbol> Step<S> {
    fn phase(&self) -> Phase {
        match self {
            Step::FixingTable => Phase::FixingTable,
            Step::Hypothesizing => Phase::Hypothesizing,
            Step::Verifying(_) => Phase::Verifying,
        }
    }
}

type Observer<S> = Box<dyn FnMut(Phase, &ObservationTable<S>)>;

/// An implementation of Angluin's L* algorithm for learning a [`Dfa`] from a minimally adequate teacher
/// given as an [`Oracle`]. The strategy `C` decides how closedness and consistency violations are found,
/// see [`TableStrategy`].
pub struct LStar<O: Oracle, C: TableStrategy = SortedScan> {
    table: ObservationTable<O::Symbol>,
    sample: Sample<O::Symbol>,
    oracle: Counting<O>,
    strategy: C,
    config: LStarConfig,
    observer: Option<Observer<O::Symbol>>,
}

impl<O: Oracle> LStar<O> {
    /// Prepares a learning session over `alphabet`. The `sample` is used to check hypotheses before the
    /// teacher is asked an equivalence query. No query is posed before [`LStar::infer`] is called.
    ///
    /// Fails if the alphabet is empty, if the sample contains no words at all, if some example uses a
    /// symbol outside of `alphabet` or if some word is both a positive and a negative example.
    pub fn new(
        alphabet: Alphabet<O::Symbol>,
        sample: Sample<O::Symbol>,
        oracle: O,
    ) -> Result<Self, LearningError> {
        if alphabet.is_empty() {
            return Err(LearningError::EmptyAlphabet);
        }
        if sample.is_empty() {
            return Err(LearningError::NoExamples);
        }
        if let Some((word, _)) = sample
            .annotated()
            .find(|(w, _)| w.iter().any(|sym| !alphabet.contains(sym)))
        {
            return Err(LearningError::ForeignSymbol(word.show()));
        }
        if let Some(word) = sample.ambiguous() {
            return Err(LearningError::AmbiguousExample(word.show()));
        }

        Ok(Self {
            table: ObservationTable::new(alphabet),
            sample,
            oracle: Counting::new(oracle),
            strategy: SortedScan,
            config: LStarConfig::default(),
            observer: None,
        })
    }
}

impl<O: Oracle, C: TableStrategy> LStar<O, C> {
    /// Replaces the strategy used for finding closedness and consistency violations.
    pub fn with_strategy<D: TableStrategy>(self, strategy: D) -> LStar<O, D> {
        LStar {
            table: self.table,
            sample: self.sample,
            oracle: self.oracle,
            strategy,
            config: self.config,
            observer: self.observer,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: LStarConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a function that is called after every phase with the phase that was just completed and
    /// the current observation table.
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(Phase, &ObservationTable<O::Symbol>) + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Returns the configuration of the session.
    pub fn config(&self) -> &LStarConfig {
        &self.config
    }

    /// Runs the learner until a hypothesis is accepted, see [`LStar::infer_with_stats`].
    pub fn infer(self) -> Result<Dfa<O::Symbol>, LearningError> {
        self.infer_with_stats().map(|(dfa, _)| dfa)
    }

    /// Runs the learner until a hypothesis passes verification and returns it together with the number of
    /// queries that were posed. Every phase counts as one iteration, exceeding
    /// [`LStarConfig::max_iterations`] aborts the session with [`LearningError::DidNotConverge`]. On failure
    /// the partial observation table is discarded.
    pub fn infer_with_stats(self) -> Result<(Dfa<O::Symbol>, QueryStats), LearningError> {
        let start = Instant::now();
        let Self {
            mut table,
            sample,
            mut oracle,
            strategy,
            config,
            mut observer,
        } = self;
        let verifier = Verifier::new(&sample);

        let queries = table.update(|w| oracle.membership(w));
        trace!("initial table filled with {queries} queries\n{:?}", table);

        let mut step = Step::FixingTable;
        let mut iteration = 0;

        let learned = loop {
            iteration += 1;
            if iteration > config.max_iterations {
                info!("giving up after {} iterations", config.max_iterations);
                return Err(LearningError::DidNotConverge(config.max_iterations));
            }

            let completed = step.phase();
            let next = match step {
                Step::FixingTable => {
                    if let Some(extension) = strategy.find_unclosed(&table) {
                        info!("table is not closed, promoting {}", extension.show());
                        table.add_access_string(extension);
                        table.update(|w| oracle.membership(w));
                        ControlFlow::Continue(Step::FixingTable)
                    } else if let Some(inconsistency) = strategy.find_inconsistency(&table) {
                        let experiment = inconsistency.experiment();
                        info!(
                            "table is not consistent on {} and {}, adding experiment {}",
                            inconsistency.left.show(),
                            inconsistency.right.show(),
                            experiment.show()
                        );
                        table.add_experiment(experiment);
                        table.update(|w| oracle.membership(w));
                        ControlFlow::Continue(Step::FixingTable)
                    } else {
                        ControlFlow::Continue(Step::Hypothesizing)
                    }
                }
                Step::Hypothesizing => {
                    let Some(built) = table.hypothesis() else {
                        let extension = strategy.find_unclosed(&table).unwrap_or_default();
                        return Err(LearningError::UnclosedTable(extension.show()));
                    };
                    info!("hypothesis has {} states", built.size());
                    ControlFlow::Continue(Step::Verifying(built))
                }
                Step::Verifying(current) => match verifier.verify(&current, &mut oracle)? {
                    Some(counterexample) => {
                        fold(&mut table, &counterexample, config.counterexamples);
                        table.update(|w| oracle.membership(w));
                        ControlFlow::Continue(Step::FixingTable)
                    }
                    None => ControlFlow::Break(current),
                },
            };
            trace!("completed {completed:?} in iteration {iteration}\n{:?}", table);
            if let Some(observer) = observer.as_mut() {
                observer(completed, &table);
            }
            match next {
                ControlFlow::Continue(following) => step = following,
                ControlFlow::Break(accepted) => break accepted,
            }
        };

        if let Some(observer) = observer.as_mut() {
            observer(Phase::Accepted, &table);
        }
        let stats = oracle.stats();
        info!(
            "learned automaton with {} states using {} in {}ms",
            learned.size(),
            stats.show(),
            start.elapsed().as_millis()
        );
        Ok((learned, stats))
    }
}

/// Incorporates `counterexample` into the table. The table is stale afterwards.
fn fold<S: Symbol>(
    table: &mut ObservationTable<S>,
    counterexample: &Counterexample<S>,
    handling: CounterexampleHandling,
) {
    let word = &counterexample.word;
    if handling == CounterexampleHandling::PrefixesAndSuffixes {
        for prefix in word::prefixes(word) {
            table.add_access_string(prefix.to_vec());
        }
    }
    for suffix in word::suffixes(word) {
        table.add_experiment(suffix.to_vec());
    }
    trace!(
        "folded counterexample {}, table has {} access strings and {} experiments",
        word.show(),
        table.access_strings().len(),
        table.experiments().len()
    );
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use itertools::Itertools;

    use crate::prelude::*;

    fn even_a() -> Dfa {
        Dfa::builder()
            .with_state_colors([true, false])
            .with_transitions([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
            .into_dfa(0)
            .unwrap()
    }

    // accepts exactly the words without three consecutive `a`s
    fn no_three_a(w: &[char]) -> bool {
        !w.windows(3).any(|window| window == ['a', 'a', 'a'])
    }

    fn sample() -> Sample<char> {
        Sample::new_finite([(vec!['a', 'a'], true), (vec!['a'], false)])
    }

    #[test_log::test]
    fn learns_even_number_of_a() {
        let learned = LStar::new(alphabet!('a', 'b'), sample(), DfaOracle::new(even_a()))
            .unwrap()
            .infer()
            .unwrap();
        assert_eq!(learned.size(), 2);
        assert!(learned.equivalent(&even_a()));
        for (w, expected) in [("", true), ("a a", true), ("a a a a", true), ("a", false), ("a a a", false)] {
            let word: Vec<char> = word::tokens(w).iter().flat_map(|s| s.chars()).collect();
            assert_eq!(learned.accepts(&word), expected, "{w}");
        }
    }

    #[test]
    fn learns_with_bounded_oracle() {
        let alphabet = alphabet!('a', 'b');
        let oracle = BoundedOracle::new(alphabet.clone(), 6, no_three_a);
        let sample = Sample::new_finite([(vec!['a', 'a'], true), (vec!['a', 'a', 'a'], false)]);
        let learned = LStar::new(alphabet, sample, oracle)
            .unwrap()
            .infer()
            .unwrap();
        assert_eq!(learned.size(), 4);
        assert!(learned.accepts(['a', 'a', 'b', 'a', 'a']));
        assert!(!learned.accepts(['b', 'a', 'a', 'a', 'b']));
    }

    #[test]
    fn invalid_sessions_pose_no_queries() {
        let mut oracle = Counting::new(DfaOracle::new(even_a()));
        assert_eq!(
            LStar::new(Alphabet::new([]), sample(), &mut oracle).err(),
            Some(LearningError::EmptyAlphabet)
        );
        assert_eq!(
            LStar::new(alphabet!('a', 'b'), Sample::default(), &mut oracle).err(),
            Some(LearningError::NoExamples)
        );
        let ambiguous = Sample::new([vec!['a']], [vec!['a']]);
        assert_eq!(
            LStar::new(alphabet!('a', 'b'), ambiguous, &mut oracle).err(),
            Some(LearningError::AmbiguousExample("a".into()))
        );
        // every DFA over {a, b} rejects `c`, so a positive `c` could never be satisfied
        let foreign = Sample::new_finite([(vec!['a', 'a'], true), (vec!['c'], true)]);
        assert_eq!(
            LStar::new(alphabet!('a', 'b'), foreign, &mut oracle).err(),
            Some(LearningError::ForeignSymbol("c".into()))
        );
        let foreign_negative = Sample::new([vec!['a', 'a']], [vec!['b', 'c']]);
        assert_eq!(
            LStar::new(alphabet!('a', 'b'), foreign_negative, &mut oracle).err(),
            Some(LearningError::ForeignSymbol("b c".into()))
        );
        assert_eq!(oracle.stats(), QueryStats::default());
    }

    #[test]
    fn iteration_bound_is_enforced() {
        let result = LStar::new(alphabet!('a', 'b'), sample(), DfaOracle::new(even_a()))
            .unwrap()
            .with_config(LStarConfig::default().with_max_iterations(1))
            .infer();
        assert_eq!(result, Err(LearningError::DidNotConverge(1)));
    }

    #[test]
    fn observer_sees_every_phase() {
        let phases = Rc::new(RefCell::new(vec![]));
        let recorded = Rc::clone(&phases);
        let (learned, stats) = LStar::new(alphabet!('a', 'b'), sample(), DfaOracle::new(even_a()))
            .unwrap()
            .with_observer(move |phase, table| {
                assert!(table.is_populated());
                recorded.borrow_mut().push(phase);
            })
            .infer_with_stats()
            .unwrap();
        assert_eq!(learned.size(), 2);

        let phases = phases.borrow();
        assert_eq!(phases.first(), Some(&Phase::FixingTable));
        assert_eq!(phases.last(), Some(&Phase::Accepted));
        let verifications = phases.iter().filter(|&&p| p == Phase::Verifying).count();
        assert!(verifications >= 1);
        // a hypothesis is verified right after it was built and accepted right after verification
        for (before, after) in phases.iter().tuple_windows() {
            if *after == Phase::Verifying {
                assert_eq!(*before, Phase::Hypothesizing);
            }
            if *after == Phase::Accepted {
                assert_eq!(*before, Phase::Verifying);
            }
        }
        assert!(stats.equivalence <= verifications);
        assert!(stats.membership > 0);
    }

    #[test]
    fn suffix_handling_learns_the_same_language() {
        let alphabet = alphabet!('a', 'b');
        let oracle = BoundedOracle::new(alphabet.clone(), 6, no_three_a);
        let learned = LStar::new(alphabet, Sample::new_finite([(vec![], true)]), oracle)
            .unwrap()
            .with_config(
                LStarConfig::default()
                    .with_counterexample_handling(CounterexampleHandling::Suffixes),
            )
            .with_strategy(SignatureIndex)
            .infer()
            .unwrap();
        assert_eq!(learned.size(), 4);
        assert!(!learned.accepts(['a', 'a', 'a']));
        assert!(learned.accepts(['a', 'a', 'b', 'a', 'a']));
    }
}
