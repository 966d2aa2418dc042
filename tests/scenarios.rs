use automata_lstar::{prelude::*, word::WordsUpTo};

fn even_a(w: &[char]) -> bool {
    w.iter().filter(|&&c| c == 'a').count() % 2 == 0
}

fn ends_in_ab(w: &[char]) -> bool {
    w.ends_with(&['a', 'b'])
}

fn no_three_a(w: &[char]) -> bool {
    !w.windows(3).any(|window| window == ['a', 'a', 'a'])
}

fn chars(text: &str) -> Vec<char> {
    word::tokens(text).iter().flat_map(|s| s.chars()).collect()
}

/// A teacher that drives a stateful protocol session. Every membership query resets the session and
/// replays the word, equivalence queries test all words up to a fixed length.
#[derive(Default)]
struct ProtocolTeacher {
    state: Option<&'static str>,
    sessions: usize,
}

impl ProtocolTeacher {
    const DEPTH: usize = 6;

    fn alphabet() -> Alphabet<&'static str> {
        alphabet!("HELLO", "AUTH", "DATA", "CLOSE")
    }

    fn step(&mut self, message: &str) {
        self.state = match (self.state, message) {
            (Some("INIT"), "HELLO") => Some("READY"),
            (Some("READY"), "AUTH") => Some("AUTHENTICATED"),
            (Some("AUTHENTICATED"), "DATA") => Some("AUTHENTICATED"),
            (Some("AUTHENTICATED"), "CLOSE") => Some("INIT"),
            _ => None,
        };
    }
}

impl Oracle for ProtocolTeacher {
    type Symbol = &'static str;

    fn membership(&mut self, word: &[&'static str]) -> bool {
        self.state = Some("INIT");
        self.sessions += 1;
        for message in word {
            self.step(message);
        }
        self.state.is_some()
    }

    fn equivalence(&mut self, hypothesis: &Dfa<&'static str>) -> Option<Word<&'static str>> {
        let alphabet = Self::alphabet();
        WordsUpTo::new(&alphabet, Self::DEPTH)
            .find(|w| self.membership(w) != hypothesis.accepts(w))
    }
}

#[test_log::test]
fn even_number_of_a() {
    let alphabet = alphabet!('a', 'b');
    let sample = Sample::new_finite([(chars("a a"), true), (chars("a"), false)]);
    let learned = LStar::new(alphabet.clone(), sample, BoundedOracle::new(alphabet, 6, even_a))
        .unwrap()
        .infer()
        .unwrap();

    assert_eq!(learned.size(), 2);
    for accepted in ["", "a a", "a a a a", "b a b a"] {
        assert!(learned.accepts(chars(accepted)), "{accepted} should be accepted");
    }
    for rejected in ["a", "a a a", "b a b"] {
        assert!(!learned.accepts(chars(rejected)), "{rejected} should be rejected");
    }
}

#[test_log::test]
fn stateful_protocol() {
    let sample = Sample::new(
        [word::tokens("HELLO AUTH"), word::tokens("HELLO AUTH DATA CLOSE")],
        [word::tokens("AUTH"), word::tokens("HELLO HELLO")],
    );
    let mut teacher = ProtocolTeacher::default();
    let (learned, stats) = LStar::new(ProtocolTeacher::alphabet(), sample.clone(), &mut teacher)
        .unwrap()
        .infer_with_stats()
        .unwrap();

    assert_eq!(learned.size(), 4);
    assert!(learned.accepts(word::tokens("")));
    assert!(learned.accepts(word::tokens("HELLO AUTH")));
    assert!(!learned.accepts(word::tokens("AUTH")));
    assert!(learned.accepts(word::tokens("HELLO AUTH CLOSE HELLO AUTH")));
    assert!(!learned.accepts(word::tokens("HELLO DATA")));

    for (w, classification) in sample.annotated() {
        assert_eq!(learned.accepts(w), classification);
    }
    // every membership query of the learner and the equivalence check opened one session
    assert!(teacher.sessions >= stats.membership);
    assert_eq!(learned.give_word(), Some(vec![]));
}

#[test]
fn malformed_teacher_is_fatal() {
    struct Malformed;
    impl Oracle for Malformed {
        type Symbol = char;
        fn membership(&mut self, word: &[char]) -> bool {
            even_a(word)
        }
        fn equivalence(&mut self, _hypothesis: &Dfa) -> Option<Word<char>> {
            Some(vec![])
        }
    }

    let sample = Sample::new_finite([(chars("a a"), true)]);
    let result = LStar::new(alphabet!('a', 'b'), sample, Malformed)
        .unwrap()
        .infer();
    assert_eq!(
        result,
        Err(LearningError::InvalidCounterexample {
            word: "ε".into(),
            classification: true
        })
    );
}

#[test]
fn contradicting_example_is_fatal() {
    let alphabet = alphabet!('a', 'b');
    let sample = Sample::new_finite([(chars("a"), true)]);
    let result = LStar::new(alphabet.clone(), sample, BoundedOracle::new(alphabet, 4, even_a))
        .unwrap()
        .infer();
    assert_eq!(
        result,
        Err(LearningError::ContradictingExample {
            word: "a".into(),
            expected: true
        })
    );
}

#[test]
fn strategies_agree() {
    let targets: [(fn(&[char]) -> bool, usize); 3] =
        [(even_a, 2), (ends_in_ab, 3), (no_three_a, 4)];
    let alphabet = alphabet!('a', 'b');

    for (target, size) in targets {
        let sample = Sample::new_finite([(vec![], target(&[]))]);
        for handling in [
            CounterexampleHandling::PrefixesAndSuffixes,
            CounterexampleHandling::Suffixes,
        ] {
            let config = LStarConfig::default().with_counterexample_handling(handling);
            let scanned = LStar::new(
                alphabet.clone(),
                sample.clone(),
                BoundedOracle::new(alphabet.clone(), 6, target),
            )
            .unwrap()
            .with_config(config.clone())
            .infer()
            .unwrap();
            let indexed = LStar::new(
                alphabet.clone(),
                sample.clone(),
                BoundedOracle::new(alphabet.clone(), 6, target),
            )
            .unwrap()
            .with_config(config)
            .with_strategy(SignatureIndex)
            .infer()
            .unwrap();

            assert_eq!(scanned.size(), size);
            assert_eq!(indexed.size(), size);
            assert!(scanned.equivalent(&indexed));
            for w in WordsUpTo::new(&alphabet, 6) {
                assert_eq!(scanned.accepts(&w), target(&w));
            }
        }
    }
}

#[test]
fn strategies_report_the_same_violation() {
    let alphabet = alphabet!('a', 'b');
    let mut table = ObservationTable::new(alphabet.clone());
    for s in [vec!['b'], vec!['a'], vec!['a', 'a']] {
        table.add_access_string(s);
    }
    table.update(no_three_a);
    // all access strings share a row, ε and a agree after either symbol but ε and a a do not
    let expected = Inconsistency {
        left: vec![],
        right: vec!['a', 'a'],
        symbol: 'a',
        suffix: vec![],
    };
    assert_eq!(SortedScan.find_inconsistency(&table), Some(expected.clone()));
    assert_eq!(SignatureIndex.find_inconsistency(&table), Some(expected));

    let targets: [fn(&[char]) -> bool; 3] = [even_a, ends_in_ab, no_three_a];
    let bases = [
        vec![],
        vec!["a"],
        vec!["b", "b b", "a"],
        vec!["a", "a a", "b", "a b", "b a"],
        vec!["a a", "a a b", "b", "b a a"],
    ];
    let experiments = [vec![], vec!["a"], vec!["b"], vec!["a", "b a"]];
    for target in targets {
        for base in &bases {
            for suffixes in &experiments {
                let mut table = ObservationTable::new(alphabet.clone());
                for s in base {
                    table.add_access_string(chars(s));
                }
                for e in suffixes {
                    table.add_experiment(chars(e));
                }
                table.update(target);
                assert_eq!(
                    SortedScan.find_unclosed(&table),
                    SignatureIndex.find_unclosed(&table)
                );
                assert_eq!(
                    SortedScan.find_inconsistency(&table),
                    SignatureIndex.find_inconsistency(&table)
                );
            }
        }
    }
}

#[test_log::test]
fn hypotheses_come_from_closed_and_consistent_tables() {
    let alphabet = alphabet!('a', 'b');
    let sample = Sample::new_finite([(chars("b a b"), true), (chars("a a a"), false)]);
    LStar::new(alphabet.clone(), sample, BoundedOracle::new(alphabet, 6, no_three_a))
        .unwrap()
        .with_observer(|phase, table| {
            if phase != Phase::Hypothesizing && phase != Phase::Accepted {
                return;
            }
            assert!(SortedScan.is_closed(table));
            assert!(SortedScan.is_consistent(table));
            assert!(SignatureIndex.is_closed(table));
            assert!(SignatureIndex.is_consistent(table));

            let hypothesis = table.hypothesis().unwrap();
            assert_eq!(hypothesis.initial(), 0);
            for w in table.rows() {
                for e in table.experiments() {
                    let output = table.output(&w, e).unwrap();
                    assert_eq!(hypothesis.accepts(word::concat(&w, e)), output);
                }
            }
        })
        .infer()
        .unwrap();
}

#[cfg(feature = "random")]
#[test]
fn learns_from_random_sample() {
    let alphabet = alphabet!('a', 'b');
    let sample = Sample::random(&alphabet, 5, 4, 42, ends_in_ab);
    let learned = LStar::new(
        alphabet.clone(),
        sample.clone(),
        SampleOracle::new(sample.clone(), false),
    )
    .unwrap()
    .infer()
    .unwrap();
    for (w, classification) in sample.annotated() {
        assert_eq!(learned.accepts(w), classification);
    }
}
