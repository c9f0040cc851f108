//! Property-based tests for the recognizer
//!
//! Random inputs are checked against closed-form membership oracles, and the
//! chart invariants are asserted after every run.

use marlo::{Chart, DottedRule, Grammar, GrammarBuilder, Recognizer, Symbol};
use proptest::prelude::*;

/// S -> a S | a
fn one_or_more_a() -> Grammar<&'static str> {
    GrammarBuilder::new()
        .rule("S", ["a", "S"])
        .rule("S", ["a"])
        .build()
        .unwrap()
}

/// S -> ( S ) S | ε
fn balanced_parens() -> Grammar<&'static str> {
    GrammarBuilder::new()
        .rule("S", ["(", "S", ")", "S"])
        .rule("S", [])
        .build()
        .unwrap()
}

fn is_balanced(input: &[&str]) -> bool {
    let mut depth = 0i64;
    for symbol in input {
        match *symbol {
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => return false,
        }
    }
    depth == 0
}

/// The structural invariants every finished chart must satisfy
fn assert_chart_invariants<S: Symbol, D: DottedRule>(chart: &Chart<S, D>, input_len: usize) {
    let earlemes = chart.earleme_count();
    assert!(earlemes >= 1 && earlemes <= input_len + 1);

    for earleme in 0..earlemes {
        let items = chart.earley_items(earleme);
        for (i, item) in items.iter().enumerate() {
            assert!(item.start <= earleme, "item starts in an unopened earleme");
            for other in &items[..i] {
                assert_ne!(item, other, "duplicate Earley item within an earleme");
            }
        }

        let leos = chart.leo_items(earleme);
        for (i, leo) in leos.iter().enumerate() {
            assert!(leo.parse.start <= earleme);
            for other in &leos[..i] {
                assert_ne!(
                    leo.transition, other.transition,
                    "duplicate Leo transition within an earleme"
                );
            }
        }
    }
}

fn ab_input() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::collection::vec(prop_oneof![Just("a"), Just("b")], 0..32)
}

fn paren_input() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::collection::vec(prop_oneof![Just("("), Just(")")], 0..24)
}

proptest! {
    #[test]
    fn one_or_more_a_matches_its_oracle(input in ab_input()) {
        let grammar = one_or_more_a();
        let mut recognizer = Recognizer::new(&grammar);

        let accepted = recognizer.recognize(&input, "S");
        let expected = !input.is_empty() && input.iter().all(|symbol| *symbol == "a");
        prop_assert_eq!(accepted, expected);

        assert_chart_invariants(recognizer.chart(), input.len());
        if accepted {
            prop_assert_eq!(recognizer.chart().earleme_count(), input.len() + 1);
        }
    }

    #[test]
    fn balanced_parens_matches_its_oracle(input in paren_input()) {
        let grammar = balanced_parens();
        let mut recognizer = Recognizer::new(&grammar);

        let accepted = recognizer.recognize(&input, "S");
        prop_assert_eq!(accepted, is_balanced(&input));

        assert_chart_invariants(recognizer.chart(), input.len());
        if accepted {
            prop_assert_eq!(recognizer.chart().earleme_count(), input.len() + 1);
        }
    }

    #[test]
    fn recognition_is_deterministic(input in paren_input()) {
        let grammar = balanced_parens();

        let mut first = Recognizer::new(&grammar);
        let mut second = Recognizer::new(&grammar);
        prop_assert_eq!(
            first.recognize(&input, "S"),
            second.recognize(&input, "S")
        );
        prop_assert_eq!(first.dump_chart(), second.dump_chart());

        // re-running on the same recognizer rebuilds the identical chart
        let before = first.dump_chart();
        first.recognize(&input, "S");
        prop_assert_eq!(first.dump_chart(), before);
    }

    #[test]
    fn reordering_alternatives_preserves_the_verdict(input in ab_input()) {
        let forward = one_or_more_a();
        let reversed = GrammarBuilder::new()
            .rule("S", ["a"])
            .rule("S", ["a", "S"])
            .build()
            .unwrap();

        prop_assert_eq!(
            Recognizer::new(&forward).recognize(&input, "S"),
            Recognizer::new(&reversed).recognize(&input, "S")
        );
    }

    #[test]
    fn right_recursive_item_growth_is_linear(n in 1usize..200) {
        let grammar = one_or_more_a();
        let mut recognizer = Recognizer::new(&grammar);
        let input = vec!["a"; n];

        prop_assert!(recognizer.recognize(&input, "S"));
        prop_assert!(recognizer.chart().earley_item_count() <= 8 * (n + 1));
        prop_assert!(recognizer.chart().leo_item_count() <= n + 1);
    }
}
