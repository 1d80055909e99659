// This is actually defined at `crate::recognizer::tests_for_recognizer`

use crate::grammar::{Grammar, Lexicon};
use crate::recognizer::*;
use crate::tests::*;

use expect_test::expect;

fn load(grammar: &str, lexicon: &str) -> (Grammar, Lexicon) {
    (Grammar::from_text(grammar).unwrap(), Lexicon::from_text(lexicon).unwrap())
}

#[test]
fn simple_grammar() {
    let (g, l) = load("
        S -> NP VP
        NP -> N | Adj N
        VP -> V NP
    ", "
        N -> Peter | coffee
        V -> likes
        Adj -> hot
    ");
    let recognizer = EarleyRecognizer::new(&g, &l);
    assert!(recognizer.recognize(&tokens("Peter likes hot coffee")));
    assert!(recognizer.recognize(&tokens("coffee likes Peter")));
    assert!(!recognizer.recognize(&tokens("Peter likes hot")));
    assert!(!recognizer.recognize(&tokens("Peter likes tea")));
}

#[test]
fn left_recursion() {
    let (g, l) = load("S -> S A | A", "A -> a");
    let recognizer = EarleyRecognizer::new(&g, &l);
    assert!(recognizer.recognize(&tokens("a a a a")));
    assert!(!recognizer.recognize(&tokens("a a b")));
}

#[test]
fn espresso_grammar() {
    let (g, l) = load("
        S -> Adv S | NP VP
        NP -> Det N | PropN
        VP -> V NP
    ", "
        Adv -> Yesterday
        PropN -> Chris
        V -> drank
        Det -> an | the
        N -> espresso
    ");
    let recognizer = EarleyRecognizer::new(&g, &l);
    assert!(recognizer.recognize(&tokens("Yesterday Chris drank an espresso")));
    assert!(recognizer.recognize(&tokens("Yesterday Yesterday the espresso drank Chris")));
    assert!(!recognizer.recognize(&tokens("Chris drank")));
}

#[test]
fn epsilon_rules_without_a_lexicon() {
    let g = grammar(&["S -> A T", "S -> a T", "A -> a", "A -> B A", "B -> ", "T -> b b b"]);
    let l = Lexicon::new();
    let recognizer = EarleyRecognizer::new(&g, &l);
    assert!(recognizer.recognize(&tokens("a b b b")));
    assert!(!recognizer.recognize(&tokens("a b b")));

    // a nullable non-terminal predicted after its ε-completion
    let g = grammar(&["S -> A A x", "A -> "]);
    let recognizer = EarleyRecognizer::new(&g, &l);
    assert!(recognizer.recognize(&tokens("x")));
}

#[test]
fn nullable_start_accepts_empty_input() {
    let g = grammar(&["S -> ", "S -> a"]);
    let l = Lexicon::new();
    let empty: [&str; 0] = [];
    assert!(EarleyRecognizer::new(&g, &l).recognize(&empty));
}

#[test]
fn chart_display() {
    let (g, l) = load("S -> Det N", "Det -> the\nN -> dog");
    let chart = EarleyRecognizer::new(&g, &l).chart(&tokens("the dog"));
    assert!(chart.accepted());
    assert_eq!(chart.len(), 3);
    expect![[r#"
        State set 0:
            ⟨START⟩ -> . S [0, 0]
            S -> . Det N [0, 0]
        State set 1:
            S -> Det . N [0, 1]
        State set 2:
            S -> Det N . [0, 2]
            ⟨START⟩ -> S . [0, 2]
    "#]].assert_eq(&chart.to_string());
}

#[test]
fn rejected_chart_stops_growing() {
    let (g, l) = load("S -> Det N", "Det -> the\nN -> dog");
    let chart = EarleyRecognizer::new(&g, &l).chart(&tokens("dog the"));
    assert!(!chart.accepted());
    assert!(chart.sets()[1].is_empty());
    assert!(chart.sets()[2].is_empty());
}
