// This is actually defined at `crate::earley::tests_for_earley`

use crate::earley::*;
use crate::forest::Label;
use crate::tests::*;
use crate::trace::Verbosity;

use expect_test::expect;

fn first_example() -> crate::Grammar {
    grammar(&["S -> S T", "S -> a", "T -> a B", "T -> a", "B -> "])
}

fn hidden_left_recursion_and_cycle() -> crate::Grammar {
    grammar(&["S -> A T", "S -> a T", "A -> a", "A -> B A", "B -> ", "T -> b b b"])
}

fn sizes(forest: &ParseForest) -> Vec<usize> {
    sorted_derivations(forest).iter().map(|d| d.len()).collect()
}

#[test]
fn items() {
    let r = rule("T -> b b b");
    let item = Item::new(&r, 2);
    assert_eq!(item.next_symbol().map(|s| s.as_str()), Some("b"));
    assert!(!item.is_complete());
    assert_eq!(item.to_string(), "T -> b b . b");
    let done = Item::new(&r, 3);
    assert!(done.is_complete());
    assert_eq!(done.next_symbol(), None);
    assert_eq!(done.to_string(), "T -> b b b .");

    let e = rule("B ->");
    assert!(Item::new(&e, 0).is_complete());
    assert_eq!(Item::new(&e, 0).to_string(), "B -> .");
}

#[test]
#[should_panic]
fn dot_past_the_end() {
    let r = rule("T -> b");
    Item::new(&r, 2);
}

#[test]
fn first_example_is_ambiguous_twice() {
    let g = first_example();
    let toks = tokens("a a");
    let forest = EarleyParser::new(&g).parse(&toks).unwrap();
    let root = forest.root_node();
    assert_eq!(root.label(), &Label::Symbol("S".into()));
    assert_eq!((root.start(), root.end()), (0, 2));
    assert!(!root.is_ambiguous());

    let t12 = forest.forest().find(Label::Symbol("T".into()), 1, 2).unwrap();
    assert!(forest.forest().node(t12).is_ambiguous());
    assert_eq!(sizes(&forest), [4, 6]);
}

#[test]
fn simple_recursion() {
    let g = grammar(&["S -> S S", "S -> b"]);
    let forest = EarleyParser::new(&g).parse(&tokens("b b b")).unwrap();
    assert_eq!(forest.root_node().families().len(), 2);
    assert_eq!(sizes(&forest), [7, 7]);
}

#[test]
fn hidden_left_recursion_terminates() {
    let g = hidden_left_recursion_and_cycle();
    let toks = tokens("a b b b");
    let forest = EarleyParser::new(&g).parse(&toks).unwrap();
    assert_eq!(sizes(&forest), [6, 7, 10]);

    // `A -> B A` over [0,1] derives A from itself.
    let a01 = forest.forest().find(Label::Symbol("A".into()), 0, 1).unwrap();
    let families = forest.forest().node(a01).families();
    assert_eq!(families.len(), 2);
    assert!(families.iter().any(|f| f.right == a01));
}

#[test]
fn intermediate_nodes_are_labelled_by_item() {
    let g = hidden_left_recursion_and_cycle();
    let forest = EarleyParser::new(&g).parse(&tokens("a b b b")).unwrap();
    let mut partial: Vec<String> = forest.forest().nodes()
        .filter(|(_, n)| matches!(n.label(), Label::Item(_)))
        .map(|(_, n)| format!("{} [{},{}]", n.label(), n.start(), n.end()))
        .collect();
    partial.sort();
    expect![[r#"
        [
            "T -> b b . b [1,3]",
        ]
    "#]].assert_debug_eq(&partial);
}

#[test]
fn nullable_start_of_rule() {
    let g = grammar(&["S -> A A", "A -> ", "A -> a"]);
    let forest = EarleyParser::new(&g).parse(&tokens("a")).unwrap();
    assert_eq!(forest.root_node().families().len(), 2);
    assert_eq!(sizes(&forest), [4, 4]);
}

#[test]
fn terminal_leaves_are_shared() {
    let g = grammar(&["S -> S S", "S -> b"]);
    let forest = EarleyParser::new(&g).parse(&tokens("b b b")).unwrap();
    let leaves: Vec<_> = forest.forest().nodes()
        .filter(|(_, n)| n.label() == &Label::Symbol("b".into()))
        .map(|(_, n)| (n.start(), n.end()))
        .collect();
    assert_eq!(leaves.len(), 3);
}

#[test]
fn rejection() {
    let g = first_example();
    let parser = EarleyParser::new(&g);
    assert!(parser.parse(&tokens("b")).is_none());
    assert!(parser.parse(&tokens("a b")).is_none());
    assert!(parser.parse(&tokens("a a")).is_some());
}

#[test]
fn empty_input_is_no_parse() {
    let g = grammar(&["S -> ", "S -> a"]);
    let empty: [&str; 0] = [];
    assert!(EarleyParser::new(&g).parse(&empty).is_none());
    assert!(EarleyParser::new(&first_example()).parse(&empty).is_none());
}

#[test]
fn other_start_symbol() {
    let g = grammar(&["E -> E + E", "E -> n"]).with_start("E");
    let forest = EarleyParser::new(&g).parse(&tokens("n + n + n")).unwrap();
    assert_eq!(forest.root_node().label(), &Label::Symbol("E".into()));
    assert_eq!(sizes(&forest).len(), 2);
    assert!(EarleyParser::new(&grammar(&["E -> n"])).parse(&["n"]).is_none());
}

#[test]
fn verbosity_does_not_change_the_forest() {
    let g = hidden_left_recursion_and_cycle();
    let toks = tokens("a b b b");
    let quiet = EarleyParser::new(&g).parse(&toks).unwrap();
    let loud = EarleyParser::new(&g).with_verbosity(Verbosity::Items).parse(&toks).unwrap();
    assert_eq!(quiet.forest().len(), loud.forest().len());
    assert_eq!(sorted_derivations(&quiet), sorted_derivations(&loud));
}
