// This is actually defined at `crate::loader::tests_for_loader`

use crate::loader::*;
use crate::grammar::{Grammar, Lexicon, Rule};
use crate::tests::*;

use expect_test::expect;

#[test]
fn rules_in_written_order() {
    let rules = parse_rules("S -> NP VP\nNP -> Det N | N\nB ->\n").unwrap();
    let rules: Vec<String> = rules.iter().map(|r| r.to_string()).collect();
    expect![[r#"
        [
            "S -> NP VP",
            "NP -> Det N",
            "NP -> N",
            "B -> ",
        ]
    "#]].assert_debug_eq(&rules);
}

#[test]
fn empty_alternatives() {
    let rules = parse_rules("A -> | a").unwrap();
    assert_eq!(rules, [Rule::epsilon("A"), rule("A -> a")]);
}

#[test]
fn text_agrees_with_rule_lines() {
    let loaded = Grammar::from_text("
        # hidden left recursion
        S -> A T | a T
        A -> a | B A
        B ->
        T -> b b b
    ").unwrap();
    let built = grammar(&["S -> A T", "S -> a T", "A -> a", "A -> B A", "B -> ", "T -> b b b"]);
    assert_eq!(loaded, built);
}

#[test]
fn duplicate_rules_load_once() {
    let g: Grammar = "S -> a | a\nS -> a".parse().unwrap();
    assert_eq!(g.rules().count(), 1);
}

#[test]
fn syntax_errors() {
    let err = parse_rules("S -> a\n-> b\n").unwrap_err();
    match &err {
        LoadError::Syntax { location, found, .. } => {
            assert_eq!(*location, 7);
            assert_eq!(found, "`->`");
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
    assert!(err.to_string().starts_with("unexpected `->` at byte 7"), "{}", err);

    let err = parse_rules("S a b\n").unwrap_err();
    assert!(matches!(err, LoadError::Syntax { location: 2, .. }), "{:?}", err);

    let err = parse_rules("S -> 'a\n").unwrap_err();
    assert!(matches!(err, LoadError::Lex(_)), "{:?}", err);
}

#[test]
fn grammar_from_path() {
    let file = temp_file::with_contents(b"S -> S S | b\n");
    let g = Grammar::from_path(file.path()).unwrap();
    assert_eq!(g, grammar(&["S -> S S", "S -> b"]));
}

#[test]
fn missing_file_names_its_path() {
    let dir = temp_dir::TempDir::new().unwrap();
    let path = dir.child("grammar.txt");
    let err = Grammar::from_path(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
    assert!(err.to_string().contains("grammar.txt"), "{}", err);
}

#[test]
fn lexicon_from_path() {
    let dir = temp_dir::TempDir::new().unwrap();
    let path = dir.child("lexicon.txt");
    fs_err::write(&path, "Det -> the | a\nN -> dog\nN -> cat\n").unwrap();
    let lexicon = Lexicon::from_path(&path).unwrap();
    assert!(lexicon.covers(&"Det".into(), "the"));
    assert!(lexicon.covers(&"N".into(), "cat"));
    assert!(!lexicon.covers(&"N".into(), "the"));
}

#[test]
fn lexicon_entries_are_single_words() {
    let err = Lexicon::from_text("Det -> the | a\nN -> big dog\n").unwrap_err();
    expect!["lexicon entry for `N` has 2 words in one alternative; expected exactly one"]
        .assert_eq(&err.to_string());
    assert!(matches!(Lexicon::from_text("N ->"), Err(LoadError::LexiconEntry { len: 0, .. })));
}
