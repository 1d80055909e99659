use derive_more::{Display, From};
use regex::Regex;

use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::loader::LoadError;

// A grammar G is a tuple (Sigma, Delta, S, R), where
//   Sigma is a finite set of terminals (matched by token equality),
//   Delta is a finite set of non-terminals (the left-hand sides of R),
//   S in Delta is the start non-terminal, and
//   R maps non-terminals to ordered lists of right-hand symbol sequences.
//
// Nothing distinguishes a terminal from a non-terminal other than whether it
// has rules: asking for the rules of a terminal yields none.

pub const DEFAULT_START: &str = "S";

/// Left-hand side of the augmented rule `⟨START⟩ -> S` that seeds a parse.
/// The loader lexes angle brackets as symbols of their own, so only a quoted
/// symbol in grammar text could collide with it.
pub(crate) const AUGMENTED_START: &str = "⟨START⟩";

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug, Display, From)]
pub struct Symbol(String);

impl Symbol {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl AsRef<str> for Symbol { fn as_ref(&self) -> &str { &self.0 } }
impl From<&str> for Symbol { fn from(s: &str) -> Self { Symbol(s.to_string()) } }
impl From<&Symbol> for Symbol { fn from(s: &Symbol) -> Self { s.clone() } }

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool { self.0 == other }
}

/// A production `lhs -> rhs`. Rules compare and hash by value, so two rules
/// built separately from the same symbols are the same rule.
#[derive(PartialEq, Eq, Clone, Hash, Debug)]
pub struct Rule {
    pub(crate) lhs: Symbol,
    pub(crate) rhs: Vec<Symbol>,
}

impl Rule {
    pub fn new<S: Into<Symbol>>(lhs: impl Into<Symbol>, rhs: impl IntoIterator<Item=S>) -> Rule {
        Rule { lhs: lhs.into(), rhs: rhs.into_iter().map(Into::into).collect() }
    }

    /// `lhs -> ε`
    pub fn epsilon(lhs: impl Into<Symbol>) -> Rule {
        Rule { lhs: lhs.into(), rhs: vec![] }
    }

    pub fn lhs(&self) -> &Symbol { &self.lhs }
    pub fn rhs(&self) -> &[Symbol] { &self.rhs }
    pub fn is_epsilon(&self) -> bool { self.rhs.is_empty() }
}

fn rule_line() -> &'static Regex {
    static RULE_LINE: OnceLock<Regex> = OnceLock::new();
    RULE_LINE.get_or_init(|| Regex::new(r"^\s*(\S+)\s*->(.*)$").unwrap())
}

/// Parses the single-line form `lhs -> x y z`, splitting the right-hand side
/// on whitespace. An empty right-hand side is an ε-production. For whole
/// files (alternatives, comments, quoting) see [`crate::loader`].
impl FromStr for Rule {
    type Err = LoadError;
    fn from_str(s: &str) -> Result<Rule, LoadError> {
        let captures = rule_line().captures(s)
            .ok_or_else(|| LoadError::RuleLine(s.to_string()))?;
        let lhs = &captures[1];
        let rhs = captures[2].split_whitespace();
        Ok(Rule::new(lhs, rhs))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grammar {
    start: Symbol,
    start_rule: Rule,
    rules: HashMap<Symbol, Vec<Rule>>,
    // left-hand sides in order of first definition
    order: Vec<Symbol>,
}

impl Grammar {
    pub fn new(start: impl Into<Symbol>) -> Self {
        let start = start.into();
        let start_rule = Rule::new(AUGMENTED_START, [start.clone()]);
        Grammar { start, start_rule, rules: HashMap::new(), order: vec![] }
    }

    pub fn empty() -> Self { Grammar::new(DEFAULT_START) }

    pub fn with_rules(start: impl Into<Symbol>, rules: impl IntoIterator<Item=Rule>) -> Self {
        let mut g = Grammar::new(start);
        g.extend(rules);
        g
    }

    pub fn with_start(mut self, start: impl Into<Symbol>) -> Self {
        self.start = start.into();
        self.start_rule = Rule::new(AUGMENTED_START, [self.start.clone()]);
        self
    }

    /// Adds `rule` unless an equal rule is already present; returns whether
    /// the grammar changed.
    pub fn add_rule(&mut self, rule: Rule) -> bool {
        if !self.rules.contains_key(&rule.lhs) {
            self.order.push(rule.lhs.clone());
        }
        let rules = self.rules.entry(rule.lhs.clone()).or_default();
        if rules.contains(&rule) {
            return false;
        }
        rules.push(rule);
        true
    }

    pub fn start(&self) -> &Symbol { &self.start }

    pub(crate) fn start_rule(&self) -> &Rule { &self.start_rule }

    /// The rules for `nonterm`, in definition order. Empty for terminals and
    /// for symbols the grammar never defines.
    pub fn rules_for(&self, nonterm: &Symbol) -> &[Rule] {
        self.rules.get(nonterm).map(|v| &v[..]).unwrap_or(&[])
    }

    pub fn rules(&self) -> impl Iterator<Item=&Rule> {
        self.order.iter().flat_map(move |lhs| self.rules[lhs].iter())
    }

    pub fn is_nonterm(&self, s: &Symbol) -> bool { self.rules.contains_key(s) }

    pub fn nonterms(&self) -> HashSet<&Symbol> {
        self.order.iter().collect()
    }

    /// Right-hand symbols that no rule defines.
    pub fn terms(&self) -> HashSet<&Symbol> {
        self.rules()
            .flat_map(|r| r.rhs.iter())
            .filter(|s| !self.is_nonterm(s))
            .collect()
    }

    /// Non-terminals that derive the empty string.
    pub fn nullable_symbols(&self) -> HashSet<&Symbol> {
        let mut nullable: HashSet<&Symbol> = HashSet::new();
        loop {
            let mut changed = false;
            for rule in self.rules() {
                if nullable.contains(&rule.lhs) { continue; }
                if rule.rhs.iter().all(|s| nullable.contains(s)) {
                    nullable.insert(&rule.lhs);
                    changed = true;
                }
            }
            if !changed { return nullable; }
        }
    }
}

impl Extend<Rule> for Grammar {
    fn extend<I: IntoIterator<Item=Rule>>(&mut self, rules: I) {
        for rule in rules {
            self.add_rule(rule);
        }
    }
}

/// Part-of-speech lexicon: maps a category (e.g. `Det`) to the words it
/// covers. Used by the boolean recognizer; the SPPF engine matches terminals
/// by token equality instead.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Lexicon {
    entries: HashMap<Symbol, HashSet<String>>,
}

impl Lexicon {
    pub fn new() -> Self { Lexicon::default() }

    pub fn insert(&mut self, category: impl Into<Symbol>, word: impl Into<String>) {
        self.entries.entry(category.into()).or_default().insert(word.into());
    }

    pub fn is_category(&self, s: &Symbol) -> bool { self.entries.contains_key(s) }

    pub fn covers(&self, category: &Symbol, word: &str) -> bool {
        self.entries.get(category).map_or(false, |words| words.contains(word))
    }

    pub fn categories(&self) -> impl Iterator<Item=&Symbol> { self.entries.keys() }
}

#[cfg(test)]
#[path = "tests/grammar.rs"]
mod tests_for_grammar;
