//! Classic Earley recognition (Jurafsky & Martin, 2009): a yes/no answer and
//! the chart of dotted states, no forest.
//!
//! Terminals are lexicon categories; a token is scanned by a category whose
//! word list contains it. A symbol that is neither a category nor defined by
//! the grammar is scanned by token equality.

use std::collections::HashSet;
use std::fmt;

use crate::earley::Item;
use crate::grammar::{Grammar, Lexicon, Symbol};
use crate::trace::{detail, step, Verbosity};
use crate::Recognizer;

/// A dotted rule spanning `[start, end)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct State<'g> {
    item: Item<'g>,
    start: usize,
    end: usize,
}

impl<'g> State<'g> {
    pub fn item(&self) -> Item<'g> { self.item }
    pub fn start(&self) -> usize { self.start }
    pub fn end(&self) -> usize { self.end }

    fn advanced(&self, end: usize) -> State<'g> {
        State { item: Item::new(self.item.rule(), self.item.dot() + 1), start: self.start, end }
    }
}

/// `S -> NP . VP [0, 1]`
impl fmt::Display for State<'_> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        write!(w, "{} [{}, {}]", self.item, self.start, self.end)
    }
}

/// The state sets of one recognition, indexed by end position.
#[derive(Clone, Debug)]
pub struct RecognizerChart<'g> {
    sets: Vec<Vec<State<'g>>>,
    accepted: bool,
}

impl<'g> RecognizerChart<'g> {
    pub fn accepted(&self) -> bool { self.accepted }
    pub fn sets(&self) -> &[Vec<State<'g>>] { &self.sets }
    pub fn len(&self) -> usize { self.sets.len() }
    pub fn is_empty(&self) -> bool { self.sets.is_empty() }
}

impl fmt::Display for RecognizerChart<'_> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        for (i, set) in self.sets.iter().enumerate() {
            writeln!(w, "State set {}:", i)?;
            for state in set {
                writeln!(w, "    {}", state)?;
            }
        }
        Ok(())
    }
}

pub struct EarleyRecognizer<'g> {
    grammar: &'g Grammar,
    lexicon: &'g Lexicon,
    nullable: HashSet<&'g Symbol>,
    verbosity: Verbosity,
}

impl<'g> EarleyRecognizer<'g> {
    pub fn new(grammar: &'g Grammar, lexicon: &'g Lexicon) -> Self {
        EarleyRecognizer {
            grammar,
            lexicon,
            nullable: grammar.nullable_symbols(),
            verbosity: Verbosity::default(),
        }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn recognize<T: AsRef<str>>(&self, tokens: &[T]) -> bool {
        self.chart(tokens).accepted
    }

    /// Runs the recognizer and returns the whole chart.
    pub fn chart<T: AsRef<str>>(&self, tokens: &[T]) -> RecognizerChart<'g> {
        let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();
        let mut run = Run {
            recognizer: self,
            tokens: &tokens,
            sets: vec![vec![]; tokens.len() + 1],
            seen: HashSet::new(),
        };
        run.enqueue(State { item: Item::new(self.grammar.start_rule(), 0), start: 0, end: 0 });

        for i in 0..run.sets.len() {
            let mut cursor = 0;
            while let Some(&state) = run.sets[i].get(cursor) {
                match state.item.next_symbol() {
                    None => run.complete(state),
                    Some(next) if self.lexicon.is_category(next) => run.scan(state, next),
                    Some(next) if self.grammar.is_nonterm(next) => run.predict(state, next),
                    Some(next) => run.scan(state, next),
                }
                cursor += 1;
            }
        }

        let start = self.grammar.start();
        let accepted = run.sets[tokens.len()].iter()
            .any(|s| s.start == 0 && s.item.is_complete() && s.item.lhs() == start);
        step!(self.verbosity, "{} {:?}", if accepted { "accepted" } else { "rejected" }, tokens);
        RecognizerChart { sets: run.sets, accepted }
    }
}

impl Recognizer for EarleyRecognizer<'_> {
    fn accepts(&self, tokens: &[&str]) -> bool {
        self.recognize(tokens)
    }
}

struct Run<'r, 'g, 't> {
    recognizer: &'r EarleyRecognizer<'g>,
    tokens: &'t [&'t str],
    sets: Vec<Vec<State<'g>>>,
    seen: HashSet<State<'g>>,
}

impl<'r, 'g, 't> Run<'r, 'g, 't> {
    fn enqueue(&mut self, state: State<'g>) {
        if self.seen.insert(state) {
            detail!(self.recognizer.verbosity, "    enqueue({})", state);
            self.sets[state.end].push(state);
        }
    }

    /// Nullable non-terminals are also stepped over at once, since their
    /// completion at this position may come before `state` is enqueued.
    fn predict(&mut self, state: State<'g>, next: &'g Symbol) {
        step!(self.recognizer.verbosity, "predict({})", state);
        for rule in self.recognizer.grammar.rules_for(next) {
            self.enqueue(State { item: Item::new(rule, 0), start: state.end, end: state.end });
        }
        if self.recognizer.nullable.contains(next) {
            self.enqueue(state.advanced(state.end));
        }
    }

    fn scan(&mut self, state: State<'g>, next: &Symbol) {
        step!(self.recognizer.verbosity, "scan({})", state);
        let token = match self.tokens.get(state.end) {
            Some(&token) => token,
            None => return,
        };
        let lexicon = self.recognizer.lexicon;
        let matches = if lexicon.is_category(next) {
            lexicon.covers(next, token)
        } else {
            *next == *token
        };
        if matches {
            self.enqueue(state.advanced(state.end + 1));
        }
    }

    fn complete(&mut self, state: State<'g>) {
        step!(self.recognizer.verbosity, "complete({})", state);
        let lhs = state.item.lhs();
        let waiting: Vec<State<'g>> = self.sets[state.start].iter()
            .filter(|entry| entry.item.next_symbol() == Some(lhs))
            .copied()
            .collect();
        for entry in waiting {
            self.enqueue(entry.advanced(state.end));
        }
    }
}

#[cfg(test)]
#[path = "tests/recognizer.rs"]
mod tests_for_recognizer;
