//! Naive top-down parsing as search: a configuration is an input position and
//! the symbols still predicted there; its successors expand the leftmost
//! prediction by every rule, or match it against the next token.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::grammar::{Grammar, Rule, Symbol};
use crate::search::{search_first, Graph, Strategy};
use crate::Recognizer;

/// Configurations are identified by position and predictions alone; the
/// rules applied to reach one are carried along but take no part in
/// equality.
#[derive(Clone, Debug)]
pub struct TopDownConfig<'g> {
    position: usize,
    predictions: Rc<[&'g Symbol]>,
    derivation: Vec<&'g Rule>,
}

impl<'g> TopDownConfig<'g> {
    pub fn position(&self) -> usize { self.position }
    pub fn predictions(&self) -> &[&'g Symbol] { &self.predictions }
    pub fn prediction(&self) -> Option<&'g Symbol> { self.predictions.first().copied() }

    /// The rules applied from the start configuration, leftmost first.
    pub fn derivation(&self) -> &[&'g Rule] { &self.derivation }
}

impl PartialEq for TopDownConfig<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.predictions == other.predictions
    }
}

impl Eq for TopDownConfig<'_> {}

impl Hash for TopDownConfig<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
        self.predictions.hash(state);
    }
}

pub struct TopDownParser<'g> {
    grammar: &'g Grammar,
    nullable: HashSet<&'g Symbol>,
}

impl<'g> TopDownParser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        TopDownParser { grammar, nullable: grammar.nullable_symbols() }
    }

    fn start(&self) -> TopDownConfig<'g> {
        TopDownConfig {
            position: 0,
            predictions: Rc::from(vec![self.grammar.start()]),
            derivation: vec![],
        }
    }

    /// The leftmost derivation of the first complete parse the strategy
    /// finds.
    pub fn parse<T: AsRef<str>>(&self, tokens: &[T], strategy: Strategy) -> Option<Vec<&'g Rule>> {
        let input = Input { parser: self, tokens: tokens.iter().map(|t| t.as_ref()).collect() };
        search_first(&input, self.start(), strategy).map(|config| config.derivation)
    }
}

impl Recognizer for TopDownParser<'_> {
    fn accepts(&self, tokens: &[&str]) -> bool {
        self.parse(tokens, Strategy::DepthFirst).is_some()
    }
}

/// The search graph for one input.
struct Input<'p, 'g, 't> {
    parser: &'p TopDownParser<'g>,
    tokens: Vec<&'t str>,
}

impl<'p, 'g, 't> Input<'p, 'g, 't> {
    /// Every non-nullable prediction consumes at least one token.
    fn can_finish(&self, config: &TopDownConfig<'g>) -> bool {
        let needed = config.predictions.iter()
            .filter(|s| !self.parser.nullable.contains(**s))
            .count();
        needed <= self.tokens.len() - config.position
    }

    fn predict(&self, config: &TopDownConfig<'g>, nonterm: &'g Symbol) -> Vec<TopDownConfig<'g>> {
        self.parser.grammar.rules_for(nonterm).iter()
            .map(|rule| {
                let predictions: Vec<&'g Symbol> = rule.rhs().iter()
                    .chain(config.predictions[1..].iter().copied())
                    .collect();
                let mut derivation = config.derivation.clone();
                derivation.push(rule);
                TopDownConfig { position: config.position, predictions: predictions.into(), derivation }
            })
            .filter(|c| self.can_finish(c))
            .collect()
    }

    fn match_token(&self, config: &TopDownConfig<'g>, term: &Symbol) -> Vec<TopDownConfig<'g>> {
        match self.tokens.get(config.position) {
            Some(&token) if *term == *token => vec![TopDownConfig {
                position: config.position + 1,
                predictions: config.predictions[1..].into(),
                derivation: config.derivation.clone(),
            }],
            _ => vec![],
        }
    }
}

impl<'p, 'g, 't> Graph for Input<'p, 'g, 't> {
    type State = TopDownConfig<'g>;

    fn successors(&self, config: &TopDownConfig<'g>) -> Vec<TopDownConfig<'g>> {
        match config.prediction() {
            Some(next) if self.parser.grammar.is_nonterm(next) => self.predict(config, next),
            Some(next) => self.match_token(config, next),
            None => vec![],
        }
    }

    fn is_goal(&self, config: &TopDownConfig<'g>) -> bool {
        config.predictions.is_empty() && config.position == self.tokens.len()
    }
}

#[cfg(test)]
#[path = "tests/top_down.rs"]
mod tests_for_top_down;
