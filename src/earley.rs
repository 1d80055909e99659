//! Earley parsing that builds a shared packed parse forest as a byproduct of
//! recognition, after Scott's "SPPF-style parsing from Earley recognisers"
//! (2008).
//!
//! Traditional Earley: gradually build, from left-to-right, a set of "Earley
//! items" for each position in the input. Each item here additionally carries
//! the forest node for the part of its rule recognized so far; advancing an
//! item over a child node is where forest nodes and families get made.
//!
//! ε-productions complete at the position where they start, possibly before
//! the items waiting on them have been added to that position's set. So each
//! position keeps a table of the ε-derivations discovered there, and predicting
//! a non-terminal already in that table advances the predicting item at once.

use crate::derivation::Derivation;
use crate::forest::{Family, Forest, Label, Node, NodeId};
use crate::grammar::{Grammar, Rule, Symbol};
use crate::trace::{detail, step, Verbosity};
use crate::Recognizer;

mod chart;

use chart::{Chart, ParserItem};

/// A rule with a cursor: `dot` symbols of the right-hand side have been
/// recognized.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Item<'g> {
    rule: &'g Rule,
    dot: usize,
}

impl<'g> Item<'g> {
    pub fn new(rule: &'g Rule, dot: usize) -> Self {
        assert!(dot <= rule.rhs.len(), "dot {} is past the end of `{}`", dot, rule);
        Item { rule, dot }
    }

    pub fn rule(&self) -> &'g Rule { self.rule }
    pub fn dot(&self) -> usize { self.dot }
    pub fn lhs(&self) -> &'g Symbol { &self.rule.lhs }

    pub fn is_complete(&self) -> bool { self.dot == self.rule.rhs.len() }

    pub fn next_symbol(&self) -> Option<&'g Symbol> { self.rule.rhs.get(self.dot) }

    fn advanced(&self) -> Item<'g> { Item::new(self.rule, self.dot + 1) }
}

/// The forest for an accepted input together with its root, the complete
/// derivation of the start symbol over the whole input.
#[derive(Clone, Debug)]
pub struct ParseForest<'g> {
    forest: Forest<'g>,
    root: NodeId,
}

impl<'g> ParseForest<'g> {
    pub fn root(&self) -> NodeId { self.root }
    pub fn root_node(&self) -> &Node<'g> { self.forest.node(self.root) }
    pub fn forest(&self) -> &Forest<'g> { &self.forest }
    pub fn into_forest(self) -> Forest<'g> { self.forest }

    /// Every finite derivation tree packed under the root. The count can be
    /// exponential in the input length; use [`Forest::derivations`] and
    /// `take` to bound it.
    pub fn derivations(&self) -> Vec<Derivation> {
        self.forest.derivations(self.root).collect()
    }
}

pub struct EarleyParser<'g> {
    grammar: &'g Grammar,
    verbosity: Verbosity,
}

impl<'g> EarleyParser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        EarleyParser { grammar, verbosity: Verbosity::default() }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Parses `tokens` against the grammar. Returns `None` when the input is
    /// not in the language; empty input is never accepted.
    pub fn parse<T: AsRef<str>>(&self, tokens: &[T]) -> Option<ParseForest<'g>> {
        if tokens.is_empty() {
            step!(self.verbosity, "empty input; no parse");
            return None;
        }
        let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();
        let n = tokens.len();
        let mut parse = Parse {
            grammar: self.grammar,
            verbosity: self.verbosity,
            chart: Chart::new(tokens),
            forest: Forest::new(),
        };

        let seed = ParserItem::new(Item::new(self.grammar.start_rule(), 0), 0, None);
        parse.chart.add_next_item(seed, 0);

        for i in 0..=n {
            parse.chart.begin(i);
            parse.close(i);
            parse.scan(i);
        }

        let root = parse.chart.find_root(self.grammar.start());
        match root {
            Some(_) => step!(self.verbosity, "accepted; forest has {} nodes", parse.forest.len()),
            None => step!(self.verbosity, "rejected"),
        }
        let Parse { forest, .. } = parse;
        root.map(|root| ParseForest { forest, root })
    }
}

impl Recognizer for EarleyParser<'_> {
    fn accepts(&self, tokens: &[&str]) -> bool {
        self.parse(tokens).is_some()
    }
}

/// State of one parse invocation.
struct Parse<'g, 't> {
    grammar: &'g Grammar,
    verbosity: Verbosity,
    chart: Chart<'g, 't>,
    forest: Forest<'g>,
}

impl<'g, 't> Parse<'g, 't> {
    /// Runs predict/complete at position `i` until no new item appears.
    fn close(&mut self, i: usize) {
        let mut cursor = 0;
        while let Some(curr) = self.chart.set(i).get(cursor).cloned() {
            match curr.item.next_symbol() {
                Some(next) => {
                    self.predict(next, i);
                    if let Some(empty) = self.chart.empty_derivation(next) {
                        let advanced = self.advance(&curr, i, empty);
                        self.chart.add_curr_item(advanced, i);
                    }
                }
                None => {
                    let node = match curr.node {
                        Some(node) => node,
                        None => {
                            let node = self.make_empty_node(curr.item.lhs(), i);
                            self.chart.set_node(i, cursor, node);
                            node
                        }
                    };
                    if curr.origin == i {
                        self.chart.record_empty_derivation(curr.item.lhs(), node);
                    }
                    self.complete(&curr, node, i);
                }
            }
            cursor += 1;
        }
    }

    fn predict(&mut self, nonterm: &'g Symbol, i: usize) {
        step!(self.verbosity, "predict {} at {}", nonterm, i);
        for rule in self.grammar.rules_for(nonterm) {
            self.chart.add_curr_item(ParserItem::new(Item::new(rule, 0), i, None), i);
        }
    }

    /// Moves every scannable item over token `i`, into the set for `i + 1`.
    fn scan(&mut self, i: usize) {
        let scannables = self.chart.take_scannables();
        if scannables.is_empty() {
            return;
        }
        let token = self.chart.token(i);
        step!(self.verbosity, "scan {:?} at {} for {} items", token, i, scannables.len());
        let leaf = self.forest.get_or_create(Label::Symbol(token.into()), i, i + 1);
        for item in scannables {
            let advanced = self.advance(&item, i + 1, leaf);
            self.chart.add_next_item(advanced, i + 1);
        }
    }

    /// Advances the items waiting at `curr`'s origin for its left-hand side.
    fn complete(&mut self, curr: &ParserItem<'g>, node: NodeId, i: usize) {
        step!(self.verbosity, "complete {} from {} at {}", curr.item, curr.origin, i);
        for waiting in self.chart.waiting_for(curr.item.lhs(), curr.origin) {
            let advanced = self.advance(&waiting, i, node);
            self.chart.add_curr_item(advanced, i);
        }
    }

    fn advance(&mut self, item: &ParserItem<'g>, end: usize, right: NodeId) -> ParserItem<'g> {
        let advanced = item.item.advanced();
        let node = self.make_node(advanced, item.origin, end, item.node, right);
        detail!(self.verbosity, "advance {} from {} to {} over {:?}", advanced, item.origin, end, right);
        ParserItem::new(advanced, item.origin, Some(node))
    }

    /// The node for `item` spanning `[start, end)`, given the node for what
    /// precedes its last-recognized symbol (`left`) and the node for that
    /// symbol (`right`).
    fn make_node(&mut self, item: Item<'g>, start: usize, end: usize,
                 left: Option<NodeId>, right: NodeId) -> NodeId {
        let label = if item.is_complete() {
            Label::Symbol(item.lhs().clone())
        } else if item.dot() == 1 {
            // one child so far: the child stands for the partial item.
            return right;
        } else {
            Label::Item(item)
        };
        let node = self.forest.get_or_create(label, start, end);
        self.forest.add_family(node, Family::new(left, right));
        node
    }

    /// `lhs` derived as ε at `i`: a `lhs` node over `[i, i)` with an ε-leaf.
    fn make_empty_node(&mut self, lhs: &Symbol, i: usize) -> NodeId {
        let node = self.forest.get_or_create(Label::Symbol(lhs.clone()), i, i);
        let epsilon = self.forest.get_or_create(Label::Epsilon, i, i);
        self.forest.add_family(node, Family::unary(epsilon));
        node
    }
}

#[cfg(test)]
#[path = "tests/earley.rs"]
mod tests_for_earley;
