use linear_map::LinearMap;

use std::collections::HashSet;
use std::mem;

use crate::forest::NodeId;
use crate::grammar::Symbol;

use super::Item;

/// An Earley item together with the position where its recognition began and
/// the forest node for what has been recognized of it so far (`None` only for
/// items at dot 0).
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct ParserItem<'g> {
    pub(crate) item: Item<'g>,
    pub(crate) origin: usize,
    pub(crate) node: Option<NodeId>,
}

impl<'g> ParserItem<'g> {
    pub(crate) fn new(item: Item<'g>, origin: usize, node: Option<NodeId>) -> Self {
        ParserItem { item, origin, node }
    }

    fn key(&self) -> ItemKey<'g> { ItemKey(self.item, self.origin) }
}

/// Set membership ignores the node: the node for a given item and origin at a
/// given position is unique, so a second arrival only ever adds families to it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
struct ItemKey<'g>(Item<'g>, usize);

/// Insertion-ordered item set.
#[derive(Clone, Default, Debug)]
struct ItemSet<'g> {
    items: Vec<ParserItem<'g>>,
    keys: HashSet<ItemKey<'g>>,
}

impl<'g> ItemSet<'g> {
    fn insert(&mut self, item: ParserItem<'g>) -> bool {
        if self.keys.insert(item.key()) {
            self.items.push(item);
            true
        } else {
            false
        }
    }
}

/// The per-position item sets of one parse, the pools of items waiting to
/// scan the current and next tokens, and the ε-derivations found at the
/// current position.
pub(crate) struct Chart<'g, 't> {
    tokens: Vec<&'t str>,
    sets: Vec<ItemSet<'g>>,
    scannables: ItemSet<'g>,
    next_scannables: ItemSet<'g>,
    empty_derivations: LinearMap<&'g Symbol, NodeId>,
}

impl<'g, 't> Chart<'g, 't> {
    pub(crate) fn new(tokens: Vec<&'t str>) -> Self {
        let sets = (0..=tokens.len()).map(|_| ItemSet::default()).collect();
        Chart {
            tokens,
            sets,
            scannables: ItemSet::default(),
            next_scannables: ItemSet::default(),
            empty_derivations: LinearMap::new(),
        }
    }

    pub(crate) fn token(&self, i: usize) -> &'t str { self.tokens[i] }

    /// Whether `item` is waiting for exactly the token at `i`.
    fn scans_at(&self, item: &ParserItem<'g>, i: usize) -> bool {
        match (item.item.next_symbol(), self.tokens.get(i)) {
            (Some(next), Some(&token)) => *next == *token,
            _ => false,
        }
    }

    /// Enters position `i`: the items that were waiting for token `i` become
    /// the current scan pool and the ε table starts over.
    pub(crate) fn begin(&mut self, i: usize) {
        debug_assert!(i < self.sets.len());
        self.empty_derivations.clear();
        self.scannables = mem::take(&mut self.next_scannables);
    }

    pub(crate) fn set(&self, i: usize) -> &[ParserItem<'g>] { &self.sets[i].items }

    pub(crate) fn set_node(&mut self, i: usize, index: usize, node: NodeId) {
        self.sets[i].items[index].node = Some(node);
    }

    /// Adds an item arising at position `i`. Items that can scan token `i` go
    /// to the scan pool instead of the set, and are never closed over.
    pub(crate) fn add_curr_item(&mut self, item: ParserItem<'g>, i: usize) -> bool {
        if self.scans_at(&item, i) {
            self.scannables.insert(item)
        } else {
            self.sets[i].insert(item)
        }
    }

    /// Adds an item for position `i` before that position is entered.
    pub(crate) fn add_next_item(&mut self, item: ParserItem<'g>, i: usize) -> bool {
        if self.scans_at(&item, i) {
            self.next_scannables.insert(item)
        } else if i < self.sets.len() {
            self.sets[i].insert(item)
        } else {
            false
        }
    }

    pub(crate) fn take_scannables(&mut self) -> Vec<ParserItem<'g>> {
        mem::take(&mut self.scannables).items
    }

    pub(crate) fn record_empty_derivation(&mut self, lhs: &'g Symbol, node: NodeId) {
        self.empty_derivations.insert(lhs, node);
    }

    pub(crate) fn empty_derivation(&self, symbol: &'g Symbol) -> Option<NodeId> {
        self.empty_derivations.get(&symbol).copied()
    }

    /// The items of set `origin` whose next symbol is `lhs`, as they stand
    /// now.
    pub(crate) fn waiting_for(&self, lhs: &Symbol, origin: usize) -> Vec<ParserItem<'g>> {
        self.sets[origin].items.iter()
            .filter(|waiting| waiting.item.next_symbol() == Some(lhs))
            .cloned()
            .collect()
    }

    /// The node of a complete `start` item spanning the whole input.
    pub(crate) fn find_root(&self, start: &Symbol) -> Option<NodeId> {
        let last = self.sets.last()?;
        last.items.iter()
            .find(|p| p.origin == 0
                  && p.item.is_complete()
                  && p.item.lhs() == start)
            .and_then(|p| p.node)
    }
}
