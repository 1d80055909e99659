//! Shared packed parse forest (SPPF).
//!
//! Every node of one parse lives in a single [`Forest`] arena and is addressed
//! by [`NodeId`]; families refer to their children by id, never by ownership,
//! so the node graph may share sub-derivations and may contain cycles (from
//! ε-derivations and recursive non-terminals).
//!
//! A node is identified by its key `(label, start, end)`. The store hands out
//! at most one node per key, and each node holds an ordered, duplicate-free
//! list of families; more than one family means the span is ambiguous.

use std::collections::HashMap;

use crate::earley::Item;
use crate::grammar::Symbol;

pub const EPSILON_LABEL: &str = "eps";

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Label<'g> {
    /// A non-terminal's complete derivation, or a terminal leaf.
    Symbol(Symbol),
    /// An intermediate node for a partially recognized rule.
    Item(Item<'g>),
    /// The empty-string leaf.
    Epsilon,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize { self.0 }
}

/// One way of deriving a node: an optional left child followed by a right
/// child whose spans abut.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Family {
    pub left: Option<NodeId>,
    pub right: NodeId,
}

impl Family {
    pub fn new(left: Option<NodeId>, right: NodeId) -> Self { Family { left, right } }
    pub fn unary(right: NodeId) -> Self { Family { left: None, right } }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeKey<'g> {
    label: Label<'g>,
    start: usize,
    end: usize,
}

#[derive(Clone, Debug)]
pub struct Node<'g> {
    key: NodeKey<'g>,
    families: Vec<Family>,
}

impl<'g> Node<'g> {
    pub fn label(&self) -> &Label<'g> { &self.key.label }
    pub fn start(&self) -> usize { self.key.start }
    pub fn end(&self) -> usize { self.key.end }
    pub fn families(&self) -> &[Family] { &self.families }
    pub fn is_ambiguous(&self) -> bool { self.families.len() > 1 }
    pub fn is_leaf(&self) -> bool { self.families.is_empty() }
}

#[derive(Clone, Debug, Default)]
pub struct Forest<'g> {
    nodes: Vec<Node<'g>>,
    index: HashMap<NodeKey<'g>, NodeId>,
}

impl<'g> Forest<'g> {
    pub fn new() -> Self { Forest::default() }

    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn node(&self, id: NodeId) -> &Node<'g> { &self.nodes[id.0] }

    pub fn nodes(&self) -> impl Iterator<Item=(NodeId, &Node<'g>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Returns the node keyed by `(label, start, end)`, creating an empty one
    /// if there is none yet.
    pub fn get_or_create(&mut self, label: Label<'g>, start: usize, end: usize) -> NodeId {
        assert!(start <= end, "node span [{start},{end}] is reversed");
        let key = NodeKey { label, start, end };
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { key: key.clone(), families: vec![] });
        self.index.insert(key, id);
        id
    }

    pub fn find(&self, label: Label<'g>, start: usize, end: usize) -> Option<NodeId> {
        self.index.get(&NodeKey { label, start, end }).copied()
    }

    /// Attaches `family` to `node`; re-adding an existing family is a no-op.
    /// Returns whether the node changed.
    ///
    /// Panics if the family's spans do not tile the node's span.
    pub fn add_family(&mut self, node: NodeId, family: Family) -> bool {
        self.check_family(node, family);
        let families = &mut self.nodes[node.0].families;
        if families.contains(&family) {
            return false;
        }
        families.push(family);
        true
    }

    fn check_family(&self, node: NodeId, family: Family) {
        let n = self.node(node);
        let right = self.node(family.right);
        assert_eq!(right.end(), n.end(),
                   "right child {:?} does not end where {:?} does", right.key, n.key);
        match family.left {
            Some(left) => {
                let left = self.node(left);
                assert!(left.start() == n.start() && left.end() == right.start(),
                        "children {:?} and {:?} do not tile {:?}", left.key, right.key, n.key);
                assert!(*right.label() != Label::Epsilon,
                        "ε-leaf {:?} given a left sibling under {:?}", right.key, n.key);
            }
            None => {
                assert_eq!(right.start(), n.start(),
                           "only child {:?} does not start where {:?} does", right.key, n.key);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/forest.rs"]
mod tests_for_forest;
