//! Enumerating the derivation trees packed into a forest.
//!
//! Extraction is a worklist over partial derivations. Each partial derivation
//! carries the edges it has accumulated, the families it has already applied
//! (so a shared or cyclic node is expanded at most once per family within one
//! tree), and a stack of nodes still to expand. An ambiguous node forks the
//! partial derivation once per further unapplied family.

use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;

use crate::forest::{Family, Forest, Node, NodeId};

/// A forest node as it appears in a derivation: its label text and span.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Vertex {
    label: String,
    start: usize,
    end: usize,
}

impl Vertex {
    pub fn new(label: impl Into<String>, start: usize, end: usize) -> Self {
        Vertex { label: label.into(), start, end }
    }

    pub fn label(&self) -> &str { &self.label }
    pub fn start(&self) -> usize { self.start }
    pub fn end(&self) -> usize { self.end }
    pub fn width(&self) -> usize { self.end - self.start }
}

impl<'g> From<&Node<'g>> for Vertex {
    fn from(node: &Node<'g>) -> Self {
        Vertex::new(node.label().to_string(), node.start(), node.end())
    }
}

/// A parent-to-child edge of a derivation tree.
///
/// Edges order by the child's start, then widest child first, with the
/// parent's span and then the labels breaking ties; this is the order in
/// which a derivation is rendered.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Edge {
    pub parent: Vertex,
    pub child: Vertex,
}

impl Edge {
    pub fn new(parent: Vertex, child: Vertex) -> Self { Edge { parent, child } }

    fn sort_key(&self) -> (usize, Reverse<usize>, usize, Reverse<usize>, &str, &str) {
        (self.child.start, Reverse(self.child.width()),
         self.parent.start, Reverse(self.parent.width()),
         self.parent.label.as_str(), self.child.label.as_str())
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering { self.sort_key().cmp(&other.sort_key()) }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

/// One derivation tree, as the edges in the order extraction produced them.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Derivation {
    edges: Vec<Edge>,
}

impl Derivation {
    pub fn edges(&self) -> &[Edge] { &self.edges }
    pub fn len(&self) -> usize { self.edges.len() }
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    pub fn sorted(&self) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self.edges.iter().collect();
        edges.sort();
        edges
    }

    /// Nodes with no outgoing edge, in render order.
    pub fn leaves(&self) -> Vec<&Vertex> {
        let parents: HashSet<&Vertex> = self.edges.iter().map(|e| &e.parent).collect();
        self.sorted().into_iter()
            .map(|e| &e.child)
            .filter(|v| !parents.contains(v))
            .collect()
    }
}

#[derive(Clone, Debug)]
struct Partial {
    edges: Vec<(NodeId, NodeId)>,
    resolved: HashSet<(NodeId, usize)>,
    stack: Vec<Option<NodeId>>,
}

impl Partial {
    fn apply(&mut self, node: NodeId, index: usize, family: Family) {
        self.resolved.insert((node, index));
        if let Some(left) = family.left {
            self.edges.push((node, left));
        }
        self.stack.push(family.left);
        self.edges.push((node, family.right));
        self.stack.push(Some(family.right));
    }
}

/// Lazily yields the derivations under a root; see [`Forest::derivations`].
pub struct Derivations<'f, 'g> {
    forest: &'f Forest<'g>,
    worklist: Vec<Partial>,
}

impl<'g> Forest<'g> {
    /// Every finite derivation tree under `root`, one per call to `next`.
    /// Ambiguous forests can pack exponentially many; bound with `take`.
    pub fn derivations(&self, root: NodeId) -> Derivations<'_, 'g> {
        let start = Partial {
            edges: vec![],
            resolved: HashSet::new(),
            stack: vec![Some(root)],
        };
        Derivations { forest: self, worklist: vec![start] }
    }
}

impl<'f, 'g> Derivations<'f, 'g> {
    fn finish(&self, partial: Partial) -> Derivation {
        let vertex = |id: NodeId| Vertex::from(self.forest.node(id));
        let edges = partial.edges.into_iter()
            .map(|(parent, child)| Edge::new(vertex(parent), vertex(child)))
            .collect();
        Derivation { edges }
    }
}

impl<'f, 'g> Iterator for Derivations<'f, 'g> {
    type Item = Derivation;

    fn next(&mut self) -> Option<Derivation> {
        let mut partial = self.worklist.pop()?;
        loop {
            let id = match partial.stack.pop() {
                None => return Some(self.finish(partial)),
                Some(None) => continue,
                Some(Some(id)) => id,
            };
            let mut open = self.forest.node(id).families().iter()
                .copied()
                .enumerate()
                .filter(|(index, _)| !partial.resolved.contains(&(id, *index)));
            let first = match open.next() {
                Some(first) => first,
                None => continue,
            };
            for (index, family) in open {
                let mut fork = partial.clone();
                fork.apply(id, index, family);
                self.worklist.push(fork);
            }
            partial.apply(id, first.0, first.1);
        }
    }
}

#[cfg(test)]
#[path = "tests/derivation.rs"]
mod tests_for_derivation;
