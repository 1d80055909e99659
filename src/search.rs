//! Uninformed search over implicit graphs.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// A graph given by its successor function and a goal test.
pub trait Graph {
    type State: Clone + Eq + Hash;

    fn successors(&self, state: &Self::State) -> Vec<Self::State>;
    fn is_goal(&self, state: &Self::State) -> bool;
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
}

/// Frontier of states to visit; the strategy decides which end it is taken
/// from.
struct Frontier<S> {
    strategy: Strategy,
    states: VecDeque<S>,
}

impl<S> Frontier<S> {
    fn new(strategy: Strategy, start: S) -> Self {
        Frontier { strategy, states: VecDeque::from([start]) }
    }

    fn pop(&mut self) -> Option<S> {
        match self.strategy {
            Strategy::BreadthFirst => self.states.pop_front(),
            Strategy::DepthFirst => self.states.pop_back(),
        }
    }
}

/// The first goal state reachable from `start`, if any. Each state is
/// expanded at most once.
pub fn search_first<G: Graph>(graph: &G, start: G::State, strategy: Strategy) -> Option<G::State> {
    let mut visited = HashSet::new();
    let mut frontier = Frontier::new(strategy, start);
    while let Some(state) = frontier.pop() {
        if graph.is_goal(&state) {
            return Some(state);
        }
        expand(graph, state, &mut visited, &mut frontier);
    }
    None
}

/// Every reachable goal state, in the order the strategy reaches them. Goal
/// states are not expanded further.
pub fn search_all<G: Graph>(graph: &G, start: G::State, strategy: Strategy) -> Vec<G::State> {
    let mut goals = vec![];
    let mut found = HashSet::new();
    let mut visited = HashSet::new();
    let mut frontier = Frontier::new(strategy, start);
    while let Some(state) = frontier.pop() {
        if graph.is_goal(&state) {
            if found.insert(state.clone()) {
                goals.push(state);
            }
            continue;
        }
        expand(graph, state, &mut visited, &mut frontier);
    }
    goals
}

fn expand<G: Graph>(graph: &G, state: G::State,
                    visited: &mut HashSet<G::State>, frontier: &mut Frontier<G::State>) {
    if visited.contains(&state) {
        return;
    }
    let successors = graph.successors(&state);
    visited.insert(state);
    frontier.states.extend(successors.into_iter().filter(|s| !visited.contains(s)));
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests_for_search;
