// This is actually defined at `crate::search::tests_for_search`

use crate::search::*;

use std::cell::RefCell;

/// Numbers below `limit`; `n` leads to `n + 1` and `2n`.
struct Doubling {
    limit: u32,
    goal: fn(u32) -> bool,
    expanded: RefCell<Vec<u32>>,
}

impl Doubling {
    fn new(limit: u32, goal: fn(u32) -> bool) -> Self {
        Doubling { limit, goal, expanded: RefCell::new(vec![]) }
    }
}

impl Graph for Doubling {
    type State = u32;

    fn successors(&self, n: &u32) -> Vec<u32> {
        self.expanded.borrow_mut().push(*n);
        [n + 1, n * 2].into_iter().filter(|&m| m < self.limit).collect()
    }

    fn is_goal(&self, n: &u32) -> bool { (self.goal)(*n) }
}

#[test]
fn breadth_first_expands_in_layers() {
    let g = Doubling::new(100, |n| n == 6);
    assert_eq!(search_first(&g, 1, Strategy::BreadthFirst), Some(6));
    assert_eq!(*g.expanded.borrow(), [1, 2, 3, 4]);
}

#[test]
fn depth_first_follows_the_last_successor() {
    let g = Doubling::new(20, |n| n == 17);
    assert_eq!(search_first(&g, 1, Strategy::DepthFirst), Some(17));
    assert_eq!(&g.expanded.borrow()[..5], [1, 2, 4, 8, 16]);
}

#[test]
fn no_goal() {
    let g = Doubling::new(10, |_| false);
    assert_eq!(search_first(&g, 1, Strategy::BreadthFirst), None);
    // every state is expanded exactly once
    let mut expanded = g.expanded.borrow().clone();
    expanded.sort();
    assert_eq!(expanded, (1..10).collect::<Vec<_>>());

    let g = Doubling::new(10, |_| false);
    assert_eq!(search_first(&g, 1, Strategy::DepthFirst), None);
    assert_eq!(g.expanded.borrow().len(), 9);
}

#[test]
fn all_goals() {
    let g = Doubling::new(20, |n| n % 5 == 0);
    let mut goals = search_all(&g, 1, Strategy::BreadthFirst);
    goals.sort();
    assert_eq!(goals, [5, 10, 15]);

    let g = Doubling::new(20, |n| n % 5 == 0);
    let mut goals = search_all(&g, 1, Strategy::DepthFirst);
    goals.sort();
    assert_eq!(goals, [5, 10, 15]);
}

#[test]
fn start_can_be_the_goal() {
    let g = Doubling::new(10, |n| n == 1);
    assert_eq!(search_first(&g, 1, Strategy::DepthFirst), Some(1));
    assert!(g.expanded.borrow().is_empty());
}
