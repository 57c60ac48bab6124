//! Lazy product search over (DAWG, Levenshtein automaton).

use super::automaton::LevenshteinAutomaton;
use super::state::LevenState;
use crate::dictionary::{Dawg, DawgNode};
use crate::error::Result;
use std::collections::VecDeque;
use std::sync::Arc;

/// One frontier entry: where the search stands in both automata, plus
/// the candidate spelled out so far.
struct SearchItem {
    candidate: String,
    node: usize,
    state: LevenState,
}

/// Lazy iterator over the dictionary words within a fixed edit distance
/// of a query.
///
/// Drives the DAWG and the Levenshtein automaton in lockstep through a
/// FIFO frontier, pruning every branch the automaton declares dead. Work
/// happens on demand, one frontier expansion per yielded word at most;
/// dropping the iterator cancels the rest of the search.
///
/// Because each node's edges are walked in label order and the frontier
/// is first-in first-out, the yield order is a stable function of
/// (dictionary, query, tolerance): shorter candidates first, ties in
/// code-point order.
pub struct QueryIterator {
    nodes: Arc<Vec<DawgNode>>,
    automaton: LevenshteinAutomaton,
    frontier: VecDeque<SearchItem>,
}

impl QueryIterator {
    /// Set up a search for words within `max_distance` of `term`.
    ///
    /// Fails when the tolerance is out of range.
    pub fn new(dawg: &Dawg, term: &str, max_distance: usize) -> Result<Self> {
        let automaton = LevenshteinAutomaton::new(term, max_distance)?;

        let mut frontier = VecDeque::new();
        frontier.push_back(SearchItem {
            candidate: String::new(),
            node: 0,
            state: automaton.initial_state(),
        });

        Ok(Self {
            nodes: Arc::clone(dawg.nodes()),
            automaton,
            frontier,
        })
    }
}

impl Iterator for QueryIterator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some(item) = self.frontier.pop_front() {
            let node = &self.nodes[item.node];

            // Children are expanded even when the item itself matches: a
            // match may be a strict prefix of further matches
            for &(label, child) in node.edges() {
                if let Some(state) = self.automaton.delta(&item.state, label) {
                    let mut candidate = item.candidate.clone();
                    candidate.push(label);
                    self.frontier.push_back(SearchItem {
                        candidate,
                        node: child,
                        state,
                    });
                }
            }

            if node.is_final() && self.automaton.is_final(&item.state) {
                return Some(item.candidate);
            }
        }

        None
    }
}
