//! DAWG (directed acyclic word graph) dictionary.
//!
//! A DAWG is the minimal deterministic finite automaton accepting exactly
//! a finite set of words. It is built here by the incremental algorithm
//! of Daciuk, Mihov, Watson and Watson for lexicographically sorted
//! input: suffixes of finished words are canonicalized against a register
//! of already-minimal states while later words are still being added.
//!
//! Nodes live in an arena and refer to each other by index, so suffix
//! sharing is plain index aliasing and the finished graph is a flat,
//! immutable vector.

use crate::error::Result;
use crate::transducer::QueryIterator;
use crate::unicode;
use std::collections::HashMap;
use std::sync::Arc;

const ROOT: usize = 0;

/// A node in the DAWG.
///
/// Edges are kept strictly sorted by label, which the sorted construction
/// order guarantees for free and which fixes the traversal order of every
/// query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DawgNode {
    edges: Vec<(char, usize)>,
    is_final: bool,
}

impl DawgNode {
    fn new(is_final: bool) -> Self {
        Self {
            edges: Vec::new(),
            is_final,
        }
    }

    /// True when this node ends a dictionary word.
    #[inline(always)]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Outgoing edges as (label, target index), sorted by label.
    #[inline(always)]
    pub fn edges(&self) -> &[(char, usize)] {
        &self.edges
    }

    /// Target of the edge labelled `label`, if present.
    pub fn transition(&self, label: char) -> Option<usize> {
        self.edges
            .binary_search_by_key(&label, |&(l, _)| l)
            .ok()
            .map(|at| self.edges[at].1)
    }

    fn last_child(&self) -> Option<usize> {
        self.edges.last().map(|&(_, child)| child)
    }
}

/// A minimal acyclic word graph over a fixed set of words.
///
/// Immutable once built; clones share the node arena.
#[derive(Clone, Debug)]
pub struct Dawg {
    nodes: Arc<Vec<DawgNode>>,
    term_count: usize,
}

impl Dawg {
    /// Build a DAWG from any finite sequence of words.
    ///
    /// A copy of the input is sorted (byte order, which equals code-point
    /// order for UTF-8) and deduplicated first; duplicates are harmless
    /// either way.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = terms
            .into_iter()
            .map(|term| term.as_ref().to_string())
            .collect();
        words.sort();
        words.dedup();

        let mut builder = Builder::new(words.is_empty() || words[0].is_empty());
        for word in &words {
            builder.insert(word);
        }

        builder.finish(words.len())
    }

    /// Build a DAWG from raw byte strings, validating each one.
    ///
    /// Any word that is not valid UTF-8 aborts construction with
    /// [`crate::error::Error::InvalidUtf8`].
    pub fn from_bytes<I, B>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut words = Vec::new();
        for term in terms {
            let chars = unicode::decode_code_points(term.as_ref())?;
            words.push(chars.into_iter().collect::<String>());
        }

        Ok(Self::from_terms(words))
    }

    /// Whether `word` is in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        let mut node = ROOT;
        for ch in word.chars() {
            match self.nodes[node].transition(ch) {
                Some(child) => node = child,
                None => return false,
            }
        }

        self.nodes[node].is_final
    }

    /// Byte-level [`Dawg::contains`] with strict UTF-8 validation.
    pub fn contains_bytes(&self, word: &[u8]) -> Result<bool> {
        let chars = unicode::decode_code_points(word)?;
        Ok(self.contains(&chars.into_iter().collect::<String>()))
    }

    /// Enumerate every dictionary word within `max_distance` edits of
    /// `term`, lazily and in deterministic order.
    pub fn query(&self, term: &str, max_distance: usize) -> Result<QueryIterator> {
        QueryIterator::new(self, term, max_distance)
    }

    /// Number of words in the dictionary.
    pub fn term_count(&self) -> usize {
        self.term_count
    }

    /// Number of nodes in the graph, useful when checking how much
    /// structure is shared.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node at `index`; index 0 is the root.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn node(&self, index: usize) -> &DawgNode {
        &self.nodes[index]
    }

    pub(crate) fn nodes(&self) -> &Arc<Vec<DawgNode>> {
        &self.nodes
    }
}

/// Incremental builder over sorted input.
///
/// The register maps node snapshots to their canonical arena index. Only
/// finished nodes are registered; a registered node's edges never change
/// again, so the snapshot keys stay accurate.
struct Builder {
    nodes: Vec<DawgNode>,
    register: HashMap<DawgNode, usize>,
}

impl Builder {
    fn new(root_final: bool) -> Self {
        Self {
            nodes: vec![DawgNode::new(root_final)],
            register: HashMap::new(),
        }
    }

    /// Add the next word in sorted order.
    fn insert(&mut self, word: &str) {
        // Longest prefix already in the graph. Sorted input keeps this
        // walk on the still-mutable path from the root.
        let mut last = ROOT;
        let mut suffix = word.chars();
        loop {
            let mut lookahead = suffix.clone();
            match lookahead.next() {
                Some(ch) => match self.nodes[last].transition(ch) {
                    Some(child) => {
                        last = child;
                        suffix = lookahead;
                    }
                    None => break,
                },
                None => break,
            }
        }

        // The previous word's tail below `last` is finished: fold it into
        // the register before branching away from it
        if !self.nodes[last].edges.is_empty() {
            self.replace_or_register(last);
        }

        self.add_suffix(last, suffix);
    }

    fn replace_or_register(&mut self, state: usize) {
        let Some(child) = self.nodes[state].last_child() else {
            return;
        };

        if !self.nodes[child].edges.is_empty() {
            self.replace_or_register(child);
        }

        match self.register.get(&self.nodes[child]).copied() {
            Some(canonical) => {
                if canonical != child {
                    self.set_last_child(state, canonical);
                }
            }
            None => {
                self.register.insert(self.nodes[child].clone(), child);
            }
        }
    }

    fn set_last_child(&mut self, state: usize, child: usize) {
        let edges = &mut self.nodes[state].edges;
        assert!(!edges.is_empty(), "set_last_child on a childless state");

        let last = edges.len() - 1;
        edges[last].1 = child;
    }

    fn add_suffix(&mut self, state: usize, suffix: std::str::Chars<'_>) {
        let mut parent = state;
        let mut labels = suffix.peekable();

        while let Some(ch) = labels.next() {
            let child = self.nodes.len();
            self.nodes.push(DawgNode::new(labels.peek().is_none()));

            // Sorted input: `ch` exceeds every label already on `parent`
            debug_assert!(self.nodes[parent]
                .edges
                .last()
                .map_or(true, |&(label, _)| label < ch));
            self.nodes[parent].edges.push((ch, child));
            parent = child;
        }
    }

    fn finish(mut self, term_count: usize) -> Dawg {
        self.replace_or_register(ROOT);

        Dawg {
            nodes: Arc::new(self.compact()),
            term_count,
        }
    }

    /// Renumber the reachable nodes breadth-first, dropping everything
    /// the register merges orphaned.
    fn compact(self) -> Vec<DawgNode> {
        let mut remap = vec![usize::MAX; self.nodes.len()];
        let mut order = vec![ROOT];
        remap[ROOT] = 0;

        let mut head = 0;
        while head < order.len() {
            let node = order[head];
            head += 1;

            for &(_, child) in &self.nodes[node].edges {
                if remap[child] == usize::MAX {
                    remap[child] = order.len();
                    order.push(child);
                }
            }
        }

        order
            .iter()
            .map(|&old| {
                let node = &self.nodes[old];
                DawgNode {
                    is_final: node.is_final,
                    edges: node
                        .edges
                        .iter()
                        .map(|&(label, child)| (label, remap[child]))
                        .collect(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let dawg = Dawg::from_terms(["hello", "world"]);
        assert!(dawg.contains("hello"));
        assert!(dawg.contains("world"));
        assert!(!dawg.contains("goodbye"));
        assert!(!dawg.contains("hell"));
        assert!(!dawg.contains(""));
    }

    #[test]
    fn test_term_count_ignores_duplicates() {
        let dawg = Dawg::from_terms(["test", "test", "test"]);
        assert_eq!(dawg.term_count(), 1);
        assert!(dawg.contains("test"));
    }

    #[test]
    fn test_empty_dictionary_accepts_empty_word() {
        let dawg = Dawg::from_terms(Vec::<String>::new());
        assert_eq!(dawg.term_count(), 0);
        assert!(dawg.contains(""));
        assert!(!dawg.contains("a"));
    }

    #[test]
    fn test_empty_word_in_dictionary() {
        let dawg = Dawg::from_terms(["", "a"]);
        assert!(dawg.contains(""));
        assert!(dawg.contains("a"));
    }

    #[test]
    fn test_suffix_sharing() {
        let dawg = Dawg::from_terms(["testing", "running", "walking", "talking"]);
        assert_eq!(dawg.term_count(), 4);
        // A trie would need one node per character of every word
        assert!(dawg.node_count() < 20);
    }

    #[test]
    fn test_prefix_words() {
        let dawg = Dawg::from_terms(["test", "testing", "tested"]);
        assert!(dawg.contains("test"));
        assert!(dawg.contains("testing"));
        assert!(dawg.contains("tested"));
        assert!(!dawg.contains("testi"));
    }

    #[test]
    fn test_node_traversal() {
        let dawg = Dawg::from_terms(["ab", "ac"]);
        let root = dawg.node(0);
        let a = dawg.node(root.transition('a').unwrap());

        let labels: Vec<char> = a.edges().iter().map(|&(label, _)| label).collect();
        assert_eq!(labels, vec!['b', 'c']);

        // "ab" and "ac" end in the same shared node
        assert_eq!(a.transition('b'), a.transition('c'));
        assert!(dawg.node(a.transition('b').unwrap()).is_final());
    }

    #[test]
    fn test_minimality() {
        let dawg = Dawg::from_terms(["bat", "cat", "bats", "cats"]);

        for i in 0..dawg.node_count() {
            for j in (i + 1)..dawg.node_count() {
                assert_ne!(
                    dawg.node(i),
                    dawg.node(j),
                    "nodes {i} and {j} are structurally equivalent"
                );
            }
        }
    }

    #[test]
    fn test_from_bytes_validates() {
        assert!(Dawg::from_bytes([b"ok".as_slice()]).is_ok());
        assert!(Dawg::from_bytes([&[0x61, 0xc0, 0xaf][..]]).is_err());
    }

    #[test]
    fn test_contains_bytes() {
        let dawg = Dawg::from_terms(["žluť"]);
        assert!(dawg.contains_bytes("žluť".as_bytes()).unwrap());
        assert!(!dawg.contains_bytes(b"zlut").unwrap());
        assert!(dawg.contains_bytes(&[0x80]).is_err());
    }

    #[test]
    fn test_unicode_labels() {
        let dawg = Dawg::from_terms(["naïve", "naive"]);
        assert!(dawg.contains("naïve"));
        assert!(dawg.contains("naive"));
        assert_eq!(dawg.term_count(), 2);
    }
}
