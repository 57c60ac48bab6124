//! Automaton states: reduced unions of relative positions.

use super::position::RelPos;
use smallvec::SmallVec;
use std::cell::Cell;
use std::hash::{Hash, Hasher};

const MOD_ADLER: u32 = 65521;

/// A deterministic state of the universal Levenshtein automaton: the
/// reduced union of the NFA positions it simulates.
///
/// The position list is kept strictly sorted, duplicate-free and
/// subsumption-free at every observable point. Unions behave as values
/// (structural equality, hashable); the inline SmallVec keeps typical
/// states (a handful of positions) off the heap, and the rolling hash is
/// computed once and cached.
///
/// Mutation happens only while a union is being assembled, before it is
/// published into a transition table or a [`LevenState`].
#[derive(Debug, Clone)]
pub struct ReducedUnion {
    positions: SmallVec<[RelPos; 8]>,
    cached_hash: Cell<u32>,
}

impl ReducedUnion {
    /// Create an empty union.
    pub fn new() -> Self {
        Self {
            positions: SmallVec::new(),
            cached_hash: Cell::new(0),
        }
    }

    /// Create a union holding a single position.
    pub fn singleton(position: RelPos) -> Self {
        let mut positions = SmallVec::new();
        positions.push(position);
        Self {
            positions,
            cached_hash: Cell::new(0),
        }
    }

    /// Whether the union holds no positions.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of positions.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// The positions, in sorted order.
    #[inline(always)]
    pub fn positions(&self) -> &[RelPos] {
        &self.positions
    }

    /// Minimum offset across positions, or 0 when empty.
    ///
    /// A pinned union has raise level 0; anything above that is the
    /// translation `subtract` must apply before the union can serve as a
    /// state again.
    pub fn raise_level(&self) -> i16 {
        self.positions.iter().map(|p| p.offset).min().unwrap_or(0)
    }

    /// Insert a position, preserving the reduction invariants.
    ///
    /// The position is dropped when already present or subsumed by an
    /// earlier entry; positions it subsumes are evicted. Only earlier
    /// entries can subsume the newcomer because a subsumer sorts strictly
    /// before everything it covers.
    pub fn add(&mut self, position: RelPos) {
        let at = self.positions.partition_point(|p| p < &position);

        if at < self.positions.len() && self.positions[at] == position {
            return;
        }

        if self.positions[..at].iter().any(|p| p.subsumes(&position)) {
            return;
        }

        self.cached_hash.set(0);
        self.positions.insert(at, position);

        let mut i = at + 1;
        while i < self.positions.len() {
            if position.subsumes(&self.positions[i]) {
                self.positions.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Insert a position the caller knows is neither present nor
    /// involved in any subsumption with the current contents.
    ///
    /// The elementary transition emits its positions in strictly
    /// increasing order, which is exactly this situation.
    pub fn add_unchecked(&mut self, position: RelPos) {
        debug_assert_eq!(self.cached_hash.get(), 0);

        let at = self.positions.partition_point(|p| p < &position);
        debug_assert!(at == self.positions.len() || self.positions[at] != position);
        self.positions.insert(at, position);
    }

    /// Fold every position of `other` into this union.
    pub fn update(&mut self, other: &ReducedUnion) {
        for &position in other.positions() {
            self.add(position);
        }
    }

    /// A copy of this union with every offset reduced by `di`.
    ///
    /// Translating all offsets by the same amount preserves order and
    /// subsumption, so the result needs no re-reduction.
    pub fn subtract(&self, di: i16) -> ReducedUnion {
        Self {
            positions: self.positions.iter().map(|p| p.subtract(di)).collect(),
            cached_hash: Cell::new(0),
        }
    }

    /// The rolling hash over the position list, computed on first use.
    pub fn hash_value(&self) -> u32 {
        let mut hash = self.cached_hash.get();
        if hash == 0 {
            hash = self.compute_hash();
            self.cached_hash.set(hash);
        }

        hash
    }

    // Adler-32 over the per-position hashes.
    fn compute_hash(&self) -> u32 {
        let mut a: u32 = 1;
        let mut b: u32 = 0;
        for position in &self.positions {
            a = (a + position.hash_value()) % MOD_ADLER;
            b = (b + a) % MOD_ADLER;
        }

        (b << 16) | a
    }
}

impl Default for ReducedUnion {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ReducedUnion {
    fn eq(&self, other: &Self) -> bool {
        self.positions == other.positions
    }
}

impl Eq for ReducedUnion {}

impl Hash for ReducedUnion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_value().hash(state);
    }
}

/// A state of the automaton bound to a concrete query: a base index into
/// the query's code points plus the reduced union relative to it.
///
/// States are immutable once constructed and always pinned: the minimum
/// offset across their positions is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevenState {
    base: usize,
    positions: ReducedUnion,
}

impl LevenState {
    pub(crate) fn new(base: usize, positions: ReducedUnion) -> Self {
        debug_assert!(positions.raise_level() == 0);
        Self { base, positions }
    }

    /// The start state: base 0, a single position with no progress and
    /// no edits.
    pub fn initial() -> Self {
        Self::new(0, ReducedUnion::singleton(RelPos::new(0, 0)))
    }

    /// Absolute index into the query's code points.
    #[inline(always)]
    pub fn base(&self) -> usize {
        self.base
    }

    /// The reduced union relative to `base`.
    #[inline(always)]
    pub fn positions(&self) -> &ReducedUnion {
        &self.positions
    }
}
