//! Elementary transitions and the memoized transition table.
//!
//! The transition of a whole state decomposes into elementary transitions
//! of its positions, folded back together with subsumption reduction.
//! Because states are pinned and positions are relative, the image of a
//! state under a characteristic vector does not depend on where in the
//! query the automaton stands, so each (state, vector) pair is computed
//! once per tolerance and memoized.

use super::char_vec::CharVec;
use super::position::RelPos;
use super::state::{LevenState, ReducedUnion};
use rustc_hash::FxHashMap;

/// Positions this one can still reach in the query window: limited by the
/// remaining edit budget and by the end of the query.
fn rel_pos_len(n: usize, i: usize, w: usize, edit: i16) -> usize {
    debug_assert!(w >= i);
    debug_assert!(edit >= 0);

    (n - edit as usize + 1).min(w - i)
}

/// Window length for a state based at `i` in a query of `w` code points.
pub(crate) fn rel_state_len(n: usize, i: usize, w: usize) -> usize {
    debug_assert!(w >= i);
    (2 * n + 1).min(w - i)
}

// Transition of a position with edits to spare. Emission order is
// strictly increasing, as add_unchecked requires.
fn delta_i(position: RelPos, local: CharVec) -> ReducedUnion {
    let mut image = ReducedUnion::new();

    if local.is_empty() {
        // Past the end of the query: only an insertion is left
        image.add_unchecked(RelPos::new(position.offset, position.edit + 1));
        return image;
    }

    if local.has_first_bit_set() {
        image.add_unchecked(RelPos::new(position.offset + 1, position.edit));
        return image;
    }

    image.add_unchecked(RelPos::new(position.offset, position.edit + 1));
    image.add_unchecked(RelPos::new(position.offset + 1, position.edit + 1));

    if local.size() > 1 && local.bits() != 0 {
        // The target occurs deeper in the window: jump straight to it,
        // paying one edit per skipped query code point
        let j = local.lowest_match_index();
        image.add_unchecked(RelPos::new(position.offset + j, position.edit + j - 1));
    }

    image
}

// Transition of a position that has exhausted its edit budget: it either
// matches the next query code point or dies.
fn delta_ii(position: RelPos, local: CharVec) -> ReducedUnion {
    let mut image = ReducedUnion::new();

    if local.has_first_bit_set() {
        image.add_unchecked(RelPos::new(position.offset + 1, position.edit));
    }

    image
}

fn elem_delta(n: usize, i: usize, w: usize, position: RelPos, char_vec: CharVec) -> ReducedUnion {
    let rl = rel_pos_len(n, i + position.offset as usize, w, position.edit);

    let local = if rl < char_vec.size() || position.offset > 0 {
        char_vec.subrange(rl, 1 + position.offset as usize)
    } else {
        char_vec
    };

    if (position.edit as usize) < n {
        delta_i(position, local)
    } else {
        delta_ii(position, local)
    }
}

type CharVecMap = FxHashMap<CharVec, ReducedUnion>;

/// Memoized transition table for one tolerance.
///
/// Maps a pinned reduced union to the images of every characteristic
/// vector seen so far. Entries are computed on first demand and never
/// change afterwards, so the table only grows. Stored images are
/// unpinned; the caller rebases them.
pub(crate) struct LazyTable {
    n: usize,
    transitions: FxHashMap<ReducedUnion, CharVecMap>,
}

impl LazyTable {
    pub(crate) fn new(n: usize) -> Self {
        let mut transitions = FxHashMap::default();
        transitions.insert(
            ReducedUnion::singleton(RelPos::new(0, 0)),
            CharVecMap::default(),
        );

        Self { n, transitions }
    }

    pub(crate) fn tolerance(&self) -> usize {
        self.n
    }

    /// Image of `state` under `char_vec` for a query of `w` code points.
    pub(crate) fn delta(&mut self, state: &LevenState, w: usize, char_vec: CharVec) -> ReducedUnion {
        let n = self.n;
        let base = state.base();

        let inner = self
            .transitions
            .entry(state.positions().clone())
            .or_default();

        inner
            .entry(char_vec)
            .or_insert_with(|| {
                let mut image = ReducedUnion::new();
                for &position in state.positions().positions() {
                    image.update(&elem_delta(n, base, w, position, char_vec));
                }

                image
            })
            .clone()
    }
}
