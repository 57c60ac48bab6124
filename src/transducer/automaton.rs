//! Query-scoped driver for the universal Levenshtein automaton.

use super::cache;
use super::char_vec::CharVec;
use super::state::LevenState;
use super::transition::{rel_state_len, LazyTable};
use crate::error::{Error, Result};
use crate::unicode;
use parking_lot::Mutex;
use std::sync::Arc;

/// Largest supported edit tolerance.
///
/// Characteristic vectors are 32-bit, constraining the query window to
/// `2n + 1 <= 31`.
pub const MAX_TOLERANCE: usize = 15;

/// The Levenshtein automaton of one query word at a fixed tolerance.
///
/// The automaton is simulated lazily: states are pinned reduced unions of
/// relative positions, and transitions are looked up in (or added to) the
/// process-wide table shared by every automaton with the same tolerance.
///
/// Cloning is cheap; clones share the query and the table.
#[derive(Clone)]
pub struct LevenshteinAutomaton {
    chars: Arc<[char]>,
    table: Arc<Mutex<LazyTable>>,
    n: usize,
}

impl LevenshteinAutomaton {
    /// Bind an automaton to `word` at the given tolerance.
    ///
    /// Fails with [`Error::ToleranceOutOfRange`] when the tolerance
    /// exceeds [`MAX_TOLERANCE`].
    pub fn new(word: &str, tolerance: usize) -> Result<Self> {
        if tolerance > MAX_TOLERANCE {
            return Err(Error::ToleranceOutOfRange { tolerance });
        }

        Ok(Self {
            chars: word.chars().collect(),
            table: cache::table_for(tolerance),
            n: tolerance,
        })
    }

    /// Like [`LevenshteinAutomaton::new`], for raw bytes.
    ///
    /// The word is strictly validated; malformed UTF-8 is a hard error.
    pub fn from_bytes(word: &[u8], tolerance: usize) -> Result<Self> {
        if tolerance > MAX_TOLERANCE {
            return Err(Error::ToleranceOutOfRange { tolerance });
        }

        Ok(Self {
            chars: unicode::decode_code_points(word)?.into(),
            table: cache::table_for(tolerance),
            n: tolerance,
        })
    }

    /// The automaton's start state.
    pub fn initial_state(&self) -> LevenState {
        LevenState::initial()
    }

    /// The bound tolerance.
    pub fn tolerance(&self) -> usize {
        self.n
    }

    /// Length of the query in code points.
    pub fn code_point_len(&self) -> usize {
        self.chars.len()
    }

    /// Whether `state` accepts: some position can still bridge the rest
    /// of the query within the remaining edit budget.
    pub fn is_final(&self, state: &LevenState) -> bool {
        let w = self.chars.len();

        state.positions().positions().iter().any(|p| {
            debug_assert!(p.offset >= 0 && p.edit >= 0);
            w + p.edit as usize <= self.n + state.base() + p.offset as usize
        })
    }

    /// Step the automaton over `letter`.
    ///
    /// Builds the characteristic vector of `letter` against the query
    /// window at the state's base, takes the memoized image and pins it
    /// by rebasing. Returns `None` when the image is empty, i.e. the
    /// branch is dead.
    pub fn delta(&self, state: &LevenState, letter: char) -> Option<LevenState> {
        debug_assert_eq!(state.positions().raise_level(), 0);

        let w = self.chars.len();
        let i = state.base();
        let window = &self.chars[i..i + rel_state_len(self.n, i, w)];
        let char_vec = CharVec::from_window(window, letter);

        let image = self.table.lock().delta(state, w, char_vec);
        if image.is_empty() {
            return None;
        }

        let di = image.raise_level();
        debug_assert!(di >= 0);
        let positions = if di > 0 { image.subtract(di) } else { image };

        Some(LevenState::new(i + di as usize, positions))
    }
}
