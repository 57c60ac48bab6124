//! Universal Levenshtein automata and the product search over them.
//!
//! The automaton of a query word with tolerance `n` is never
//! materialized. Its states are reduced unions of relative NFA positions,
//! pinned so the set of distinct unions stays finite, and its transition
//! function is a lazily filled table shared process-wide by every query
//! with the same tolerance.

mod automaton;
mod cache;
mod char_vec;
mod position;
mod query;
mod state;
mod transition;

pub use automaton::{LevenshteinAutomaton, MAX_TOLERANCE};
pub use cache::clear_transition_tables;
pub use char_vec::{CharVec, MAX_WINDOW};
pub use position::RelPos;
pub use query::QueryIterator;
pub use state::{LevenState, ReducedUnion};
