//! Dictionary automata.
//!
//! The dictionary side of a lookup is a [`Dawg`]: the minimal DFA over
//! the word set, built once and shared immutably by every query.

mod dawg;

pub use dawg::{Dawg, DawgNode};
