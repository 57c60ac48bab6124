//! # levendict
//!
//! Approximate dictionary lookup using Levenshtein automata.
//!
//! Given a static dictionary and a query word with a maximum edit
//! distance `n`, this library enumerates every dictionary word whose
//! Levenshtein distance from the query is at most `n`. The dictionary is
//! compiled once into a minimal deterministic acyclic word graph (DAWG);
//! each query drives a lazily simulated universal Levenshtein automaton
//! against it, based on the algorithms described in:
//!
//! > Schulz, Klaus U., and Stoyan Mihov. "Fast string correction with
//! > Levenshtein automata." International Journal on Document Analysis and
//! > Recognition 5.1 (2002): 67-85.
//!
//! > Daciuk, Jan, Stoyan Mihov, Bruce W. Watson, and Richard E. Watson.
//! > "Incremental construction of minimal acyclic finite-state automata."
//! > Computational Linguistics 26.1 (2000): 3-16.
//!
//! Distances count code-point edits (insertions, deletions and
//! substitutions); all inputs are strict UTF-8.
//!
//! ## Example
//!
//! ```rust
//! use levendict::prelude::*;
//!
//! let dawg = Dawg::from_terms(["this", "that", "other"]);
//!
//! let matches: Vec<String> = dawg.query("the", 2).unwrap().collect();
//! assert_eq!(matches, ["that", "this", "other"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dictionary;
pub mod distance;
pub mod error;
pub mod transducer;
pub mod unicode;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::dictionary::{Dawg, DawgNode};
    pub use crate::error::{Error, Result};
    pub use crate::transducer::{LevenshteinAutomaton, QueryIterator, MAX_TOLERANCE};
}
