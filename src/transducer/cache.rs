//! Process-wide cache of transition tables, keyed by tolerance.
//!
//! Every automaton with the same tolerance shares one [`LazyTable`], so
//! queries amortize transition work across each other whenever they pass
//! through the same reduced union. The tables are monotonic (entries are
//! only ever added), which keeps sharing them safe under a plain mutex.

use super::transition::LazyTable;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock};

type TableMap = FxHashMap<usize, Arc<Mutex<LazyTable>>>;

static TABLES: OnceLock<Mutex<TableMap>> = OnceLock::new();

fn tables() -> &'static Mutex<TableMap> {
    TABLES.get_or_init(|| Mutex::new(TableMap::default()))
}

/// The shared transition table for tolerance `n`, created on first use.
pub(crate) fn table_for(n: usize) -> Arc<Mutex<LazyTable>> {
    tables()
        .lock()
        .entry(n)
        .or_insert_with(|| Arc::new(Mutex::new(LazyTable::new(n))))
        .clone()
}

/// Drop every memoized transition table.
///
/// Useful between unrelated runs in long-lived processes. Automata that
/// already hold a table keep it alive; new automata start fresh.
pub fn clear_transition_tables() {
    tables().lock().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test body: clearing the process-wide map would race a
    // concurrent sharing assertion.
    #[test]
    fn test_tables_shared_per_tolerance_until_cleared() {
        let a = table_for(14);
        let b = table_for(14);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.lock().tolerance(), 14);

        let c = table_for(13);
        assert!(!Arc::ptr_eq(&a, &c));

        clear_transition_tables();
        let after = table_for(14);
        assert!(!Arc::ptr_eq(&a, &after));
    }
}
