use dashmap::DashMap;
use log::{debug, trace};
use std::collections::BTreeSet;

/// Shared record of which declared dependencies have been seen referenced.
///
/// Keys are fixed at construction: scanning can only flip an existing entry
/// from unused to used, never add one. `mark_used` may be called from any
/// number of threads at once; each call is a single check-and-set under the
/// entry's shard lock, so no update is lost and repeated marks are harmless.
///
/// Reading the result goes through [`UsageTable::into_unused`], which consumes
/// the table. Every scan task borrows the table, so the snapshot can only be
/// taken once all of them have returned.
#[derive(Debug, Default)]
pub struct UsageTable {
    entries: DashMap<String, bool>,
}

impl UsageTable {
    /// Creates a table with every name marked unused
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: DashMap<String, bool> =
            names.into_iter().map(|name| (name.into(), false)).collect();
        debug!("Initialized usage table with {} declared dependencies", entries.len());
        Self { entries }
    }

    /// Marks `name` as used. Returns false, without touching the table, when
    /// the name was never declared.
    pub fn mark_used(&self, name: &str) -> bool {
        match self.entries.get_mut(name) {
            Some(mut used) => {
                if !*used {
                    trace!("Marking '{}' as used", name);
                }
                *used = true;
                true
            }
            None => {
                trace!("Ignoring undeclared name '{}'", name);
                false
            }
        }
    }

    pub fn is_used(&self, name: &str) -> Option<bool> {
        self.entries.get(name).map(|used| *used)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the table and returns every name still marked unused
    pub fn into_unused(self) -> BTreeSet<String> {
        let unused: BTreeSet<String> =
            self.entries.into_iter().filter(|(_, used)| !used).map(|(name, _)| name).collect();
        debug!("Usage table snapshot: {} unused", unused.len());
        unused
    }
}
