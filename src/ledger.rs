//! Per-file import bookkeeping.
//!
//! Rules describe their import changes as an [`ImportDelta`]; the engine merges
//! deltas into one [`ImportLedger`] per compilation unit and resolves it once,
//! after every declaration has been rebuilt.
use indexmap::IndexSet;

/// Import changes produced by one rule invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportDelta {
    pub added: IndexSet<String>,
    pub removed: IndexSet<String>,
}

impl ImportDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, qualified_name: &str) -> Self {
        self.added.insert(qualified_name.to_string());
        self
    }

    pub fn remove(mut self, qualified_name: &str) -> Self {
        self.removed.insert(qualified_name.to_string());
        self
    }

    pub fn record_add(&mut self, qualified_name: &str) {
        self.added.insert(qualified_name.to_string());
    }

    pub fn record_remove(&mut self, qualified_name: &str) {
        self.removed.insert(qualified_name.to_string());
    }
}

#[derive(Debug, Default)]
pub struct ImportLedger {
    to_add: IndexSet<String>,
    to_remove: IndexSet<String>,
}

impl ImportLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_add(&mut self, qualified_name: &str) {
        if !self.to_add.contains(qualified_name) {
            self.to_add.insert(qualified_name.to_string());
        }
    }

    pub fn record_remove(&mut self, qualified_name: &str) {
        if !self.to_remove.contains(qualified_name) {
            self.to_remove.insert(qualified_name.to_string());
        }
    }

    pub fn merge(&mut self, delta: &ImportDelta) {
        for name in &delta.removed {
            self.record_remove(name);
        }
        for name in &delta.added {
            self.record_add(name);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// `existing − to_remove + to_add`. A removal is skipped while the name is
    /// still the qualified name of some surviving annotation. Existing order is
    /// kept, duplicates included; additions go last, in the order they were
    /// first recorded, unless already imported.
    pub fn resolve<'a, I>(self, existing: &[String], still_referenced: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.is_empty() {
            return existing.to_vec();
        }
        let referenced: IndexSet<&str> = still_referenced.into_iter().collect();
        let mut out: Vec<String> = existing
            .iter()
            .filter(|name| !self.to_remove.contains(name.as_str()) || referenced.contains(name.as_str()))
            .cloned()
            .collect();
        for name in self.to_add {
            if !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}
