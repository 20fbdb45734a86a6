//! String-keyed heterogeneous container with reference semantics.
//!
//! Cloning a [`Bundle`] aliases the same storage, as passing a platform
//! bundle around does. [`Bundle::duplicate`] copies the top-level entries.

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::Value;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

static EMPTY: Lazy<Bundle> = Lazy::new(|| Bundle {
    inner: Arc::new(Inner {
        entries: RwLock::new(BTreeMap::new()),
        immutable: true,
    }),
});

struct Inner {
    entries: RwLock<BTreeMap<String, Value>>,
    immutable: bool,
}

/// Shared handle to a key-value container
#[derive(Clone)]
pub struct Bundle {
    inner: Arc<Inner>,
}

impl Bundle {
    /// Create a new, writable, empty bundle
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(BTreeMap::new()),
                immutable: false,
            }),
        }
    }

    /// The canonical immutable empty bundle
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// True if this handle is the canonical empty bundle
    pub fn is_empty_singleton(&self) -> bool {
        Arc::ptr_eq(&self.inner, &EMPTY.inner)
    }

    /// True if both handles share storage
    pub fn same_as(&self, other: &Bundle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copy of the top-level entries; nested bundles stay shared
    ///
    /// The empty singleton yields a fresh writable bundle.
    pub fn duplicate(&self) -> Bundle {
        if self.is_empty_singleton() {
            return Bundle::new();
        }

        let entries = self.inner.entries.read().clone();

        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(entries),
                immutable: false,
            }),
        }
    }

    /// Store a value, replacing any previous value under the key
    pub fn put(&self, key: impl Into<String>, value: Value) -> RuntimeResult<()> {
        if self.inner.immutable {
            return Err(RuntimeError::ImmutableContainer);
        }
        self.inner.entries.write().insert(key.into(), value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.entries.read().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> RuntimeResult<Option<Value>> {
        if self.inner.immutable {
            return Err(RuntimeError::ImmutableContainer);
        }
        Ok(self.inner.entries.write().remove(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.entries.read().contains_key(key)
    }

    /// Keys in sorted order
    pub fn keys(&self) -> Vec<String> {
        self.inner.entries.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }

    /// Snapshot of every entry
    pub fn entries(&self) -> BTreeMap<String, Value> {
        self.inner.entries.read().clone()
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality over the current contents
impl PartialEq for Bundle {
    fn eq(&self, other: &Self) -> bool {
        if self.same_as(other) {
            return true;
        }
        self.entries() == other.entries()
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

#[cfg(test)]
#[path = "bundle/bundle_tests.rs"]
mod bundle_tests;
