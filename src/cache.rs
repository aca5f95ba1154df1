//! Shared cache from [`GrammarSpec`] to its expanded string.
//!
//! Concurrent misses for the same spec are not coordinated: each caller
//! expands independently outside the lock, and the first result stored wins.
//! Every caller then receives that stored value, so all holders of a given
//! spec share one allocation. Failed expansions are never cached.

use crate::error::Result;
use crate::grammar::{GrammarEngine, GrammarSpec};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

#[derive(Debug, Default)]
pub struct ExpansionCache {
    entries: Mutex<HashMap<GrammarSpec, Arc<str>>>,
}

impl ExpansionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The map only holds finished, immutable values, so a poisoned lock
    /// still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, HashMap<GrammarSpec, Arc<str>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, spec: &GrammarSpec) -> Option<Arc<str>> {
        self.lock().get(spec).cloned()
    }

    /// Returns the cached expansion of `spec`, expanding it with `engine` on a miss.
    pub fn get_or_expand(&self, engine: &GrammarEngine, spec: &GrammarSpec) -> Result<Arc<str>> {
        if let Some(hit) = self.get(spec) {
            trace!(iterations = spec.iterations(), "expansion cache hit");
            return Ok(hit);
        }

        let expanded: Arc<str> = engine.expand_spec(spec)?.into();
        let stored = self
            .lock()
            .entry(spec.clone())
            .or_insert(expanded)
            .clone();
        Ok(stored)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
