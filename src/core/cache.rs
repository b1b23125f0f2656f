//! Memoizing wrapper around a lexicon source
//!
//! The wrapped source is consulted on the first successful load only. The
//! cached entries stay valid until [`CachedLexicon::invalidate`] is called.
//! Failed loads are never cached.

use std::sync::{Mutex, PoisonError};

use crate::core::lexicon::{LexiconError, LexiconSource, SubjectivityEntry};

pub struct CachedLexicon<S> {
    inner: S,
    entries: Mutex<Option<Vec<SubjectivityEntry>>>,
}

impl<S: LexiconSource> CachedLexicon<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            entries: Mutex::new(None),
        }
    }

    /// Drop the cached entries so the next read goes to the wrapped source
    pub fn invalidate(&self) {
        *self.entries.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: LexiconSource> LexiconSource for CachedLexicon<S> {
    fn read_dataset(&self) -> Result<Vec<SubjectivityEntry>, LexiconError> {
        // Held across the load so concurrent readers wait for one read
        let mut cached = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(entries) = cached.as_ref() {
            return Ok(entries.clone());
        }

        let entries = self.inner.read_dataset()?;
        *cached = Some(entries.clone());

        Ok(entries)
    }
}
