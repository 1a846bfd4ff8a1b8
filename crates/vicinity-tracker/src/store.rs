//! In-memory store of fetched businesses for the current session.
//!
//! A session spans one active search term: the store is cleared when the
//! query changes and otherwise only grows. Insertion is atomic
//! check-and-insert so concurrent detail-fetch tasks cannot double-insert.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use vicinity_core::BusinessDetail;

#[derive(Default)]
pub struct ResultStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    order: Vec<String>,
    by_id: HashMap<String, BusinessDetail>,
}

impl ResultStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `true` if a detail record for `id` was already inserted this session.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.lock().by_id.contains_key(id)
    }

    /// Inserts `detail` if its id is not already present.
    ///
    /// Returns `true` if this call inserted the record, `false` if the id was
    /// already present (the stored value is left untouched). The check and
    /// the insert happen under one lock, so exactly one of any set of
    /// concurrent callers with the same id wins.
    pub fn insert_if_absent(&self, detail: BusinessDetail) -> bool {
        let mut inner = self.lock();
        if inner.by_id.contains_key(&detail.id) {
            return false;
        }
        inner.order.push(detail.id.clone());
        inner.by_id.insert(detail.id.clone(), detail);
        true
    }

    /// Drops all records and all membership history, starting a new session.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.order.clear();
        inner.by_id.clear();
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.lock().by_id.len()
    }

    /// All stored records in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BusinessDetail> {
        let inner = self.lock();
        inner
            .order
            .iter()
            .filter_map(|id| inner.by_id.get(id).cloned())
            .collect()
    }
}
