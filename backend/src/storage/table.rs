//! Generic in-memory table

use std::collections::HashMap;

use shared::Patch;
use tokio::sync::RwLock;

/// One entity collection: an id-keyed map behind its own lock.
///
/// Every method acquires and releases the lock within the call, so no lock
/// is ever held across an await point outside this module. Iteration order
/// of the underlying map is not meaningful; callers sort snapshots.
pub struct Table<T> {
    rows: RwLock<HashMap<String, T>>,
}

impl<T: Clone> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.rows.read().await.get(id).cloned()
    }

    pub async fn insert(&self, id: String, row: T) {
        self.rows.write().await.insert(id, row);
    }

    /// Remove the row at `id`, reporting whether one existed.
    pub async fn remove(&self, id: &str) -> bool {
        self.rows.write().await.remove(id).is_some()
    }

    /// Snapshot of every row.
    pub async fn all(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    /// Snapshot of the rows matching `keep`.
    pub async fn filter(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| keep(row))
            .cloned()
            .collect()
    }

    /// Merge `patch` into the row at `id`, returning the updated row.
    /// Populated patch fields overwrite; absent fields stay untouched.
    pub async fn update<P: Patch<T>>(&self, id: &str, patch: P) -> Option<T> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(id)?;
        patch.apply_to(row);
        Some(row.clone())
    }
}

impl<T: Clone> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
