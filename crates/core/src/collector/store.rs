use std::collections::HashMap;

use tokio::sync::RwLock;

/// Repository URL -> owner string.
pub type OwnershipMap = HashMap<String, String>;

/// Result map shared by all lookup tasks.
///
/// Each task writes only its own key; the lock serializes insertion.
#[derive(Debug, Default)]
pub struct OwnershipStore {
    records: RwLock<OwnershipMap>,
}

impl OwnershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the owner for a repository URL, replacing any previous value.
    pub async fn record(&self, url: String, owner: String) {
        self.records.write().await.insert(url, owner);
    }

    /// Record the owner only if the URL has no entry yet.
    pub async fn record_if_absent(&self, url: String, owner: String) {
        self.records.write().await.entry(url).or_insert(owner);
    }

    pub async fn get(&self, url: &str) -> Option<String> {
        self.records.read().await.get(url).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Move all records out, leaving the store empty.
    pub async fn take(&self) -> OwnershipMap {
        std::mem::take(&mut *self.records.write().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_record_and_get() {
        let store = OwnershipStore::new();
        store.record("u".to_string(), "alice".to_string()).await;
        assert_eq!(store.get("u").await.as_deref(), Some("alice"));
        assert_eq!(store.get("v").await, None);
    }

    #[tokio::test]
    async fn test_record_if_absent_keeps_existing() {
        let store = OwnershipStore::new();
        store.record("u".to_string(), "alice".to_string()).await;
        store.record_if_absent("u".to_string(), "None".to_string()).await;
        store.record_if_absent("v".to_string(), "None".to_string()).await;

        assert_eq!(store.get("u").await.as_deref(), Some("alice"));
        assert_eq!(store.get("v").await.as_deref(), Some("None"));
    }

    #[tokio::test]
    async fn test_concurrent_disjoint_writes() {
        let store = Arc::new(OwnershipStore::new());
        let mut handles = Vec::new();
        for i in 0..200 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.record(format!("url-{}", i), format!("owner-{}", i)).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len().await, 200);
        assert_eq!(store.get("url-42").await.as_deref(), Some("owner-42"));
    }

    #[tokio::test]
    async fn test_take_empties_store() {
        let store = OwnershipStore::new();
        store.record("u".to_string(), "alice".to_string()).await;

        let records = store.take().await;
        assert_eq!(records.len(), 1);
        assert!(store.is_empty().await);
    }
}
