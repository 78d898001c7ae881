//! In-memory document store for stateless deployments.

use super::{DocumentHandle, DocumentStore};
use crate::error::{Error, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::RwLock;

/// Holds finalized documents in a locked table keyed by name.
///
/// Created at service start and injected wherever documents are finalized
/// or served; supports concurrent put/get from independent generation
/// requests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, Bytes>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for MemoryStore {
    fn put(&self, name: &str, bytes: Bytes) -> Result<DocumentHandle> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| Error::Storage("document table lock poisoned".to_string()))?;
        log::debug!("buffered {} bytes as '{}'", bytes.len(), name);
        documents.insert(name.to_string(), bytes);
        Ok(DocumentHandle::Buffered(name.to_string()))
    }

    fn get(&self, name: &str) -> Result<Bytes> {
        let documents = self
            .documents
            .read()
            .map_err(|_| Error::Storage("document table lock poisoned".to_string()))?;
        documents
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get_is_byte_identical() {
        let store = MemoryStore::new();
        let payload = Bytes::from_static(b"%PDF-1.7 fake");
        store.put("biomass_qr_labels_20240115_093000.pdf", payload.clone()).unwrap();
        assert_eq!(store.get("biomass_qr_labels_20240115_093000.pdf").unwrap(), payload);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.get("missing.pdf"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_concurrent_puts_and_gets() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                let name = format!("doc_{}.pdf", i);
                let payload = Bytes::from(vec![i as u8; 64]);
                store.put(&name, payload.clone()).unwrap();
                assert_eq!(store.get(&name).unwrap(), payload);
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 8);
    }
}
