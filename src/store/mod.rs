//! Output target strategy: where finalized documents live.
//!
//! The assembler always renders to bytes and calls `put` once; whether
//! those bytes land on durable storage or in a process-wide table is the
//! store's concern. Stores are explicit, injected components — there is
//! no ambient global table.

use crate::config::OutputMode;
use crate::error::Result;
use bytes::Bytes;
use std::path::PathBuf;

mod file_store;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// An opaque reference to a finalized document, resolvable back to its
/// bytes by name through the store that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentHandle {
    /// Persisted to durable storage at this path
    Saved(PathBuf),
    /// Held in an in-memory table under this name
    Buffered(String),
}

impl DocumentHandle {
    /// The document name (file name for saved documents).
    pub fn name(&self) -> &str {
        match self {
            DocumentHandle::Saved(path) => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default(),
            DocumentHandle::Buffered(name) => name,
        }
    }
}

/// A named document store.
///
/// Both backends behave identically from the assembler's point of view:
/// what is written under a name is read back byte-identical for the
/// session's lifetime. Name collisions are the caller's responsibility
/// to avoid (timestamped names).
pub trait DocumentStore: Send + Sync {
    /// Store a finalized document under `name`.
    fn put(&self, name: &str, bytes: Bytes) -> Result<DocumentHandle>;

    /// Retrieve a document's bytes by name.
    fn get(&self, name: &str) -> Result<Bytes>;
}

/// Construct the store matching the deployment mode.
pub fn open_store(mode: &OutputMode) -> Result<Box<dyn DocumentStore>> {
    match mode {
        OutputMode::Durable(dir) => Ok(Box::new(FileStore::new(dir.clone())?)),
        OutputMode::InMemory => Ok(Box::new(MemoryStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_name() {
        let saved = DocumentHandle::Saved(PathBuf::from("labels_pdf/qr_labels_x.pdf"));
        assert_eq!(saved.name(), "qr_labels_x.pdf");

        let buffered = DocumentHandle::Buffered("qr_labels_x.pdf".to_string());
        assert_eq!(buffered.name(), "qr_labels_x.pdf");
    }

    #[test]
    fn test_open_store_in_memory() {
        let store = open_store(&OutputMode::InMemory).unwrap();
        let handle = store.put("a.pdf", Bytes::from_static(b"%PDF")).unwrap();
        assert_eq!(handle, DocumentHandle::Buffered("a.pdf".to_string()));
    }
}
