//! Durable-storage document store.

use super::{DocumentHandle, DocumentStore};
use crate::error::{Error, Result};
use bytes::Bytes;
use std::path::PathBuf;

/// Stores documents as files under one directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            Error::Storage(format!("cannot create directory '{}': {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    /// The directory documents are stored under.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

impl DocumentStore for FileStore {
    fn put(&self, name: &str, bytes: Bytes) -> Result<DocumentHandle> {
        let path = self.dir.join(name);
        std::fs::write(&path, &bytes)
            .map_err(|e| Error::Storage(format!("cannot write '{}': {}", path.display(), e)))?;
        log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(DocumentHandle::Saved(path))
    }

    fn get(&self, name: &str) -> Result<Bytes> {
        let path = self.dir.join(name);
        match std::fs::read(&path) {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(name.to_string()))
            },
            Err(e) => Err(Error::Storage(format!("cannot read '{}': {}", path.display(), e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("labels")).unwrap();

        let payload = Bytes::from_static(b"%PDF-1.7 fake");
        let handle = store.put("qr_labels_20240115_093000.pdf", payload.clone()).unwrap();

        match &handle {
            DocumentHandle::Saved(path) => assert!(path.exists()),
            DocumentHandle::Buffered(_) => panic!("expected a saved handle"),
        }
        assert_eq!(store.get("qr_labels_20240115_093000.pdf").unwrap(), payload);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path()).unwrap();
        let result = store.get("nope.pdf");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_new_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");
        let store = FileStore::new(&dir).unwrap();
        assert!(store.dir().exists());
    }
}
