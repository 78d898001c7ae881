//! Error types for label rendering and storage.

/// Result type alias for label rendering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering or storing label documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Payload cannot be represented in the chosen symbology.
    ///
    /// Aborts the whole generation request; retrying a deterministic
    /// encoding failure would reproduce the same failure.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Row collection is not row-shaped at all.
    ///
    /// Not raised for ordinary missing fields, which degrade to
    /// placeholders during formatting.
    #[error("Malformed row: {0}")]
    MalformedRow(String),

    /// Backing store is unavailable or rejected the write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Named document cannot be located at retrieval time.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_error_message() {
        let err = Error::Encoding("payload too long".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Encoding error"));
        assert!(msg.contains("payload too long"));
    }

    #[test]
    fn test_not_found_error_message() {
        let err = Error::NotFound("qr_labels_20240115_093000.pdf".to_string());
        assert!(format!("{}", err).contains("qr_labels_20240115_093000.pdf"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
