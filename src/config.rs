//! Configuration for label generation.

use std::path::PathBuf;

/// Environment variable that switches finalized documents to the in-memory
/// backing store. Any non-empty value enables it.
pub const IN_MEMORY_ENV: &str = "LABELPRESS_IN_MEMORY";

/// Where finalized documents are kept.
///
/// Constant for the lifetime of a process: read from the environment once
/// when the configuration is built, never re-inspected per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Persist each document under a named path in this directory.
    Durable(PathBuf),
    /// Hold each document in a process-wide in-memory table.
    InMemory,
}

impl OutputMode {
    /// Read the deployment-mode flag from the environment.
    pub fn from_env() -> Self {
        match std::env::var(IN_MEMORY_ENV) {
            Ok(v) if !v.is_empty() => OutputMode::InMemory,
            _ => OutputMode::Durable(PathBuf::from("labels_pdf")),
        }
    }
}

/// Label generation configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Backing store selection for finalized documents.
    pub output_mode: OutputMode,
    /// Creator entry written into document metadata.
    pub creator: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderConfig {
    /// Create a configuration with defaults, reading the deployment-mode
    /// flag from the environment.
    pub fn new() -> Self {
        Self {
            output_mode: OutputMode::from_env(),
            creator: "labelpress".to_string(),
        }
    }

    /// Override the output mode.
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Override the Creator metadata entry.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }
}
