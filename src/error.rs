//! Error types for the bridge.
//!
//! Library code returns [`Result`] with the crate-wide [`Error`]. Only one
//! variant is ever swallowed: [`Error::DeviceRemoved`] raised while resolving
//! the canonical MRL of a media, which turns the conversion into "absent".
//! Everything else reaches the caller. The C ABI logs errors and returns null.

use std::path::PathBuf;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The storage device holding a file is not mounted anymore
    #[error("Device removed: {0}")]
    DeviceRemoved(String),

    /// Any other failure reported by the native library
    #[error("Media library error: {0}")]
    Library(String),

    /// The snapshot document is well-formed JSON but describes a broken graph
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    /// Search pattern rejected before reaching the library
    #[error("Invalid search pattern: {0:?}")]
    InvalidPattern(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a device removed error for the given device or mount point.
    pub fn device_removed(device: impl Into<String>) -> Self {
        Self::DeviceRemoved(device.into())
    }

    /// Create a generic native library error.
    pub fn library(message: impl Into<String>) -> Self {
        Self::Library(message.into())
    }

    /// Create a snapshot consistency error.
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::Snapshot(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the one failure media conversion maps to "absent".
    pub fn is_device_removed(&self) -> bool {
        matches!(self, Self::DeviceRemoved(_))
    }
}
