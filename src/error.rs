/// Crate-level error types for linklint diagnostics.
use std::path::PathBuf;

/// Fatal conditions only: anything that stops the whole run before a report
/// can be produced. Per-document read failures are deliberately not here —
/// they are collected as `types::ReadFailure` values and never abort a scan.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying I/O error from the filesystem, outside the document loop.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// Report serialization to JSON failed.
    #[error("json serialize: {0}")]
    Json(
        /// The wrapped JSON serialization error.
        #[from]
        serde_json::Error,
    ),

    /// The scan root does not exist or is not a directory.
    #[error("scan root not found: {}", path.display())]
    RootNotFound {
        /// Path that was passed as the scan root.
        path: PathBuf,
    },

    /// Config file exists but is not valid TOML.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
