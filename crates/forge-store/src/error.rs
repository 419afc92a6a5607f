use thiserror::Error;

/// Errors surfaced by a [`crate::Store`] implementation.
///
/// Malformed on-disk JSON is deliberately **not** a variant here: a
/// corrupt `chain.json`/`actions.json`/witness file is recovered from by
/// falling back to an empty document (a `tracing::warn!` marks the event),
/// matching the store's recovery policy rather than propagating a fatal
/// error for damage the caller cannot repair anyway.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialise store state: {0}")]
    Serialize(#[from] serde_json::Error),
}
