//! Error types shared by the MST core and the ingestion collaborators

use thiserror::Error;

/// Failures reported by MST computation and graph ingestion.
///
/// Precondition violations (invalid cluster counts, lookups of unregistered
/// ids at non-benign call sites) are programming errors and panic instead.
#[derive(Debug, Error)]
pub enum MstError {
    /// The input graph has more than one connected component, so no spanning
    /// tree can be built. Every algorithm reports disconnection this way.
    #[error("no spanning tree can be built for a disconnected graph")]
    Disconnected,

    /// An input file could not be read.
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An input file was readable but malformed.
    #[error("malformed input at {path}:{line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },
}
