//! Errors raised at the edges of the crate (loading documents and config)
//!
//! The layout core itself never fails: placement conflicts degrade to auto
//! placement and bad drops are reported through `DropOutcome`.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, FormError>;
