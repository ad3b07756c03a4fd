use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("failed to read manifest {path:?}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    #[error("failed to decode image {path:?}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError
    },

    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("failed to write coordinates to {path:?}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
