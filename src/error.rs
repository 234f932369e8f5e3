use std::path::PathBuf;

/// Raised when a media type table literal cannot be loaded.
///
/// For the embedded table this can only happen at build time; a registry that
/// fails to load must not be used at all, since a partial table would answer
/// lookups incorrectly.
#[derive(Debug, thiserror::Error)]
pub enum MalformedTableError {
    #[error("media type table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("media type '{0}' appears more than once")]
    DuplicateKey(String),

    #[error("{0}")]
    InvalidMediaType(String),

    #[error("invalid extension '{extension}' for media type '{media_type}'")]
    InvalidExtension { media_type: String, extension: String },

    #[error("media type '{0}' has an empty extension list")]
    EmptyExtensions(String),

    #[error("failed to read media type table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Raised when a string does not name a known registration source.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unrecognized media type source '{0}'")]
pub struct UnknownSourceError(pub String);
