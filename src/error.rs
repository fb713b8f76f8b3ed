use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IpaInfoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to open archive {path}: {source}")]
    OpenArchive {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid archive: {0}")]
    InvalidArchive(#[from] zip::result::ZipError),

    #[error("Refusing to extract entry outside of destination: {0}")]
    UnsafeEntryPath(String),

    #[error("Failed to extract {entry}: {source}")]
    ExtractEntry {
        entry: String,
        source: std::io::Error,
    },

    #[error("No Payload folder found at {0}")]
    MissingPayload(PathBuf),

    #[error("Payload folder is empty: {0}")]
    EmptyPayload(PathBuf),

    #[error("No app bundle found in {0}")]
    NoAppBundle(PathBuf),

    #[error("Expected a single app bundle, found: {}", .0.join(", "))]
    MultipleAppBundles(Vec<String>),

    #[error("Failed to read Info.plist {path}: {source}")]
    ReadInfoPlist {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed Info.plist {path}: {source}")]
    MalformedInfoPlist {
        path: PathBuf,
        source: plist::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IpaInfoError>;
