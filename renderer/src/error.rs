use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing asset files other than shader sources.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("obj {path}: {source}")]
    ObjParse {
        path: PathBuf,
        #[source]
        source: obj::ObjError,
    },
    #[error("obj {path}: {message}")]
    Obj { path: PathBuf, message: String },
}
