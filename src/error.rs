use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the filesystem and codec collaborators.
///
/// None of these are fatal: the view state catches them where it calls out
/// and turns them into a catalog removal or a status message.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("could not decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not save {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ViewerError>;
