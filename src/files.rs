use std::env;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::ImageReader;

use crate::error::{Result, ViewerError};

/// Lowercase name suffixes that make a file browsable. The bare `jpeg`
/// entry also admits names like `scanjpeg`; that has always been accepted.
const SUPPORTED_SUFFIXES: &[&str] = &[".jpg", ".jpeg", ".png", "jpeg", ".bmp"];

pub fn has_supported_suffix(name: &str) -> bool {
    let lower = name.to_lowercase();
    SUPPORTED_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// Content sniff on top of the suffix match: the leading bytes must be a
/// known image signature.
#[cfg(not(windows))]
pub fn looks_like_image(path: &Path) -> bool {
    let Ok(file) = fs::File::open(path) else {
        return false;
    };
    match ImageReader::new(BufReader::new(file)).with_guessed_format() {
        Ok(reader) => reader.format().is_some(),
        Err(_) => false,
    }
}

#[cfg(windows)]
pub fn looks_like_image(_path: &Path) -> bool {
    true
}

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

/// A user supplied path normalized into a browse root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Base name of the target when the path named a single file.
    pub file: Option<String>,
    /// Absolute directory to scan.
    pub directory: PathBuf,
}

fn working_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Never fails: anything unusable falls back to the working directory.
pub fn resolve_path(raw: &Path) -> ResolvedPath {
    let fallback = ResolvedPath {
        file: None,
        directory: working_dir(),
    };

    if raw.as_os_str().is_empty() || raw == Path::new(".") {
        return fallback;
    }
    if !raw.exists() {
        log::warn!("{}", ViewerError::PathNotFound(raw.to_path_buf()));
        return fallback;
    }

    let real = match fs::canonicalize(raw) {
        Ok(p) => p,
        Err(source) => {
            let err = ViewerError::Io {
                path: raw.to_path_buf(),
                source,
            };
            log::warn!("{}", err);
            return fallback;
        }
    };

    if real.is_file() {
        let file = real
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        let directory = real
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(working_dir);
        ResolvedPath { file, directory }
    } else {
        ResolvedPath {
            file: None,
            directory: real,
        }
    }
}

// ---------------------------------------------------------------------------
// Directory listing
// ---------------------------------------------------------------------------

/// Non-recursive listing of `dir`, keeping regular files that match a
/// supported suffix and pass the content sniff. Sorted by path.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| ViewerError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .map(|n| has_supported_suffix(&n.to_string_lossy()))
                .unwrap_or(false)
        })
        .filter(|p| looks_like_image(p))
        .collect();

    files.sort();
    Ok(files)
}
