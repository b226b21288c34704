use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::files::{has_supported_suffix, list_images, looks_like_image, resolve_path};

/// Called with the entry count after every rescan. Holds a handle to
/// whoever needs to redraw, never the view state itself.
pub type ScanNotifier = Box<dyn Fn(usize)>;

// ---------------------------------------------------------------------------
// Image catalog
// ---------------------------------------------------------------------------

/// Ordered list of browsable images for the active directory (or a single
/// pinned file) plus the navigation cursor.
pub struct ImageCatalog {
    entries: Vec<PathBuf>,
    /// Signed so that `prev` can step below zero; `current()` folds it back.
    index: isize,
    single_file: bool,
    directory: PathBuf,
    /// Base name used to find the cursor again after the next rescan.
    pinned: Option<String>,
    notifier: Option<ScanNotifier>,
}

impl ImageCatalog {
    #[cfg(test)]
    pub fn new(raw_path: &Path) -> Self {
        Self::with_notifier(raw_path, None)
    }

    pub fn with_notifier(raw_path: &Path, notifier: Option<ScanNotifier>) -> Self {
        let mut catalog = Self {
            entries: Vec::new(),
            index: 0,
            single_file: false,
            directory: PathBuf::new(),
            pinned: None,
            notifier,
        };
        catalog.set_path(raw_path);
        catalog
    }

    /// Point the catalog at a new file or directory, discarding the old
    /// listing and cursor.
    pub fn set_path(&mut self, raw_path: &Path) {
        let resolved = resolve_path(raw_path);
        log::debug!("active dir: {}", resolved.directory.display());

        self.directory = resolved.directory;
        self.index = 0;

        match resolved.file {
            Some(name) => {
                let path = self.directory.join(&name);
                self.single_file = true;
                self.entries.clear();
                if has_supported_suffix(&name) && looks_like_image(&path) {
                    self.entries.push(path);
                } else {
                    log::warn!("{} is not a supported image", path.display());
                }
                self.pinned = Some(name);
                self.notify();
            }
            None => {
                self.single_file = false;
                self.pinned = None;
                self.scan();
            }
        }
    }

    /// Rebuild the listing from `directory`. Does nothing in single-file mode.
    pub fn scan(&mut self) {
        if self.single_file {
            return;
        }

        let listed = match list_images(&self.directory) {
            Ok(files) => files,
            Err(e) => {
                log::warn!("scan failed, treating as empty: {}", e);
                Vec::new()
            }
        };

        self.entries.clear();
        let mut seen = HashSet::new();
        for path in listed {
            if seen.insert(path.clone()) {
                self.entries.push(path);
            }
        }

        if let Some(name) = self.pinned.take() {
            let found = self.entries.iter().position(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy() == name.as_str())
                    .unwrap_or(false)
            });
            if let Some(pos) = found {
                self.index = pos as isize;
            }
        }
        self.clamp_index();

        log::info!(
            "scanned {}: {} images",
            self.directory.display(),
            self.entries.len()
        );
        self.notify();
    }

    fn notify(&self) {
        if let Some(ref notify) = self.notifier {
            notify(self.entries.len());
        }
    }

    /// Out of range folds to the nearest end: past the end becomes 0, below
    /// zero becomes the last slot. This is not modulo arithmetic.
    fn clamp_index(&mut self) {
        let count = self.entries.len() as isize;
        if count == 0 {
            self.index = 0;
        } else if self.index >= count {
            self.index = 0;
        } else if self.index < 0 {
            self.index = count - 1;
        }
    }

    pub fn current(&mut self) -> Option<PathBuf> {
        self.clamp_index();
        self.entries.get(self.index as usize).cloned()
    }

    /// Step forward `n` slots. Overshooting the end by any amount lands on
    /// the first entry.
    pub fn next(&mut self, n: usize) -> Option<PathBuf> {
        self.index += n as isize;
        self.current()
    }

    /// Step back `n` slots. Undershooting the start lands on the last entry.
    pub fn prev(&mut self, n: usize) -> Option<PathBuf> {
        self.index -= n as isize;
        self.current()
    }

    pub fn exit_single_file_mode(&mut self) {
        if !self.single_file {
            return;
        }
        log::debug!("leaving single-file mode");
        self.single_file = false;
        self.scan();
    }

    /// Drop the first entry equal to `path`. The cursor is left alone and is
    /// corrected by the next `current()`.
    pub fn remove(&mut self, path: &Path) -> Option<PathBuf> {
        let pos = self.entries.iter().position(|p| p == path)?;
        Some(self.entries.remove(pos))
    }

    /// 1-based position and total. `(0, 0)` means there is nothing to show.
    pub fn location_label(&mut self) -> (usize, usize) {
        self.clamp_index();
        if self.entries.is_empty() {
            (0, 0)
        } else {
            (self.index as usize + 1, self.entries.len())
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_single_file(&self) -> bool {
        self.single_file
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}
