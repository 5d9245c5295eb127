//! Atomic I/O operations with file locking

use crate::{Error, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Who may read a file written by this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    /// Default permissions for new files (subject to umask).
    Shared,
    /// Owner read/write only (`0600`) on Unix.
    Private,
}

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    write_atomic_as(path, content, Visibility::Shared)
}

/// Like [`write_atomic`], but the resulting file is readable by its owner only.
pub fn write_atomic_private(path: &Path, content: &[u8]) -> Result<()> {
    write_atomic_as(path, content, Visibility::Private)
}

fn write_atomic_as(path: &Path, content: &[u8], visibility: Visibility) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = unique_temp_path(path);
    let mut temp_file = open_options(visibility)
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let synced = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all());
    drop(temp_file);

    let written = synced
        .map_err(|e| Error::io(&temp_path, e))
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));
    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}

/// `.<name>.<pid>.<counter>.tmp`, distinct for every write in every process.
fn unique_temp_path(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    path.with_file_name(temp_name)
}

fn open_options(visibility: Visibility) -> OpenOptions {
    #[allow(unused_mut)]
    let mut options = OpenOptions::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        if visibility == Visibility::Private {
            options.mode(0o600);
        }
    }
    #[cfg(not(unix))]
    let _ = visibility;
    options
}

/// An exclusive advisory lock on a sidecar file, released on drop.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Block until the lock at `path` is held. Creates the file if needed.
    pub fn exclusive(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let file = open_options(Visibility::Private)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| Error::io(path, e))?;
        file.lock_exclusive().map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
