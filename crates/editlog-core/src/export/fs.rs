//! Filesystem capability used by the exporter

use crate::error::{EditLogError, EditLogResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// The handful of file operations an export needs
#[async_trait]
pub trait DatasetFs: Send + Sync {
    /// Read a UTF-8 file; `Ok(None)` when it does not exist
    async fn read_file(&self, path: &Path) -> EditLogResult<Option<String>>;

    /// Create or truncate `path` and write `contents`
    async fn write_file(&self, path: &Path, contents: &[u8]) -> EditLogResult<()>;

    /// Create `path` and all of its parents
    async fn ensure_dir(&self, path: &Path) -> EditLogResult<()>;

    async fn exists(&self, path: &Path) -> bool;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatasetFs for LocalFs {
    async fn read_file(&self, path: &Path) -> EditLogResult<Option<String>> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EditLogError::file_operation(
                path,
                format!("failed to read: {}", e),
            )),
        }
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> EditLogResult<()> {
        fs::write(path, contents)
            .await
            .map_err(|e| EditLogError::file_operation(path, format!("failed to write: {}", e)))
    }

    async fn ensure_dir(&self, path: &Path) -> EditLogResult<()> {
        fs::create_dir_all(path).await.map_err(|e| {
            EditLogError::file_operation(path, format!("failed to create directory: {}", e))
        })
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }
}

#[derive(Debug, Default)]
struct MemoryFsState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    fail_writes: bool,
}

/// In-memory filesystem
///
/// Writes require the parent directory to have been created with
/// [`ensure_dir`](DatasetFs::ensure_dir), like a real filesystem.
#[derive(Debug, Default)]
pub struct MemoryFs {
    state: Mutex<MemoryFsState>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let mut state = self.state.lock();
        if let Some(parent) = path.parent() {
            add_dir_chain(&mut state.dirs, parent);
        }
        state.files.insert(path, content.into().into_bytes());
    }

    /// Content of a file as text
    pub fn get(&self, path: &Path) -> Option<String> {
        self.state
            .lock()
            .files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// All file paths, sorted
    pub fn files(&self) -> Vec<PathBuf> {
        self.state.lock().files.keys().cloned().collect()
    }

    /// Make every subsequent write fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }
}

fn add_dir_chain(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        dirs.insert(ancestor.to_path_buf());
    }
}

#[async_trait]
impl DatasetFs for MemoryFs {
    async fn read_file(&self, path: &Path) -> EditLogResult<Option<String>> {
        Ok(self.get(path))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> EditLogResult<()> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(EditLogError::file_operation(path, "write rejected"));
        }

        let parent_exists = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => state.dirs.contains(parent),
            _ => true,
        };
        if !parent_exists {
            return Err(EditLogError::file_operation(
                path,
                "parent directory does not exist",
            ));
        }

        state.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    async fn ensure_dir(&self, path: &Path) -> EditLogResult<()> {
        add_dir_chain(&mut self.state.lock().dirs, path);
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock();
        state.files.contains_key(path) || state.dirs.contains(path)
    }
}
