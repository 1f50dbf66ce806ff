//! File Registry
//!
//! Keyed collection of live buffered files. Keys are paths after
//! `${NAME}` expansion.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::buffered_file::BufferedFile;
use super::dir;
use super::types::*;
use crate::env::EnvResolver;

/// Options for creating a FileRegistry.
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Variable overrides for path expansion
    pub env: Option<HashMap<String, String>>,
    /// Fall back to the process environment for unknown variables
    pub use_process_env: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self { env: None, use_process_env: true }
    }
}

/// Owner of every staged [`BufferedFile`].
///
/// Content lives only in memory until [`BufferedFile::save`] is called.
/// Re-selecting a path, removing it, or dropping the registry discards
/// unsaved edits. There is no size limit; `total_bytes` reports usage.
///
/// Not internally synchronized: share it across threads behind a single
/// `Mutex`.
#[derive(Debug, Default)]
pub struct FileRegistry {
    files: IndexMap<String, BufferedFile>,
    env: EnvResolver,
}

impl FileRegistry {
    pub fn new(options: RegistryOptions) -> Self {
        let env = EnvResolver::with_overrides(options.env.unwrap_or_default(), options.use_process_env);
        Self::with_env(env)
    }

    pub fn with_env(env: EnvResolver) -> Self {
        Self { files: IndexMap::new(), env }
    }

    pub fn env(&self) -> &EnvResolver {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut EnvResolver {
        &mut self.env
    }

    /// Expand variables in `path` the same way every registry operation does.
    pub fn resolve(&self, path: &str) -> String {
        self.env.resolve(path)
    }

    /// Open `path` in `mode` and stage it, replacing any existing entry.
    pub fn select(&mut self, path: &str, mode: Mode) -> OpenStatus {
        let resolved = self.resolve(path);
        let file = BufferedFile::open(resolved.clone(), mode);
        let status = file.status();
        if let Some(previous) = self.files.insert(resolved.clone(), file) {
            debug!(path = %resolved, discarded_bytes = previous.size(), "replaced staged file");
        }
        debug!(path = %resolved, %mode, ?status, "selected");
        status
    }

    /// Stage `logical_path` with the content of `source`, replacing any
    /// existing entry.
    pub fn load(&mut self, source: impl AsRef<Path>, logical_path: &str, mode: Mode) -> Result<&mut BufferedFile> {
        let resolved = self.resolve(logical_path);
        let file = BufferedFile::from_source(source, resolved.clone(), mode)?;
        let (index, previous) = self.files.insert_full(resolved, file);
        if let Some(previous) = previous {
            debug!(path = %previous.path(), discarded_bytes = previous.size(), "replaced staged file");
        }
        Ok(&mut self.files[index])
    }

    pub fn get(&self, path: &str) -> Result<&BufferedFile> {
        let resolved = self.resolve(path);
        self.files.get(&resolved).ok_or(MemFileError::NotFound { path: resolved })
    }

    pub fn get_mut(&mut self, path: &str) -> Result<&mut BufferedFile> {
        let resolved = self.resolve(path);
        self.files.get_mut(&resolved).ok_or(MemFileError::NotFound { path: resolved })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(&self.resolve(path))
    }

    /// Save the entry at `path` into `dir`.
    pub fn save(&self, path: &str, dir: impl AsRef<Path>) -> Result<PathBuf> {
        self.get(path)?.save(dir)
    }

    /// Drop the entry at `path` and delete the file at that path on disk.
    ///
    /// Absent entries are a no-op. Deletion failures are reported in the
    /// outcome, never as an error.
    pub fn remove(&mut self, path: &str) -> RemoveOutcome {
        let resolved = self.resolve(path);
        if self.files.shift_remove(&resolved).is_none() {
            return RemoveOutcome { was_staged: false, disk: DiskRemoval::Skipped };
        }
        let disk = match std::fs::remove_file(&resolved) {
            Ok(()) => DiskRemoval::Deleted,
            Err(e) if e.kind() == io::ErrorKind::NotFound => DiskRemoval::NotPresent,
            Err(e) => {
                warn!(path = %resolved, error = %e, "staged file removed but on-disk copy remains");
                DiskRemoval::Failed { kind: e.kind() }
            }
        };
        debug!(path = %resolved, ?disk, "removed");
        RemoveOutcome { was_staged: true, disk }
    }

    /// Every staged file with its size, in insertion order.
    pub fn list(&self) -> Vec<FileSummary> {
        self.files
            .iter()
            .map(|(path, file)| FileSummary { path: path.clone(), size: file.size() })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Bytes held across all staged buffers.
    pub fn total_bytes(&self) -> usize {
        self.files.values().map(BufferedFile::size).sum()
    }

    // Directory pass-through, with variable expansion on the path.

    pub fn create_directory(&self, path: &str) -> Result<bool> {
        dir::create_directory(self.resolve(path))
    }

    pub fn list_directory(&self, path: &str) -> Result<Vec<PathBuf>> {
        dir::list_directory(self.resolve(path))
    }

    pub fn remove_directory(&self, path: &str) -> Result<()> {
        dir::remove_directory(self.resolve(path))
    }
}
