//! Buffered File
//!
//! A cursor-addressable byte buffer standing in for an on-disk file
//! until it is explicitly saved.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::types::*;

/// In-memory file content with a cursor and a fixed access mode.
#[derive(Debug, Clone)]
pub struct BufferedFile {
    path: String,
    content: Vec<u8>,
    cursor: usize,
    mode: Mode,
    status: OpenStatus,
}

impl BufferedFile {
    /// Open `path` in `mode`.
    ///
    /// Read and Append load whatever is on disk; a missing or unreadable
    /// file yields an empty buffer and is reported through [`OpenStatus`].
    /// Write always starts empty.
    pub fn open(path: impl Into<String>, mode: Mode) -> Self {
        let path = path.into();
        let (content, status) = match mode {
            Mode::Write => (Vec::new(), OpenStatus::Created),
            Mode::Read | Mode::Append => match std::fs::read(&path) {
                Ok(bytes) => {
                    let status = OpenStatus::Loaded { bytes: bytes.len() };
                    (bytes, status)
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => (Vec::new(), OpenStatus::Missing),
                Err(e) => {
                    warn!(path = %path, error = %e, "cannot read file, starting empty");
                    (Vec::new(), OpenStatus::Unreadable { kind: e.kind() })
                }
            },
        };
        let cursor = if mode == Mode::Append { content.len() } else { 0 };
        Self { path, content, cursor, mode, status }
    }

    /// Build a buffer in `mode` from the file at `source`, labelled
    /// `logical_path`, with the cursor at 0.
    pub fn from_source(source: impl AsRef<Path>, logical_path: impl Into<String>, mode: Mode) -> Result<Self> {
        let mut file = Self {
            path: String::new(),
            content: Vec::new(),
            cursor: 0,
            mode,
            status: OpenStatus::Created,
        };
        file.load(source, logical_path)?;
        Ok(file)
    }

    /// Copy bytes at the cursor into `buf`, advancing the cursor.
    ///
    /// Returns 0 in Write mode or when the cursor is at or past the end.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        if !self.mode.can_read() {
            return 0;
        }
        let available = self.content.len().saturating_sub(self.cursor);
        let n = buf.len().min(available);
        if n == 0 {
            return 0;
        }
        buf[..n].copy_from_slice(&self.content[self.cursor..self.cursor + n]);
        self.cursor += n;
        n
    }

    /// Read up to `max` bytes into a new vector.
    pub fn read_bytes(&mut self, max: usize) -> Vec<u8> {
        let available = self.content.len().saturating_sub(self.cursor);
        let mut buf = vec![0u8; max.min(available)];
        let n = self.read(&mut buf);
        buf.truncate(n);
        buf
    }

    /// Write `data` at the cursor, zero-filling any gap past the end.
    ///
    /// Returns the number of bytes written, which is 0 in Read mode or
    /// when the cursor is too large to hold `data`.
    pub fn write(&mut self, data: &[u8]) -> usize {
        if !self.mode.can_write() {
            return 0;
        }
        let Some(end) = self.cursor.checked_add(data.len()) else {
            return 0;
        };
        if end > self.content.len() {
            self.content.resize(end, 0);
        }
        self.content[self.cursor..end].copy_from_slice(data);
        self.cursor = end;
        data.len()
    }

    /// Move the cursor. No bounds check against the content length.
    pub fn seek(&mut self, offset: usize) {
        self.cursor = offset;
    }

    pub fn tell(&self) -> usize {
        self.cursor
    }

    /// Write the whole buffer to `dir/<base name of path>`, replacing any
    /// existing file. `dir` must already exist.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let name = Path::new(&self.path)
            .file_name()
            .ok_or_else(|| MemFileError::InvalidPath {
                path: self.path.clone(),
                operation: "save".to_string(),
            })?;
        let target = dir.as_ref().join(name);
        std::fs::write(&target, &self.content).map_err(|source| MemFileError::Save {
            path: target.display().to_string(),
            source,
        })?;
        debug!(path = %self.path, target = %target.display(), bytes = self.content.len(), "saved");
        Ok(target)
    }

    /// Replace the content with the file at `source`, rewind, and relabel
    /// this buffer as `logical_path`. The mode is kept.
    pub fn load(&mut self, source: impl AsRef<Path>, logical_path: impl Into<String>) -> Result<()> {
        let source = source.as_ref();
        let bytes = std::fs::read(source).map_err(|e| MemFileError::Load {
            path: source.display().to_string(),
            source: e,
        })?;
        self.status = OpenStatus::Loaded { bytes: bytes.len() };
        self.content = bytes;
        self.cursor = 0;
        self.path = logical_path.into();
        debug!(source = %source.display(), path = %self.path, bytes = self.content.len(), "loaded");
        Ok(())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> OpenStatus {
        self.status
    }

    /// Directory holding the file at this path, `.` for a bare name.
    pub fn parent_dir(&self) -> PathBuf {
        match Path::new(&self.path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// The whole buffer, independent of the cursor.
    pub fn contents(&self) -> &[u8] {
        &self.content
    }
}
