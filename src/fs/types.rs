//! File Staging Types
//!
//! Core types shared by the buffered file and the registry.

use std::fmt;
use std::io;

use serde::Serialize;
use thiserror::Error;

/// Errors raised by the staging layer.
#[derive(Error, Debug)]
pub enum MemFileError {
    #[error("ENOENT: no such staged file, get '{path}'")]
    NotFound { path: String },

    #[error("EIO: cannot load '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("EIO: cannot save '{path}': {source}")]
    Save {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("EINVAL: invalid argument, {operation} '{path}'")]
    InvalidPath { path: String, operation: String },

    #[error("{operation} '{path}': {source}")]
    Directory {
        path: String,
        operation: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config '{path}': {message}")]
    Config { path: String, message: String },

    #[error("{message}")]
    Encoding { message: String },
}

pub type Result<T> = std::result::Result<T, MemFileError>;

/// Access discipline, fixed when a buffer is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Read,
    Write,
    Append,
}

impl Mode {
    pub fn can_read(self) -> bool {
        matches!(self, Mode::Read | Mode::Append)
    }

    pub fn can_write(self) -> bool {
        matches!(self, Mode::Write | Mode::Append)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Read => write!(f, "read"),
            Mode::Write => write!(f, "write"),
            Mode::Append => write!(f, "append"),
        }
    }
}

/// How a buffer's initial content was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OpenStatus {
    /// Write mode: started empty without touching storage.
    Created,
    /// Existing bytes were read from storage.
    Loaded { bytes: usize },
    /// Nothing on disk; the buffer starts empty.
    Missing,
    /// A file exists but could not be read; the buffer starts empty.
    Unreadable {
        #[serde(skip)]
        kind: io::ErrorKind,
    },
}

/// What `remove` did to the on-disk copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskRemoval {
    Deleted,
    NotPresent,
    /// No entry was staged, so storage was left alone.
    Skipped,
    Failed {
        #[serde(skip)]
        kind: io::ErrorKind,
    },
}

/// Result of removing a path from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemoveOutcome {
    pub was_staged: bool,
    pub disk: DiskRemoval,
}

/// One registry entry as reported by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub size: usize,
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.path, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_permissions() {
        assert!(Mode::Read.can_read());
        assert!(!Mode::Read.can_write());
        assert!(Mode::Write.can_write());
        assert!(!Mode::Write.can_read());
        assert!(Mode::Append.can_read());
        assert!(Mode::Append.can_write());
    }

    #[test]
    fn test_summary_display() {
        let summary = FileSummary { path: "example.bin".to_string(), size: 10 };
        assert_eq!(summary.to_string(), "example.bin (10 bytes)");
    }

    #[test]
    fn test_error_messages() {
        let err = MemFileError::NotFound { path: "/virtual/a.bin".to_string() };
        assert_eq!(err.to_string(), "ENOENT: no such staged file, get '/virtual/a.bin'");

        let err = MemFileError::InvalidPath {
            path: "..".to_string(),
            operation: "save".to_string(),
        };
        assert_eq!(err.to_string(), "EINVAL: invalid argument, save '..'");
    }
}
