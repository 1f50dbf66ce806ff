//! memfile - In-memory staging for file content
//!
//! Files are selected by path into a [`FileRegistry`], read and written
//! through a cursor while held in memory, and persisted only when saved.
//! Paths may contain `${NAME}` tokens, expanded by an [`EnvResolver`].

pub mod config;
pub mod encoding;
pub mod env;
pub mod fs;
pub mod logging;

pub use config::Config;
pub use encoding::ContentEncoding;
pub use env::EnvResolver;
pub use fs::{
    BufferedFile, DiskRemoval, FileRegistry, FileSummary, MemFileError, Mode, OpenStatus,
    RegistryOptions, RemoveOutcome, Result,
};
