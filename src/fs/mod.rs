//! File Staging Module
//!
//! In-memory buffers for files that are read and written in memory and
//! persisted only on request:
//! - BufferedFile: cursor-addressable byte buffer with a fixed mode
//! - FileRegistry: keyed collection of staged buffers
//! - dir: directory pass-through to the host filesystem

pub mod types;
pub mod buffered_file;
pub mod registry;
pub mod dir;

pub use types::*;
pub use buffered_file::BufferedFile;
pub use registry::{FileRegistry, RegistryOptions};
