//! Environment Module
//!
//! Path variable expansion with caller-supplied overrides.

pub mod resolver;

pub use resolver::EnvResolver;
