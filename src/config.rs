//! Configuration
//!
//! Optional TOML file read by the command-line front end:
//!
//! ```toml
//! save_dir = "out"
//!
//! [env]
//! MY_PATH = "/virtual/files"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::fs::{MemFileError, RegistryOptions, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory staged files are saved into
    #[serde(default)]
    pub save_dir: Option<PathBuf>,
    /// Path variable overrides
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Fall back to the process environment for unknown variables
    #[serde(default = "default_true")]
    pub use_process_env: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self { save_dir: None, env: HashMap::new(), use_process_env: true }
    }
}

impl Config {
    pub fn from_toml(text: &str, origin: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MemFileError::Config {
            path: origin.to_string(),
            message: e.message().to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| MemFileError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text, &path.display().to_string())
    }

    /// Apply `KEY=VALUE` overrides on top of the file's `[env]` table.
    pub fn with_env_overrides<'a>(mut self, pairs: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        for pair in pairs {
            let (name, value) = pair.split_once('=').ok_or_else(|| MemFileError::Config {
                path: "--env".to_string(),
                message: format!("expected KEY=VALUE, got '{}'", pair),
            })?;
            self.env.insert(name.to_string(), value.to_string());
        }
        Ok(self)
    }

    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            env: Some(self.env.clone()),
            use_process_env: self.use_process_env,
        }
    }

    /// The configured save directory, or the current directory.
    pub fn save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let config = Config::from_toml(
            "save_dir = \"out\"\nuse_process_env = false\n\n[env]\nMY_PATH = \"/virtual/files\"\n",
            "memfile.toml",
        )
        .unwrap();
        assert_eq!(config.save_dir(), PathBuf::from("out"));
        assert!(!config.use_process_env);
        assert_eq!(config.env.get("MY_PATH").map(String::as_str), Some("/virtual/files"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("", "memfile.toml").unwrap();
        assert_eq!(config.save_dir(), PathBuf::from("."));
        assert!(config.use_process_env);
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_toml("bogus = 1\n", "memfile.toml").unwrap_err();
        assert!(matches!(err, MemFileError::Config { .. }));
    }

    #[test]
    fn test_env_overrides_win() {
        let config = Config::from_toml("[env]\nA = \"file\"\n", "memfile.toml")
            .unwrap()
            .with_env_overrides(["A=cli", "B=x=y"])
            .unwrap();
        assert_eq!(config.env["A"], "cli");
        assert_eq!(config.env["B"], "x=y");
        assert!(Config::default().with_env_overrides(["novalue"]).is_err());
    }

    #[test]
    fn test_registry_resolves_config_env() {
        let config = Config::from_toml("use_process_env = false\n[env]\nROOT = \"/data\"\n", "memfile.toml").unwrap();
        let registry = crate::fs::FileRegistry::new(config.registry_options());
        assert_eq!(registry.resolve("${ROOT}/${HOME}x"), "/data/x");
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("memfile.toml");
        std::fs::write(&path, "save_dir = \"/tmp/staged\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.save_dir(), PathBuf::from("/tmp/staged"));

        assert!(Config::load(&temp.path().join("absent.toml")).is_err());
    }
}
