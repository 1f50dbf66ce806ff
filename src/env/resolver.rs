//! `${NAME}` expansion for staged file paths.

use std::collections::HashMap;

use regex_lite::Regex;

lazy_static::lazy_static! {
    static ref VAR_TOKEN: Regex = Regex::new(r"\$\{([^}]*)\}").unwrap();
}

/// Variable overrides consulted before the process environment.
#[derive(Debug, Clone)]
pub struct EnvResolver {
    overrides: HashMap<String, String>,
    use_process_env: bool,
}

impl EnvResolver {
    /// Create a resolver with no overrides that falls back to the process environment.
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
            use_process_env: true,
        }
    }

    /// Create a resolver seeded with `overrides`.
    pub fn with_overrides(overrides: HashMap<String, String>, use_process_env: bool) -> Self {
        Self { overrides, use_process_env }
    }

    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.overrides.insert(name.into(), value.into());
    }

    pub fn remove_var(&mut self, name: &str) -> Option<String> {
        self.overrides.remove(name)
    }

    /// Look up `name`: overrides first, then the process environment.
    /// Unknown variables resolve to the empty string.
    pub fn get_var(&self, name: &str) -> String {
        if let Some(value) = self.overrides.get(name) {
            return value.clone();
        }
        if self.use_process_env {
            if let Ok(value) = std::env::var(name) {
                return value;
            }
        }
        String::new()
    }

    pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every `${NAME}` token in `path`.
    ///
    /// Tokens are matched left to right without overlap. An unterminated
    /// `${` and everything after it is copied through untouched.
    /// Substituted values are not expanded again.
    pub fn resolve(&self, path: &str) -> String {
        VAR_TOKEN
            .replace_all(path, |caps: &regex_lite::Captures| self.get_var(&caps[1]))
            .into_owned()
    }
}

impl Default for EnvResolver {
    fn default() -> Self {
        Self::new()
    }
}
