//! Service configuration read from the environment.

use std::path::PathBuf;

/// Runtime configuration.
///
/// Env vars:
/// - HOST: bind address (default `0.0.0.0`)
/// - PORT: bind port (default `3000`)
/// - CONTENT_FILE: study material loaded at startup (optional)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub content_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: "3000".to_string(),
            content_file: None,
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults for unset variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT").unwrap_or(defaults.port),
            content_file: lookup("CONTENT_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert!(config.content_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("CONTENT_FILE", "lessons/1.txt"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.content_file, Some(PathBuf::from("lessons/1.txt")));
    }

    #[test]
    fn test_blank_content_file_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[("CONTENT_FILE", "  ")]));
        assert!(config.content_file.is_none());
    }
}
