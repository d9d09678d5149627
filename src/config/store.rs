//! JSON config file at `~/.aicommit/config.json`.

use std::env;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Directory name under the home directory.
const CONFIG_DIR_NAME: &str = ".aicommit";

/// File name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable to override the config directory.
pub const CONFIG_DIR_ENV_VAR: &str = "AICOMMIT_CONFIG_DIR";

/// Stored configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Fields this version does not know about, kept so a rewrite does not drop them.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Config {
    /// The configured credential, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn has_credential(&self) -> bool {
        self.api_key().is_some()
    }
}

/// Reads and writes the config file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the per-user location.
    ///
    /// Uses `AICOMMIT_CONFIG_DIR` when set, otherwise `~/.aicommit`.
    pub fn default_location() -> Result<Self, ConfigError> {
        let dir = match env::var(CONFIG_DIR_ENV_VAR) {
            Ok(v) if !v.is_empty() => PathBuf::from(v),
            _ => dirs::home_dir()
                .ok_or(ConfigError::NoHomeDir)?
                .join(CONFIG_DIR_NAME),
        };
        Ok(Self::new(dir.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored config.
    ///
    /// Never fails: a missing file, missing directory or malformed content
    /// yields an empty config.
    pub fn read(&self) -> Config {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}", self.path.display());
                return Config::default();
            }
            Err(e) => {
                warn!("Failed to read config {}: {}", self.path.display(), e);
                return Config::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", self.path.display(), e);
                Config::default()
            }
        }
    }

    /// Overwrite the config file, creating its directory if needed.
    ///
    /// The content goes to a temp file in the same directory which then
    /// replaces the target, so a failed write never leaves a truncated file.
    pub fn write(&self, config: &Config) -> Result<(), ConfigError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let content = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;

        let write_err = |source: std::io::Error| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!("Wrote config to {}", self.path.display());
        Ok(())
    }

    /// Store a new credential, keeping the rest of the file.
    pub fn set_credential(&self, api_key: &str) -> Result<(), ConfigError> {
        let mut config = self.read();
        config.api_key = Some(api_key.to_string());
        self.write(&config)
    }

    pub fn has_credential(&self) -> bool {
        self.read().has_credential()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("nested").join(CONFIG_FILE_NAME))
    }

    #[test]
    fn test_fresh_store_has_no_credential() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.has_credential());
        assert_eq!(store.read(), Config::default());
    }

    #[test]
    fn test_set_credential_then_has_credential() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set_credential("sk-test-123").unwrap();

        assert!(store.has_credential());
        assert_eq!(store.read().api_key(), Some("sk-test-123"));
    }

    #[test]
    fn test_write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("a/b/c/config.json"));

        store.write(&Config::default()).unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn test_corrupted_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ this is not json").unwrap();

        let store = ConfigStore::new(&path);
        assert_eq!(store.read(), Config::default());
        assert!(!store.has_credential());
    }

    #[test]
    fn test_non_object_json_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert_eq!(ConfigStore::new(&path).read(), Config::default());
    }

    #[test]
    fn test_blank_credential_does_not_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"apiKey": "   "}"#).unwrap();

        assert!(!ConfigStore::new(&path).has_credential());
    }

    #[test]
    fn test_file_uses_api_key_field_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set_credential("sk-abc").unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["apiKey"], "sk-abc");
    }

    #[test]
    fn test_reconfigure_overwrites_and_keeps_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"apiKey": "sk-old", "theme": "dark"}"#).unwrap();

        let store = ConfigStore::new(&path);
        store.set_credential("sk-new").unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["apiKey"], "sk-new");
        assert_eq!(value["theme"], "dark");
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let store = ConfigStore::new(blocker.join(CONFIG_FILE_NAME));
        let result = store.write(&Config::default());
        assert!(matches!(result, Err(ConfigError::CreateDir { .. })));
    }

    #[test]
    #[serial]
    fn test_default_location_honors_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap().to_string();

        temp_env::with_var(CONFIG_DIR_ENV_VAR, Some(&dir_str), || {
            let store = ConfigStore::default_location().unwrap();
            assert_eq!(store.path(), dir.path().join(CONFIG_FILE_NAME));
        });
    }

    #[test]
    #[serial]
    fn test_default_location_under_home() {
        temp_env::with_var_unset(CONFIG_DIR_ENV_VAR, || {
            if let Ok(store) = ConfigStore::default_location() {
                assert!(store.path().ends_with(".aicommit/config.json"));
            }
        });
    }
}
