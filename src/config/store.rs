//! Config persistence and transactional updates.
//!
//! The store reads the whole document for every operation and writes
//! it back only when an update closure succeeds. Saves go through a
//! sibling temp file and a rename, so an interrupted write never
//! truncates the existing config. There is no cross-process locking;
//! concurrent writers are last-save-wins.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

use crate::config::types::Config;

/// Errors raised while reading or writing the config document.
///
/// These are infrastructure failures, not user mistakes, and the CLI
/// reports them as fatal rather than as domain errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode config: {0}")]
    EncodeError(#[from] serde_json::Error),
}

enum Backing {
    /// JSON document on disk.
    File(PathBuf),
    /// Process-local document, for tests and embedding.
    Memory(Mutex<Config>),
}

/// Loads and saves the configuration document.
pub struct ConfigStore {
    backing: Backing,
}

impl ConfigStore {
    /// Store backed by the file at `path`.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            backing: Backing::File(path),
        }
    }

    /// Store backed by process memory, starting from `config`.
    pub fn in_memory(config: Config) -> Self {
        Self {
            backing: Backing::Memory(Mutex::new(config)),
        }
    }

    /// Returns the path to the default configuration file.
    ///
    /// Uses `~/.config/gantry/config.json` on Unix/macOS, or the
    /// equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to the current directory if config_dir is unavailable.
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("gantry").join("config.json")
    }

    /// Resolves the config file location.
    ///
    /// Precedence: an explicit path (the `--config` flag), then the
    /// `GANTRY_CONFIG` environment variable, then the default path.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let path = explicit
            .or_else(|| std::env::var_os("GANTRY_CONFIG").map(PathBuf::from))
            .unwrap_or_else(Self::default_path);
        Self::with_path(path)
    }

    /// The backing file path, if file-backed.
    pub fn path(&self) -> Option<&Path> {
        match &self.backing {
            Backing::File(path) => Some(path),
            Backing::Memory(_) => None,
        }
    }

    /// Loads the current config.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load(&self) -> Result<Config, StoreError> {
        match &self.backing {
            Backing::File(path) => load_file(path),
            Backing::Memory(slot) => Ok(slot.lock().clone()),
        }
    }

    /// Persists `config`.
    pub fn save(&self, config: &Config) -> Result<(), StoreError> {
        match &self.backing {
            Backing::File(path) => save_file(path, config),
            Backing::Memory(slot) => {
                *slot.lock() = config.clone();
                Ok(())
            }
        }
    }

    /// Runs `apply` against the loaded config and saves the result.
    ///
    /// The save happens only when `apply` returns `Ok`; on error the
    /// stored document is left untouched. Side effects the closure
    /// performed elsewhere (e.g. against a credential backend) are not
    /// rolled back.
    pub fn transaction<T, E>(
        &self,
        apply: impl FnOnce(&mut Config) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut config = self.load()?;
        let value = apply(&mut config)?;
        self.save(&config)?;
        Ok(value)
    }
}

fn load_file(path: &Path) -> Result<Config, StoreError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&content).map_err(|e| StoreError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!("Loaded config from '{}'", path.display());
    Ok(config)
}

fn save_file(path: &Path, config: &Config) -> Result<(), StoreError> {
    let write_error = |source| StoreError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(config)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
    }

    let tmp = path.with_extension("json.tmp");
    {
        let mut file = File::create(&tmp).map_err(write_error)?;
        file.write_all(json.as_bytes()).map_err(write_error)?;
        file.sync_all().map_err(write_error)?;
    }
    fs::rename(&tmp, path).map_err(write_error)?;

    tracing::debug!("Saved config to '{}'", path.display());
    Ok(())
}
