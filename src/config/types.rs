use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root configuration container, persisted as JSON.
///
/// Both maps keep insertion order so listings are stable across
/// load/save cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name of the currently selected environment, if any. When set it
    /// must match a key of `envs`.
    #[serde(default)]
    pub current: Option<String>,
    /// Known service environments, keyed by name.
    #[serde(default)]
    pub envs: IndexMap<String, Environment>,
    /// Known login identities, keyed by name.
    #[serde(default)]
    pub users: IndexMap<String, User>,
}

/// One deployment of the imaging service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Base URL of the service API.
    pub url: String,
    /// User to authenticate with, if one is associated. When set it
    /// must match a key of `Config::users`.
    #[serde(default)]
    pub user: Option<String>,
}

/// A login identity.
///
/// Only the id of the credential backend is recorded here; the
/// password itself lives in that backend, never in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Id of the credential backend holding this user's password.
    pub credentials_manager: String,
}

impl Config {
    /// True if at least one environment is configured.
    pub fn envs_added(&self) -> bool {
        !self.envs.is_empty()
    }

    /// True if an environment is currently selected.
    pub fn env_selected(&self) -> bool {
        self.current.is_some()
    }

    /// True if an environment with this name exists.
    pub fn env_exists(&self, name: &str) -> bool {
        self.envs.contains_key(name)
    }

    /// True if at least one user is configured.
    pub fn users_added(&self) -> bool {
        !self.users.is_empty()
    }

    /// True if a user with this name exists.
    pub fn user_exists(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    /// Environment names in insertion order.
    pub fn env_names(&self) -> Vec<String> {
        self.envs.keys().cloned().collect()
    }

    /// User names in insertion order.
    pub fn user_names(&self) -> Vec<String> {
        self.users.keys().cloned().collect()
    }
}
