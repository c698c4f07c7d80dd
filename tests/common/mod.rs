//! Shared fixtures for the command tests.

#![allow(dead_code, unused_imports)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use gantry::config::{Config, Environment, User};
use gantry::credentials::{
    CredentialError, CredentialManager, CredentialManagerRegistry, MemoryCredentialManager,
    SecureString,
};
use gantry::prompt::PasswordPrompt;

/// Registry with two independent in-memory backends, plus handles for
/// assertions.
pub fn test_registry() -> (
    CredentialManagerRegistry,
    MemoryCredentialManager,
    MemoryCredentialManager,
) {
    let primary = MemoryCredentialManager::new();
    let secondary = MemoryCredentialManager::new();

    let mut registry = CredentialManagerRegistry::new();
    registry.register("primary", primary.clone());
    registry.register("secondary", secondary.clone());
    (registry, primary, secondary)
}

/// Prompt that always answers with the same password.
pub struct CannedPrompt {
    password: &'static str,
    calls: AtomicUsize,
}

impl CannedPrompt {
    pub fn new(password: &'static str) -> Self {
        Self {
            password,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times a password was requested.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PasswordPrompt for CannedPrompt {
    fn read_password(&self, _prompt: &str) -> io::Result<SecureString> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SecureString::new(self.password))
    }
}

/// Backend that rejects every write, for failure-path tests.
pub struct FailingCredentialManager;

impl CredentialManager for FailingCredentialManager {
    fn get_password(&self, _account: &str) -> Result<Option<SecureString>, CredentialError> {
        Ok(None)
    }

    fn set_password(
        &self,
        _account: &str,
        _password: &SecureString,
    ) -> Result<(), CredentialError> {
        Err(CredentialError::new("backend unavailable"))
    }

    fn del_password(&self, _account: &str) -> Result<(), CredentialError> {
        Err(CredentialError::new("backend unavailable"))
    }
}

/// Environment record builder.
pub fn environment(url: &str, user: Option<&str>) -> Environment {
    Environment {
        url: url.to_string(),
        user: user.map(str::to_string),
    }
}

/// User record builder.
pub fn user(backend: &str) -> User {
    User {
        credentials_manager: backend.to_string(),
    }
}

/// Config pre-seeded with environments and users, nothing selected.
pub fn config_with(envs: &[(&str, Environment)], users: &[(&str, User)]) -> Config {
    let mut config = Config::default();
    for (name, env) in envs {
        config.envs.insert(name.to_string(), env.clone());
    }
    for (name, user) in users {
        config.users.insert(name.to_string(), user.clone());
    }
    config
}
