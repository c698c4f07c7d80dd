//! Credential backends.
//!
//! Passwords live in an external credential store (the OS keychain in
//! production, process memory in tests); the config file only records
//! which backend holds them. Backends are looked up by id through the
//! [`CredentialManagerRegistry`].

use std::collections::BTreeMap;

use thiserror::Error;

pub mod keychain;
pub mod memory;

pub use keychain::KeychainCredentialManager;
pub use memory::MemoryCredentialManager;

/// Id of the OS-keychain backend.
pub const KEYCHAIN_ID: &str = "keychain";

/// Backend ids selectable from the command line.
pub const BUILTIN_BACKEND_IDS: &[&str] = &[KEYCHAIN_ID];

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually handing the secret to a
    /// backend or an API.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Failure talking to a credential backend.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CredentialError {
    message: String,
}

impl CredentialError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A store holding one password per account name.
pub trait CredentialManager {
    /// Look up the password for `account`. Absence is not an error.
    fn get_password(&self, account: &str) -> Result<Option<SecureString>, CredentialError>;

    /// Store the password for `account`.
    fn set_password(&self, account: &str, password: &SecureString) -> Result<(), CredentialError>;

    /// Remove the password for `account`.
    fn del_password(&self, account: &str) -> Result<(), CredentialError>;

    /// True if a password is stored for `account`.
    fn password_exists(&self, account: &str) -> Result<bool, CredentialError> {
        Ok(self.get_password(account)?.is_some())
    }
}

/// Credential backends known to this build, keyed by id.
pub struct CredentialManagerRegistry {
    managers: BTreeMap<String, Box<dyn CredentialManager>>,
}

impl CredentialManagerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            managers: BTreeMap::new(),
        }
    }

    /// Registry with every built-in backend registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(KEYCHAIN_ID, KeychainCredentialManager::new());
        registry
    }

    /// Register `manager` under `id`, replacing any previous entry.
    pub fn register(&mut self, id: impl Into<String>, manager: impl CredentialManager + 'static) {
        self.managers.insert(id.into(), Box::new(manager));
    }

    /// Look up a backend by id.
    ///
    /// Ids are validated where they enter the system (command line
    /// parsing, config write paths), so an unknown id here is a bug in
    /// the caller, not a user error.
    pub fn get(&self, id: &str) -> &dyn CredentialManager {
        match self.managers.get(id) {
            Some(manager) => manager.as_ref(),
            None => panic!("credential manager '{id}' is not registered"),
        }
    }

    /// True if a backend with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.managers.contains_key(id)
    }

    /// Registered backend ids, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.managers.keys().map(String::as_str).collect()
    }
}

impl Default for CredentialManagerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
