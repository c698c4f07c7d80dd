//! In-memory credential backend.
//!
//! Used by the test suite and for scripted setups where no OS keychain
//! is available. Unlike the keychain backend it is strict about
//! deletes: removing an account that holds no password is an error, so
//! mis-sequenced operations surface instead of passing silently.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{CredentialError, CredentialManager, SecureString};

/// Holds passwords in process memory.
///
/// Clones share the same underlying map, so a test can keep a handle
/// for assertions while the registry owns another.
#[derive(Clone, Default)]
pub struct MemoryCredentialManager {
    entries: Arc<Mutex<HashMap<String, SecureString>>>,
}

impl MemoryCredentialManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialManager for MemoryCredentialManager {
    fn get_password(&self, account: &str) -> Result<Option<SecureString>, CredentialError> {
        Ok(self.entries.lock().get(account).cloned())
    }

    fn set_password(&self, account: &str, password: &SecureString) -> Result<(), CredentialError> {
        self.entries
            .lock()
            .insert(account.to_string(), password.clone());
        Ok(())
    }

    fn del_password(&self, account: &str) -> Result<(), CredentialError> {
        match self.entries.lock().remove(account) {
            Some(_) => Ok(()),
            None => Err(CredentialError::new(format!(
                "no password stored for '{account}'"
            ))),
        }
    }
}
