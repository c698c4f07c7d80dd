//! macOS keychain backend.
//!
//! Shells out to the `security` command line tool rather than linking
//! the Security framework, so the crate builds everywhere and only
//! this backend is platform-bound at runtime.

use std::process::{Command, Output};

use super::{CredentialError, CredentialManager, SecureString};

/// Service tag under which all gantry passwords are filed.
const SERVICE_NAME: &str = "gantry";

/// Password storage in the user's login keychain via `security(1)`.
pub struct KeychainCredentialManager {
    service: String,
}

impl KeychainCredentialManager {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Uses a custom service tag, letting tests stay clear of real
    /// gantry entries.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn security(&self, args: &[&str]) -> Result<Output, CredentialError> {
        Command::new("security")
            .args(args)
            .output()
            .map_err(|e| CredentialError::new(format!("failed to run the security tool: {e}")))
    }
}

impl Default for KeychainCredentialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialManager for KeychainCredentialManager {
    fn get_password(&self, account: &str) -> Result<Option<SecureString>, CredentialError> {
        tracing::debug!("Looking up keychain password for '{}'", account);
        let output = self.security(&[
            "find-generic-password",
            "-a",
            account,
            "-s",
            &self.service,
            "-w",
        ])?;

        // find-generic-password exits non-zero when no item matches
        if !output.status.success() {
            return Ok(None);
        }

        let password = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(SecureString::new(password)))
    }

    fn set_password(&self, account: &str, password: &SecureString) -> Result<(), CredentialError> {
        tracing::debug!("Storing keychain password for '{}'", account);
        let output = self.security(&[
            "add-generic-password",
            "-a",
            account,
            "-s",
            &self.service,
            "-w",
            password.expose(),
        ])?;

        if !output.status.success() {
            return Err(command_error("store", account, &output));
        }
        Ok(())
    }

    fn del_password(&self, account: &str) -> Result<(), CredentialError> {
        tracing::debug!("Deleting keychain password for '{}'", account);
        let output = self.security(&[
            "delete-generic-password",
            "-a",
            account,
            "-s",
            &self.service,
        ])?;

        if !output.status.success() {
            return Err(command_error("delete", account, &output));
        }
        Ok(())
    }
}

fn command_error(action: &str, account: &str, output: &Output) -> CredentialError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        CredentialError::new(format!("failed to {action} the password for '{account}'"))
    } else {
        CredentialError::new(format!(
            "failed to {action} the password for '{account}': {stderr}"
        ))
    }
}
