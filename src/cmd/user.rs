//! `gantry user`: manage login identities and their stored passwords.
//!
//! Secret operations run against the credential backend before the
//! config mutation they belong to, and the transaction saves only on
//! success. A backend failure therefore never leaves the config
//! pointing at a secret that was not written; the one irreducible
//! window is the backend switch, where the old secret is already gone
//! if storing under the new backend fails.

use anyhow::Result;

use crate::config::{ConfigStore, User};
use crate::credentials::CredentialManagerRegistry;
use crate::error::GantryError;
use crate::output::{self, CommandOutput};
use crate::prompt::PasswordPrompt;

use super::ensure_user_known;

/// Register a new user; prompts for and stores their password.
pub fn add(
    store: &ConfigStore,
    registry: &CredentialManagerRegistry,
    prompt: &dyn PasswordPrompt,
    name: &str,
    creds: &str,
) -> Result<CommandOutput> {
    store.transaction(|config| {
        if config.user_exists(name) {
            return Err(GantryError::UserAlreadyExists {
                name: name.to_string(),
            }
            .into());
        }

        // Secret first: if the backend rejects it, no record appears.
        let password = prompt.read_password("Password: ")?;
        registry
            .get(creds)
            .set_password(name, &password)
            .map_err(GantryError::from)?;

        let user = User {
            credentials_manager: creds.to_string(),
        };
        config.users.insert(name.to_string(), user.clone());
        tracing::info!("Added user '{}' with '{}' credentials", name, creds);

        Ok(output::keyed_json(name, user))
    })
}

/// Remove a user, their stored password, and any references from
/// environments.
pub fn del(
    store: &ConfigStore,
    registry: &CredentialManagerRegistry,
    name: &str,
) -> Result<CommandOutput> {
    store.transaction(|config| {
        ensure_user_known(config, name)?;

        let backend = config
            .users
            .get(name)
            .expect("user presence checked")
            .credentials_manager
            .clone();
        registry
            .get(&backend)
            .del_password(name)
            .map_err(GantryError::from)?;

        config.users.shift_remove(name);
        for env in config.envs.values_mut() {
            if env.user.as_deref() == Some(name) {
                env.user = None;
            }
        }
        tracing::info!("Deleted user '{}'", name);

        Ok(CommandOutput::None)
    })
}

/// Change a user's credential backend, or rotate their password.
pub fn set(
    store: &ConfigStore,
    registry: &CredentialManagerRegistry,
    prompt: &dyn PasswordPrompt,
    name: &str,
    creds: Option<&str>,
    passwd: bool,
) -> Result<CommandOutput> {
    store.transaction(|config| {
        ensure_user_known(config, name)?;

        let old_backend = config
            .users
            .get(name)
            .expect("user presence checked")
            .credentials_manager
            .clone();

        if let Some(new_backend) = creds {
            // Prompt before touching the old backend, so an aborted
            // prompt changes nothing.
            let password = prompt.read_password("Password: ")?;
            registry
                .get(&old_backend)
                .del_password(name)
                .map_err(GantryError::from)?;
            registry
                .get(new_backend)
                .set_password(name, &password)
                .map_err(GantryError::from)?;

            config
                .users
                .get_mut(name)
                .expect("user presence checked")
                .credentials_manager = new_backend.to_string();
            tracing::info!(
                "Moved credentials for '{}' from '{}' to '{}'",
                name,
                old_backend,
                new_backend
            );
        } else if passwd {
            let password = prompt.read_password("Password: ")?;
            let manager = registry.get(&old_backend);
            manager.del_password(name).map_err(GantryError::from)?;
            manager
                .set_password(name, &password)
                .map_err(GantryError::from)?;
            tracing::info!("Rotated password for '{}'", name);
        }

        let user = config
            .users
            .get(name)
            .expect("user presence checked")
            .clone();
        Ok(output::keyed_json(name, user))
    })
}

/// Show the user associated with the selected environment.
pub fn current(store: &ConfigStore) -> Result<CommandOutput> {
    let config = store.load()?;

    let Some(current) = config.current.as_deref() else {
        return Ok(CommandOutput::Text(output::MSG_NO_ENV_SELECTED.to_string()));
    };
    let env = config
        .envs
        .get(current)
        .expect("selected environment must exist");

    let message = match &env.user {
        Some(user) => user.clone(),
        None => output::msg_no_user_for_env(current),
    };
    Ok(CommandOutput::Text(message))
}

/// List users in insertion order, marking the one the selected
/// environment authenticates as.
pub fn list(store: &ConfigStore) -> Result<CommandOutput> {
    let config = store.load()?;
    if !config.users_added() {
        return Ok(CommandOutput::Text(output::MSG_NO_USERS_ADDED.to_string()));
    }

    let active = config
        .current
        .as_deref()
        .map(|current| {
            config
                .envs
                .get(current)
                .expect("selected environment must exist")
        })
        .and_then(|env| env.user.as_deref());

    let lines: Vec<String> = config
        .users
        .keys()
        .map(|name| {
            let marker = if active == Some(name.as_str()) {
                "[CURRENT] "
            } else {
                ""
            };
            format!("{marker}{name}")
        })
        .collect();
    Ok(CommandOutput::Text(lines.join("\n")))
}
