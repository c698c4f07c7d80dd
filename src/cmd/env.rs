//! `gantry env`: manage service environments.

use anyhow::Result;

use crate::config::{ConfigStore, Environment};
use crate::error::GantryError;
use crate::output::{self, CommandOutput};

use super::{ensure_env_known, ensure_user_known};

/// Register a new environment.
pub fn add(
    store: &ConfigStore,
    name: &str,
    url: &str,
    user: Option<&str>,
) -> Result<CommandOutput> {
    store.transaction(|config| {
        if config.env_exists(name) {
            return Err(GantryError::EnvironmentAlreadyExists {
                name: name.to_string(),
            }
            .into());
        }
        if let Some(user) = user {
            ensure_user_known(config, user)?;
        }

        let env = Environment {
            url: url.to_string(),
            user: user.map(str::to_string),
        };
        config.envs.insert(name.to_string(), env.clone());
        tracing::info!("Added environment '{}' ({})", name, url);

        Ok(output::keyed_json(name, env))
    })
}

/// Remove an environment. Clears the selection if it pointed here.
pub fn del(store: &ConfigStore, name: &str) -> Result<CommandOutput> {
    store.transaction(|config| {
        ensure_env_known(config, name)?;

        config.envs.shift_remove(name);
        if config.current.as_deref() == Some(name) {
            config.current = None;
        }
        tracing::info!("Deleted environment '{}'", name);

        Ok(CommandOutput::None)
    })
}

/// Update an environment's URL or associated user.
pub fn set(
    store: &ConfigStore,
    name: &str,
    url: Option<&str>,
    user: Option<&str>,
) -> Result<CommandOutput> {
    store.transaction(|config| {
        ensure_env_known(config, name)?;
        if let Some(user) = user {
            ensure_user_known(config, user)?;
        }

        let env = config.envs.get_mut(name).expect("environment presence checked");
        if let Some(url) = url {
            env.url = url.to_string();
        }
        if let Some(user) = user {
            env.user = Some(user.to_string());
        }
        let env = env.clone();
        tracing::info!("Updated environment '{}'", name);

        Ok(output::keyed_json(name, env))
    })
}

/// Select the environment subsequent commands run against.
pub fn select(store: &ConfigStore, name: &str) -> Result<CommandOutput> {
    store.transaction(|config| {
        ensure_env_known(config, name)?;

        config.current = Some(name.to_string());
        tracing::info!("Selected environment '{}'", name);

        Ok(CommandOutput::None)
    })
}

/// Show the selected environment.
pub fn current(store: &ConfigStore) -> Result<CommandOutput> {
    let config = store.load()?;
    let message = match config.current {
        Some(name) => name,
        None => output::MSG_NO_ENV_SELECTED.to_string(),
    };
    Ok(CommandOutput::Text(message))
}

/// List environments in insertion order, marking the selected one.
pub fn list(store: &ConfigStore) -> Result<CommandOutput> {
    let config = store.load()?;
    if !config.envs_added() {
        return Ok(CommandOutput::Text(output::MSG_NO_ENVS_ADDED.to_string()));
    }

    let lines: Vec<String> = config
        .envs
        .iter()
        .map(|(name, env)| {
            let marker = if config.current.as_deref() == Some(name.as_str()) {
                "[CURRENT] "
            } else {
                ""
            };
            format!("{marker}{name}: {}", env.url)
        })
        .collect();
    Ok(CommandOutput::Text(lines.join("\n")))
}
