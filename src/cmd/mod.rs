//! Command handlers.
//!
//! Each handler loads the config, applies one operation, and returns a
//! [`CommandOutput`](crate::output::CommandOutput) for `main` to
//! print. Domain failures surface as
//! [`GantryError`](crate::error::GantryError) inside the `anyhow`
//! chain; everything else is a defect.

pub mod env;
pub mod study;
pub mod user;

use anyhow::Result;

use crate::cli::{Cli, Command, EnvCommand, StudyCommand, UserCommand};
use crate::config::{Config, ConfigStore};
use crate::credentials::CredentialManagerRegistry;
use crate::error::GantryError;
use crate::output::CommandOutput;
use crate::prompt::TerminalPrompt;

/// Routes a parsed command line to its handler.
pub fn dispatch(cli: Cli) -> Result<CommandOutput> {
    let store = ConfigStore::resolve(cli.config);
    let registry = CredentialManagerRegistry::builtin();
    let prompt = TerminalPrompt;

    match cli.command {
        Command::Env { command } => match command {
            EnvCommand::Add { name, url, user } => env::add(&store, &name, &url, user.as_deref()),
            EnvCommand::Del { name } => env::del(&store, &name),
            EnvCommand::Set { name, url, user } => {
                env::set(&store, &name, url.as_deref(), user.as_deref())
            }
            EnvCommand::Use { name } => env::select(&store, &name),
            EnvCommand::Current => env::current(&store),
            EnvCommand::List => env::list(&store),
        },
        Command::User { command } => match command {
            UserCommand::Add { name, creds } => {
                user::add(&store, &registry, &prompt, &name, &creds)
            }
            UserCommand::Del { name } => user::del(&store, &registry, &name),
            UserCommand::Set {
                name,
                creds,
                passwd,
            } => user::set(&store, &registry, &prompt, &name, creds.as_deref(), passwd),
            UserCommand::Current => user::current(&store),
            UserCommand::List => user::list(&store),
        },
        Command::Study { command } => match command {
            StudyCommand::Get { uuid, fields } => {
                study::get(&store, &registry, &uuid, fields.as_deref())
            }
            StudyCommand::List { fields, filter } => {
                study::list(&store, &registry, fields.as_deref(), filter.as_deref())
            }
            StudyCommand::Download {
                uuid,
                bundle,
                output,
            } => study::download(&store, &registry, &uuid, &bundle, output.as_deref()),
            StudyCommand::Schema {
                uuid,
                extended,
                attachments_only,
            } => study::schema(&store, &registry, &uuid, extended, attachments_only),
        },
    }
}

/// Fails unless `name` refers to a known environment.
///
/// The empty case has its own error so the user learns there is
/// nothing configured at all, not that one name is wrong.
pub(crate) fn ensure_env_known(config: &Config, name: &str) -> Result<(), GantryError> {
    if !config.envs_added() {
        return Err(GantryError::NoEnvironments);
    }
    if !config.env_exists(name) {
        return Err(GantryError::EnvironmentNotFound {
            name: name.to_string(),
            available: config.env_names(),
        });
    }
    Ok(())
}

/// Fails unless `name` refers to a known user.
pub(crate) fn ensure_user_known(config: &Config, name: &str) -> Result<(), GantryError> {
    if !config.users_added() {
        return Err(GantryError::NoUsers);
    }
    if !config.user_exists(name) {
        return Err(GantryError::UserNotFound {
            name: name.to_string(),
            available: config.user_names(),
        });
    }
    Ok(())
}
