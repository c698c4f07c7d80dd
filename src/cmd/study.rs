//! `gantry study`: query studies on the selected environment.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::api::{ApiClient, StudyFilter};
use crate::config::ConfigStore;
use crate::credentials::CredentialManagerRegistry;
use crate::error::GantryError;
use crate::output::CommandOutput;
use crate::prompt;

/// Opens an API session for the currently selected environment.
fn connect(store: &ConfigStore, registry: &CredentialManagerRegistry) -> Result<ApiClient> {
    let config = store.load()?;

    let Some(current) = config.current.as_deref() else {
        return Err(GantryError::NoEnvironmentSelected.into());
    };
    let env = config
        .envs
        .get(current)
        .expect("selected environment must exist");
    let username = env
        .user
        .as_deref()
        .with_context(|| format!("environment '{current}' has no associated user"))?;

    let user = config
        .users
        .get(username)
        .expect("environment user must exist");
    let password = registry
        .get(&user.credentials_manager)
        .get_password(username)
        .map_err(GantryError::from)?
        .with_context(|| format!("no password stored for user '{username}'"))?;

    let client = ApiClient::login(&env.url, username, &password)?;
    Ok(client)
}

/// Fetch and print one study record.
pub fn get(
    store: &ConfigStore,
    registry: &CredentialManagerRegistry,
    uuid: &str,
    fields: Option<&[String]>,
) -> Result<CommandOutput> {
    let client = connect(store, registry)?;
    let record = client.study_get(uuid, fields)?;
    Ok(CommandOutput::Json(record))
}

/// List studies, optionally filtered.
pub fn list(
    store: &ConfigStore,
    registry: &CredentialManagerRegistry,
    fields: Option<&[String]>,
    filter: Option<&str>,
) -> Result<CommandOutput> {
    if fields.is_none() {
        println!("Not specifying 'fields' may produce a lot of output.");
        if !prompt::confirm("Do you wish to proceed?")? {
            return Ok(CommandOutput::None);
        }
    }

    let filter = filter.map(StudyFilter::parse).transpose()?;
    let client = connect(store, registry)?;
    let studies = client.study_list(fields, filter.as_ref())?;
    Ok(CommandOutput::Json(Value::Array(studies)))
}

/// Download a study bundle to a local file.
pub fn download(
    store: &ConfigStore,
    registry: &CredentialManagerRegistry,
    uuid: &str,
    bundle: &str,
    output: Option<&Path>,
) -> Result<CommandOutput> {
    let client = connect(store, registry)?;
    let storage = client.storage_args(uuid)?;

    let dest: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!("{uuid}.zip")),
    };
    let mut file = File::create(&dest)
        .with_context(|| format!("failed to create '{}'", dest.display()))?;
    let bytes = client.download_study(&storage, bundle, &mut file)?;
    tracing::info!("Downloaded {} bytes to '{}'", bytes, dest.display());

    Ok(CommandOutput::Text(format!(
        "Downloaded to '{}'.",
        dest.display()
    )))
}

/// Fetch and print the DICOM schema of a study.
pub fn schema(
    store: &ConfigStore,
    registry: &CredentialManagerRegistry,
    uuid: &str,
    extended: bool,
    attachments_only: bool,
) -> Result<CommandOutput> {
    let client = connect(store, registry)?;
    let storage = client.storage_args(uuid)?;
    let schema = client.study_schema(&storage, extended, attachments_only)?;
    Ok(CommandOutput::Json(schema))
}
