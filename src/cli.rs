//! Command line definition.

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};

use crate::credentials::BUILTIN_BACKEND_IDS;

/// Administration CLI for remote medical-imaging service deployments.
#[derive(Debug, Parser)]
#[command(name = "gantry", version, about)]
pub struct Cli {
    /// Config file to use instead of GANTRY_CONFIG or the default path.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage service environments.
    Env {
        #[command(subcommand)]
        command: EnvCommand,
    },
    /// Manage login identities and their stored passwords.
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Query studies on the selected environment.
    Study {
        #[command(subcommand)]
        command: StudyCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum EnvCommand {
    /// Register an environment.
    Add {
        /// Environment name.
        name: String,
        /// Base URL of the service API.
        url: String,
        /// User to authenticate with.
        #[arg(long)]
        user: Option<String>,
    },
    /// Remove an environment.
    Del {
        /// Environment name.
        name: String,
    },
    /// Update an environment's URL or user.
    Set {
        /// Environment name.
        name: String,
        /// New base URL.
        #[arg(long)]
        url: Option<String>,
        /// New user to authenticate with.
        #[arg(long)]
        user: Option<String>,
    },
    /// Select the environment subsequent commands run against.
    Use {
        /// Environment name.
        name: String,
    },
    /// Show the selected environment.
    Current,
    /// List environments.
    List,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a user; prompts for the password.
    Add {
        /// User name.
        name: String,
        /// Credential backend that stores the password.
        #[arg(long, value_parser = PossibleValuesParser::new(BUILTIN_BACKEND_IDS))]
        creds: String,
    },
    /// Remove a user and their stored password.
    Del {
        /// User name.
        name: String,
    },
    /// Change a user's credential backend or password.
    Set {
        /// User name.
        name: String,
        /// Move the password to this backend.
        #[arg(long, value_parser = PossibleValuesParser::new(BUILTIN_BACKEND_IDS))]
        creds: Option<String>,
        /// Prompt for a new password.
        #[arg(long)]
        passwd: bool,
    },
    /// Show the user associated with the selected environment.
    Current,
    /// List users.
    List,
}

#[derive(Debug, Subcommand)]
pub enum StudyCommand {
    /// Fetch one study record.
    Get {
        /// Study UUID.
        uuid: String,
        /// Restrict the fields returned.
        #[arg(long, num_args = 1..)]
        fields: Option<Vec<String>>,
    },
    /// List studies visible to the session.
    List {
        /// Restrict the fields returned.
        #[arg(long, num_args = 1..)]
        fields: Option<Vec<String>>,
        /// Filter expression, FIELD.CONDITION.VALUE.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Download a study bundle.
    Download {
        /// Study UUID.
        uuid: String,
        /// Bundle format requested from the storage engine.
        #[arg(long, default_value = "dicom")]
        bundle: String,
        /// Destination path; defaults to ./UUID.zip.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Fetch the DICOM schema of a study.
    Schema {
        /// Study UUID.
        uuid: String,
        /// Include extended attributes.
        #[arg(long)]
        extended: bool,
        /// Only list attachments.
        #[arg(long)]
        attachments_only: bool,
    },
}
