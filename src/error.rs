//! Domain errors reported to the user as plain messages.
//!
//! The top-level boundary in `main` downcasts to [`GantryError`] and
//! prints only the message; anything outside this family (I/O, HTTP
//! transport, corrupt state) is treated as a defect and reported with
//! its full error chain.

use thiserror::Error;

use crate::api::filtering::FilterCondition;
use crate::credentials::CredentialError;

/// User-correctable failures of gantry operations.
#[derive(Debug, Error)]
pub enum GantryError {
    /// No environments exist yet.
    #[error("No environments added.")]
    NoEnvironments,

    /// The named environment does not exist.
    #[error("Environment '{name}' not found. Must be one of {available:?}.")]
    EnvironmentNotFound {
        name: String,
        available: Vec<String>,
    },

    /// An environment with this name already exists.
    #[error("Environment '{name}' already exists.")]
    EnvironmentAlreadyExists { name: String },

    /// No users exist yet.
    #[error("No users added.")]
    NoUsers,

    /// The named user does not exist.
    #[error("User '{name}' not found. Must be one of {available:?}.")]
    UserNotFound {
        name: String,
        available: Vec<String>,
    },

    /// A user with this name already exists.
    #[error("User '{name}' already exists.")]
    UserAlreadyExists { name: String },

    /// The operation needs a selected environment and none is set.
    #[error("No environment selected.")]
    NoEnvironmentSelected,

    /// A credential backend failed.
    #[error(transparent)]
    CredentialManager(#[from] CredentialError),

    /// A study filter expression could not be parsed.
    #[error(
        "'{condition}' is not a valid filter condition. Must be one of {valid:?}.",
        valid = FilterCondition::NAMES
    )]
    InvalidFilterCondition { condition: String },
}
