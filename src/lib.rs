//! Administration toolkit for remote medical-imaging service
//! deployments.
//!
//! The library backs the `gantry` binary and the integration tests.
//! Everything revolves around a small JSON config document (known
//! environments, login identities, the selected environment) and a set
//! of credential backends that hold the actual passwords outside the
//! config file.

pub mod api;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod credentials;
pub mod error;
pub mod output;
pub mod prompt;
