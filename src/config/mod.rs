//! Configuration model and persistence.

pub mod store;
pub mod types;

pub use store::{ConfigStore, StoreError};
pub use types::{Config, Environment, User};
