//! Thin client for the imaging service API.

pub mod client;
pub mod filtering;

pub use client::{ApiClient, ApiError, StorageArgs};
pub use filtering::{FilterCondition, StudyFilter};
