//! Blocking HTTP client for the imaging service API.
//!
//! Covers exactly what the CLI needs: session login, the study
//! endpoints, and the storage-engine endpoints behind them. Every call
//! carries the session id obtained at login.

use std::io::Write;

use serde_json::Value;
use thiserror::Error;

use crate::api::filtering::StudyFilter;
use crate::credentials::SecureString;

/// Rows requested per page when listing studies.
const PAGE_ROWS: u32 = 100;

/// Study fields identifying its storage location.
const STORAGE_FIELDS: [&str; 3] = ["engine_fqdn", "storage_namespace", "study_uid"];

/// Errors from the service API layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Login rejected with status {status}")]
    LoginRejected { status: u16 },

    #[error("Unexpected response payload: {context}")]
    UnexpectedPayload { context: String },
}

/// Storage coordinates of a study, required by the storage-engine
/// endpoints (schema, download).
#[derive(Debug, Clone)]
pub struct StorageArgs {
    pub engine_fqdn: String,
    pub storage_namespace: String,
    pub study_uid: String,
}

impl StorageArgs {
    fn from_record(record: &Value) -> Result<Self, ApiError> {
        let field = |name: &str| {
            record
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ApiError::UnexpectedPayload {
                    context: format!("study record missing '{name}'"),
                })
        };

        Ok(Self {
            engine_fqdn: field("engine_fqdn")?,
            storage_namespace: field("storage_namespace")?,
            study_uid: field("study_uid")?,
        })
    }
}

/// Session-scoped client for one environment.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    sid: String,
}

impl ApiClient {
    /// Opens a session against `base_url` with the given credentials.
    pub fn login(
        base_url: &str,
        username: &str,
        password: &SecureString,
    ) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .expect("Failed to build API client");

        let base_url = base_url.trim_end_matches('/').to_string();
        let response = http
            .post(format!("{base_url}/api/v3/session/login"))
            .form(&[("login", username), ("password", password.expose())])
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::LoginRejected {
                status: response.status().as_u16(),
            });
        }

        let body: Value = response.json()?;
        let sid = body
            .get("sid")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::UnexpectedPayload {
                context: "login response carried no sid".to_string(),
            })?
            .to_string();

        tracing::debug!("Opened session on {} as '{}'", base_url, username);
        Ok(Self {
            http,
            base_url,
            sid,
        })
    }

    /// Fetch one study record.
    pub fn study_get(&self, uuid: &str, fields: Option<&[String]>) -> Result<Value, ApiError> {
        let mut params: Vec<(String, String)> = vec![
            ("sid".to_string(), self.sid.clone()),
            ("uuid".to_string(), uuid.to_string()),
        ];
        if let Some(fields) = fields {
            params.push(("fields".to_string(), encode_fields(fields)));
        }

        let response = self
            .http
            .get(format!("{}/api/v3/study/get", self.base_url))
            .query(&params)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    /// List studies visible to the session, following pagination.
    pub fn study_list(
        &self,
        fields: Option<&[String]>,
        filter: Option<&StudyFilter>,
    ) -> Result<Vec<Value>, ApiError> {
        let mut studies = Vec::new();
        let mut page = 1u32;

        loop {
            let mut params: Vec<(String, String)> = vec![
                ("sid".to_string(), self.sid.clone()),
                ("page.number".to_string(), page.to_string()),
                ("page.rows".to_string(), PAGE_ROWS.to_string()),
            ];
            if let Some(fields) = fields {
                params.push(("fields".to_string(), encode_fields(fields)));
            }
            if let Some(filter) = filter {
                params.push((filter.param_name(), filter.value.clone()));
            }

            let response = self
                .http
                .get(format!("{}/api/v3/study/list", self.base_url))
                .query(&params)
                .send()?
                .error_for_status()?;
            let body: Value = response.json()?;

            let rows = body
                .get("studies")
                .and_then(Value::as_array)
                .ok_or_else(|| ApiError::UnexpectedPayload {
                    context: "study list response carried no studies array".to_string(),
                })?;
            let row_count = rows.len();
            studies.extend(rows.iter().cloned());

            if is_last_page(&body, row_count) {
                tracing::debug!("Listed {} studies over {} page(s)", studies.len(), page);
                return Ok(studies);
            }
            page += 1;
        }
    }

    /// Resolve the storage coordinates of a study.
    pub fn storage_args(&self, uuid: &str) -> Result<StorageArgs, ApiError> {
        let fields: Vec<String> = STORAGE_FIELDS.iter().map(|f| f.to_string()).collect();
        let record = self.study_get(uuid, Some(&fields))?;
        StorageArgs::from_record(&record)
    }

    /// Fetch the DICOM schema of a study from its storage engine.
    pub fn study_schema(
        &self,
        storage: &StorageArgs,
        extended: bool,
        attachments_only: bool,
    ) -> Result<Value, ApiError> {
        let params = [
            ("sid", self.sid.as_str()),
            ("extended", bool_flag(extended)),
            ("attachments_only", bool_flag(attachments_only)),
        ];

        let response = self
            .http
            .get(format!(
                "https://{}/api/v3/storage/study/{}/{}/schema",
                storage.engine_fqdn, storage.storage_namespace, storage.study_uid
            ))
            .query(&params)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    /// Stream a study bundle into `sink`. Returns the byte count.
    pub fn download_study(
        &self,
        storage: &StorageArgs,
        bundle: &str,
        sink: &mut dyn Write,
    ) -> Result<u64, ApiError> {
        let params = [("sid", self.sid.as_str()), ("bundle", bundle)];

        let mut response = self
            .http
            .get(format!(
                "https://{}/api/v3/storage/study/{}/{}/download",
                storage.engine_fqdn, storage.storage_namespace, storage.study_uid
            ))
            .query(&params)
            .send()?
            .error_for_status()?;

        let written = response.copy_to(sink)?;
        Ok(written)
    }
}

/// A page is terminal when the service reports no further results
/// (`page.more` 0 or absent) or returned fewer rows than requested.
fn is_last_page(body: &Value, rows_returned: usize) -> bool {
    let more = body
        .pointer("/page/more")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    more == 0 || rows_returned < PAGE_ROWS as usize
}

fn encode_fields(fields: &[String]) -> String {
    serde_json::to_string(fields).expect("string lists always encode")
}

fn bool_flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
