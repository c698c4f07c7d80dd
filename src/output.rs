//! Command output rendering.
//!
//! Handlers return a [`CommandOutput`] instead of printing, which
//! keeps them testable; only `main` touches stdout. Logs go to stderr
//! so piped output stays clean.

use serde::Serialize;
use serde_json::{Map, Value};

/// Answer for a current-environment query with nothing selected.
pub const MSG_NO_ENV_SELECTED: &str = "No environment selected.";

/// Answer for an environment listing with nothing configured.
pub const MSG_NO_ENVS_ADDED: &str = "No environments added.";

/// Answer for a user listing with nothing configured.
pub const MSG_NO_USERS_ADDED: &str = "No users added.";

/// Answer for a current-user query when the selected environment has
/// no associated user.
pub fn msg_no_user_for_env(env: &str) -> String {
    format!("No user associated with environment '{env}'.")
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Mutation-only commands print nothing.
    None,
    /// A single line or a pre-joined block of text.
    Text(String),
    /// A structure rendered as pretty JSON.
    Json(Value),
}

impl CommandOutput {
    /// Print to stdout.
    pub fn print(&self) {
        match self {
            CommandOutput::None => {}
            CommandOutput::Text(text) => println!("{text}"),
            CommandOutput::Json(value) => {
                let rendered =
                    serde_json::to_string_pretty(value).expect("JSON values always render");
                println!("{rendered}");
            }
        }
    }
}

/// JSON output of the shape `{ name: record }`, as returned by the
/// mutating env and user commands.
pub fn keyed_json(name: &str, record: impl Serialize) -> CommandOutput {
    let value = serde_json::to_value(record).expect("config records always encode");
    let mut object = Map::new();
    object.insert(name.to_string(), value);
    CommandOutput::Json(Value::Object(object))
}
