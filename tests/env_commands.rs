//! Behavior of the `env` command family.

mod common;

use gantry::cmd::env;
use gantry::config::{Config, ConfigStore};
use gantry::error::GantryError;
use gantry::output::CommandOutput;
use serde_json::json;

const PROD_URL: &str = "https://prod.example.com";
const DEV_URL: &str = "https://dev.example.com";

/// Adding to an empty config registers the environment without
/// selecting it.
#[test]
fn test_add_registers_environment() {
    let store = ConfigStore::in_memory(Config::default());

    let output = env::add(&store, "prod", PROD_URL, None).unwrap();

    assert_eq!(
        output,
        CommandOutput::Json(json!({ "prod": { "url": PROD_URL, "user": null } }))
    );
    let config = store.load().unwrap();
    assert_eq!(config.envs.get("prod").unwrap().url, PROD_URL);
    assert!(config.current.is_none());
}

/// `--user` associates an existing user at creation time.
#[test]
fn test_add_with_user_associates() {
    let config = common::config_with(&[], &[("alice", common::user("primary"))]);
    let store = ConfigStore::in_memory(config);

    let output = env::add(&store, "prod", PROD_URL, Some("alice")).unwrap();

    assert_eq!(
        output,
        CommandOutput::Json(json!({ "prod": { "url": PROD_URL, "user": "alice" } }))
    );
    let config = store.load().unwrap();
    assert_eq!(config.envs.get("prod").unwrap().user.as_deref(), Some("alice"));
}

#[test]
fn test_add_duplicate_name_fails() {
    let before = common::config_with(&[("prod", common::environment(PROD_URL, None))], &[]);
    let store = ConfigStore::in_memory(before.clone());

    let err = env::add(&store, "prod", DEV_URL, None).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GantryError>(),
        Some(GantryError::EnvironmentAlreadyExists { .. })
    ));
    assert_eq!(store.load().unwrap(), before);
}

/// The empty-users case reports NoUsers, not UserNotFound.
#[test]
fn test_add_with_user_fails_when_no_users() {
    let store = ConfigStore::in_memory(Config::default());

    let err = env::add(&store, "prod", PROD_URL, Some("alice")).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GantryError>(),
        Some(GantryError::NoUsers)
    ));
    assert!(store.load().unwrap().envs.is_empty());
}

#[test]
fn test_add_with_unknown_user_lists_available() {
    let config = common::config_with(&[], &[("alice", common::user("primary"))]);
    let store = ConfigStore::in_memory(config);

    let err = env::add(&store, "prod", PROD_URL, Some("bob")).unwrap_err();

    match err.downcast_ref::<GantryError>() {
        Some(GantryError::UserNotFound { name, available }) => {
            assert_eq!(name, "bob");
            assert_eq!(available, &vec!["alice".to_string()]);
        }
        other => panic!("Expected UserNotFound, got: {other:?}"),
    }
}

#[test]
fn test_del_removes_environment() {
    let config = common::config_with(
        &[
            ("prod", common::environment(PROD_URL, None)),
            ("dev", common::environment(DEV_URL, None)),
        ],
        &[],
    );
    let store = ConfigStore::in_memory(config);

    let output = env::del(&store, "prod").unwrap();

    assert_eq!(output, CommandOutput::None);
    let config = store.load().unwrap();
    assert!(!config.env_exists("prod"));
    assert!(config.env_exists("dev"));
}

/// Deleting the selected environment clears the selection.
#[test]
fn test_del_clears_current_selection() {
    let mut config = common::config_with(&[("prod", common::environment(PROD_URL, None))], &[]);
    config.current = Some("prod".to_string());
    let store = ConfigStore::in_memory(config);

    env::del(&store, "prod").unwrap();

    assert!(store.load().unwrap().current.is_none());
}

/// Deleting another environment leaves the selection alone.
#[test]
fn test_del_keeps_selection_for_other_environment() {
    let mut config = common::config_with(
        &[
            ("prod", common::environment(PROD_URL, None)),
            ("dev", common::environment(DEV_URL, None)),
        ],
        &[],
    );
    config.current = Some("prod".to_string());
    let store = ConfigStore::in_memory(config);

    env::del(&store, "dev").unwrap();

    assert_eq!(store.load().unwrap().current.as_deref(), Some("prod"));
}

#[test]
fn test_del_fails_when_no_environments() {
    let store = ConfigStore::in_memory(Config::default());

    let err = env::del(&store, "prod").unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GantryError>(),
        Some(GantryError::NoEnvironments)
    ));
}

#[test]
fn test_del_unknown_environment_lists_available() {
    let config = common::config_with(&[("prod", common::environment(PROD_URL, None))], &[]);
    let store = ConfigStore::in_memory(config);

    let err = env::del(&store, "ghost").unwrap_err();

    match err.downcast_ref::<GantryError>() {
        Some(GantryError::EnvironmentNotFound { name, available }) => {
            assert_eq!(name, "ghost");
            assert_eq!(available, &vec!["prod".to_string()]);
        }
        other => panic!("Expected EnvironmentNotFound, got: {other:?}"),
    }
}

#[test]
fn test_set_updates_url_only() {
    let config = common::config_with(
        &[("prod", common::environment(PROD_URL, Some("alice")))],
        &[("alice", common::user("primary"))],
    );
    let store = ConfigStore::in_memory(config);

    let output = env::set(&store, "prod", Some(DEV_URL), None).unwrap();

    assert_eq!(
        output,
        CommandOutput::Json(json!({ "prod": { "url": DEV_URL, "user": "alice" } }))
    );
    let config = store.load().unwrap();
    let env = config.envs.get("prod").unwrap();
    assert_eq!(env.url, DEV_URL);
    assert_eq!(env.user.as_deref(), Some("alice"));
}

#[test]
fn test_set_updates_user_only() {
    let config = common::config_with(
        &[("prod", common::environment(PROD_URL, None))],
        &[("alice", common::user("primary"))],
    );
    let store = ConfigStore::in_memory(config);

    env::set(&store, "prod", None, Some("alice")).unwrap();

    let config = store.load().unwrap();
    let env = config.envs.get("prod").unwrap();
    assert_eq!(env.url, PROD_URL);
    assert_eq!(env.user.as_deref(), Some("alice"));
}

#[test]
fn test_set_fails_when_no_environments() {
    let store = ConfigStore::in_memory(Config::default());

    let err = env::set(&store, "prod", Some(DEV_URL), None).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GantryError>(),
        Some(GantryError::NoEnvironments)
    ));
}

/// The user reference is validated before any field is touched.
#[test]
fn test_set_with_unknown_user_changes_nothing() {
    let before = common::config_with(
        &[("prod", common::environment(PROD_URL, None))],
        &[("alice", common::user("primary"))],
    );
    let store = ConfigStore::in_memory(before.clone());

    let err = env::set(&store, "prod", Some(DEV_URL), Some("bob")).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GantryError>(),
        Some(GantryError::UserNotFound { .. })
    ));
    assert_eq!(store.load().unwrap(), before);
}

#[test]
fn test_set_with_user_fails_when_no_users() {
    let config = common::config_with(&[("prod", common::environment(PROD_URL, None))], &[]);
    let store = ConfigStore::in_memory(config);

    let err = env::set(&store, "prod", None, Some("alice")).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GantryError>(),
        Some(GantryError::NoUsers)
    ));
}

#[test]
fn test_use_selects_environment() {
    let config = common::config_with(&[("prod", common::environment(PROD_URL, None))], &[]);
    let store = ConfigStore::in_memory(config);

    let output = env::select(&store, "prod").unwrap();

    assert_eq!(output, CommandOutput::None);
    assert_eq!(store.load().unwrap().current.as_deref(), Some("prod"));
}

#[test]
fn test_use_unknown_environment_fails() {
    let config = common::config_with(&[("prod", common::environment(PROD_URL, None))], &[]);
    let store = ConfigStore::in_memory(config);

    let err = env::select(&store, "ghost").unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GantryError>(),
        Some(GantryError::EnvironmentNotFound { .. })
    ));
    assert!(store.load().unwrap().current.is_none());
}

#[test]
fn test_current_reports_selected_environment() {
    let mut config = common::config_with(&[("prod", common::environment(PROD_URL, None))], &[]);
    config.current = Some("prod".to_string());
    let store = ConfigStore::in_memory(config);

    let output = env::current(&store).unwrap();

    assert_eq!(output, CommandOutput::Text("prod".to_string()));
}

/// No selection is an answer, not an error.
#[test]
fn test_current_without_selection_is_sentinel() {
    let store = ConfigStore::in_memory(Config::default());

    let output = env::current(&store).unwrap();

    assert_eq!(
        output,
        CommandOutput::Text("No environment selected.".to_string())
    );
}

/// Listing preserves insertion order and marks the selected entry.
#[test]
fn test_list_orders_and_marks_current() {
    let mut config = common::config_with(
        &[
            ("zeta", common::environment("https://zeta.example.com", None)),
            ("alpha", common::environment("https://alpha.example.com", None)),
        ],
        &[],
    );
    config.current = Some("alpha".to_string());
    let store = ConfigStore::in_memory(config);

    let output = env::list(&store).unwrap();

    assert_eq!(
        output,
        CommandOutput::Text(
            "zeta: https://zeta.example.com\n[CURRENT] alpha: https://alpha.example.com"
                .to_string()
        )
    );
}

#[test]
fn test_list_without_environments_is_sentinel() {
    let store = ConfigStore::in_memory(Config::default());

    let output = env::list(&store).unwrap();

    assert_eq!(
        output,
        CommandOutput::Text("No environments added.".to_string())
    );
}

/// Add followed by del restores the exact starting config.
#[test]
fn test_add_then_del_restores_config() {
    let before = common::config_with(&[("dev", common::environment(DEV_URL, None))], &[]);
    let store = ConfigStore::in_memory(before.clone());

    env::add(&store, "prod", PROD_URL, None).unwrap();
    env::del(&store, "prod").unwrap();

    assert_eq!(store.load().unwrap(), before);
}
