//! Tests for layered configuration loading.

use super::*;
use crate::{ContextConfig, SessionsConfig};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// Options rooted in a temp dir so the real home config is never read.
fn isolated_options(root: &Path) -> LayeredConfigOptions {
    LayeredConfigOptions::new(root.join("cwd")).with_user_path(Some(root.join("user.json5")))
}

/// A minimal config parses with defaults.
#[test]
fn parse_minimal_config() {
    let config = ParleyConfig::load_from_str("{}").expect("config");
    assert_eq!(config, ParleyConfig::default());
    assert_eq!(config.context.limit, 10);
    assert!(!config.context.include_user_labels);
    assert!(config.sessions.default_participants.is_empty());
}

/// Every supported key round-trips into typed config.
#[test]
fn parse_full_config() {
    let json5 = r#"{
        $schema: "https://example.invalid/parley.schema.json",
        // trailing commas and comments are fine in JSON5
        context: { limit: 4, include_user_labels: true, },
        sessions: { default_participants: ["assistant"] },
    }"#;
    let config = ParleyConfig::load_from_str(json5).expect("config");
    let expected = ParleyConfig::builder()
        .context(ContextConfig {
            limit: 4,
            include_user_labels: true,
        })
        .sessions(SessionsConfig {
            default_participants: vec!["assistant".to_string()],
        })
        .build();
    assert_eq!(
        config,
        ParleyConfig {
            schema: Some("https://example.invalid/parley.schema.json".to_string()),
            ..expected
        }
    );
}

/// A zero limit is accepted and means "render everything".
#[test]
fn accepts_zero_limit() {
    let config = ParleyConfig::load_from_str("{ context: { limit: 0 } }").expect("config");
    assert_eq!(config.context.limit, 0);
}

/// Reject unexpected top-level config keys.
#[test]
fn rejects_unknown_top_level_key() {
    let err = ParleyConfig::load_from_str("{ unexpected: true }").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("unknown key"));
    assert!(msg.contains("config:unexpected"));
}

/// Reject negative context limits.
#[test]
fn rejects_negative_limit() {
    let err = ParleyConfig::load_from_str("{ context: { limit: -1 } }").unwrap_err();
    match err {
        ConfigError::InvalidField { path, message } => {
            assert_eq!(path, "config:context.limit");
            assert_eq!(message, "expected non-negative integer");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Reject non-string participant entries.
#[test]
fn rejects_non_string_participant() {
    let err = ParleyConfig::load_from_str("{ sessions: { default_participants: [\"a\", 3] } }")
        .unwrap_err();
    assert!(format!("{err}").contains("sessions.default_participants[1]"));
}

/// Reject blank and duplicate default participants.
#[test]
fn rejects_invalid_participants() {
    let err = ParleyConfig::load_from_str("{ sessions: { default_participants: [\"  \"] } }")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = ParleyConfig::load_from_str(
        "{ sessions: { default_participants: [\"bot\", \"bot\"] } }",
    )
    .unwrap_err();
    assert!(format!("{err}").contains("bot more than once"));
}

/// Malformed JSON5 surfaces as a parse error.
#[test]
fn rejects_malformed_json5() {
    let err = ParleyConfig::load_from_str("{ context: ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseFailed(_)));
}

/// Loading a missing path reports the path.
#[test]
fn load_from_missing_path_fails() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("absent.json5");
    let err = ParleyConfig::load_from_path(&path).unwrap_err();
    match err {
        ConfigError::ReadFailed { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Later layers override earlier ones key by key.
#[test]
fn layered_config_applies_precedence() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    write_json5(
        &root.join("user.json5"),
        "{ context: { limit: 5, include_user_labels: true } }",
    );
    write_json5(
        &root.join("cwd").join(DEFAULT_CONFIG_FILE),
        "{ context: { limit: 3 }, sessions: { default_participants: [\"assistant\"] } }",
    );
    let runtime = root.join("runtime.json5");
    write_json5(&runtime, "{ sessions: { default_participants: [\"narrator\"] } }");

    let layered =
        ParleyConfig::load_layered_with_options(isolated_options(root).with_runtime_path(&runtime))
            .expect("layered");

    assert_eq!(layered.config.context.limit, 3);
    assert!(layered.config.context.include_user_labels);
    assert_eq!(
        layered.config.sessions.default_participants,
        vec!["narrator".to_string()]
    );
    let sources: Vec<ConfigLayerSource> =
        layered.layers.iter().map(|layer| layer.source).collect();
    assert_eq!(
        sources,
        vec![
            ConfigLayerSource::User,
            ConfigLayerSource::Cwd,
            ConfigLayerSource::Runtime
        ]
    );
}

/// Missing optional layers fall back to defaults.
#[test]
fn layered_config_without_files_uses_defaults() {
    let temp = TempDir::new().expect("tmp");
    let layered =
        ParleyConfig::load_layered_with_options(isolated_options(temp.path())).expect("layered");
    assert!(layered.layers.is_empty());
    assert_eq!(layered.config, ParleyConfig::default());
}

/// A runtime override that does not exist is an error.
#[test]
fn layered_config_requires_runtime_paths() {
    let temp = TempDir::new().expect("tmp");
    let missing = temp.path().join("missing.json5");
    let err = ParleyConfig::load_layered_with_options(
        isolated_options(temp.path()).with_runtime_path(&missing),
    )
    .unwrap_err();
    match err {
        ConfigError::MissingFile(path) => assert_eq!(path, missing),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// The same file is not loaded twice when user and cwd layers coincide.
#[test]
fn layered_config_skips_duplicate_paths() {
    let temp = TempDir::new().expect("tmp");
    let cwd = temp.path().join("cwd");
    let shared = cwd.join(DEFAULT_CONFIG_FILE);
    write_json5(&shared, "{ context: { limit: 2 } }");

    let options = LayeredConfigOptions::new(&cwd).with_user_path(Some(shared.clone()));
    let layered = ParleyConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.layers.len(), 1);
    assert_eq!(layered.layers[0].source, ConfigLayerSource::User);
    assert_eq!(layered.config.context.limit, 2);
}

/// Schema errors name the offending layer.
#[test]
fn layered_config_reports_layer_label() {
    let temp = TempDir::new().expect("tmp");
    write_json5(&temp.path().join("user.json5"), "{ context: { labels: true } }");
    let err =
        ParleyConfig::load_layered_with_options(isolated_options(temp.path())).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("user("));
    assert!(msg.contains("context.labels"));
}
