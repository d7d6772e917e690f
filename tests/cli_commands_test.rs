//! End-to-end tests for the mask and unmask commands

use ermask::cli::commands::mask::MaskArgs;
use ermask::cli::commands::unmask::UnmaskArgs;
use ermask::cli::commands::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_POLICY_VIOLATION, EXIT_SUCCESS};
use ermask::config::ErmaskConfig;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn mask_args(inputs: Vec<PathBuf>) -> MaskArgs {
    MaskArgs {
        inputs,
        output: None,
        output_dir: None,
        shared_session: false,
        compact: false,
        summary: false,
        report: None,
    }
}

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn customers() -> Value {
    json!({
        "RECORDS": [
            {"DATA_SOURCE": "CUSTOMERS", "RECORD_ID": "1001", "ENTITY_NAME": "John Smith"},
            {"DATA_SOURCE": "CUSTOMERS", "RECORD_ID": "1002", "ENTITY_NAME": "Jane Doe"}
        ]
    })
}

fn watchlist() -> Value {
    json!({
        "RECORDS": [
            {"DATA_SOURCE": "WATCHLIST", "RECORD_ID": "W-9", "ENTITY_NAME": "Jane Doe"}
        ]
    })
}

#[tokio::test]
async fn test_mask_single_input_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "customers.json", &customers());
    let output = dir.path().join("customers.masked.json");

    let mut args = mask_args(vec![input]);
    args.output = Some(output.clone());

    let code = args.execute(&ErmaskConfig::default()).await.unwrap();
    assert_eq!(code, EXIT_SUCCESS);

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("{\n  \"RECORDS\""));
    assert!(text.ends_with("}\n"));

    let masked = read_json(&output);
    assert_eq!(masked["RECORDS"][0]["ENTITY_NAME"], "ENTITY_NAME_1");
    assert_eq!(masked["RECORDS"][1]["DATA_SOURCE"], "DATA_SOURCE_1");
}

#[tokio::test]
async fn test_mask_compact_output() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "customers.json", &customers());
    let output = dir.path().join("out.json");

    let mut args = mask_args(vec![input]);
    args.output = Some(output.clone());
    args.compact = true;

    assert_eq!(
        args.execute(&ErmaskConfig::default()).await.unwrap(),
        EXIT_SUCCESS
    );
    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.ends_with('\n'));
}

#[tokio::test]
async fn test_mask_multiple_inputs_require_output_dir() {
    let dir = TempDir::new().unwrap();
    let a = write_json(dir.path(), "a.json", &customers());
    let b = write_json(dir.path(), "b.json", &watchlist());

    let code = mask_args(vec![a, b])
        .execute(&ErmaskConfig::default())
        .await
        .unwrap();
    assert_eq!(code, EXIT_CONFIG_ERROR);
}

#[tokio::test]
async fn test_mask_same_stem_inputs_write_nothing() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("a")).unwrap();
    std::fs::create_dir_all(dir.path().join("b")).unwrap();
    let a = write_json(&dir.path().join("a"), "x.json", &customers());
    let b = write_json(&dir.path().join("b"), "x.json", &watchlist());
    let out = dir.path().join("out");

    let mut args = mask_args(vec![a, b]);
    args.output_dir = Some(out.clone());

    let code = args.execute(&ErmaskConfig::default()).await.unwrap();
    assert_eq!(code, EXIT_CONFIG_ERROR);
    assert!(!out.exists());
}

#[tokio::test]
async fn test_mask_independent_sessions() {
    let dir = TempDir::new().unwrap();
    let a = write_json(dir.path(), "customers.json", &customers());
    let b = write_json(dir.path(), "watchlist.json", &watchlist());
    let out = dir.path().join("out");

    let mut args = mask_args(vec![a, b]);
    args.output_dir = Some(out.clone());

    assert_eq!(
        args.execute(&ErmaskConfig::default()).await.unwrap(),
        EXIT_SUCCESS
    );

    let masked = read_json(&out.join("watchlist.masked.json"));
    // fresh session: Jane Doe is the first name seen
    assert_eq!(masked["RECORDS"][0]["ENTITY_NAME"], "ENTITY_NAME_1");
    assert!(out.join("customers.masked.json").exists());
}

#[tokio::test]
async fn test_mask_shared_session() {
    let dir = TempDir::new().unwrap();
    let a = write_json(dir.path(), "customers.json", &customers());
    let b = write_json(dir.path(), "watchlist.json", &watchlist());
    let out = dir.path().join("out");
    let report = dir.path().join("report.json");

    let mut args = mask_args(vec![a, b]);
    args.output_dir = Some(out.clone());
    args.shared_session = true;
    args.report = Some(report.clone());

    assert_eq!(
        args.execute(&ErmaskConfig::default()).await.unwrap(),
        EXIT_SUCCESS
    );

    let masked = read_json(&out.join("watchlist.masked.json"));
    assert_eq!(masked["RECORDS"][0]["ENTITY_NAME"], "ENTITY_NAME_2");
    assert_eq!(masked["RECORDS"][0]["DATA_SOURCE"], "DATA_SOURCE_2");

    let reports = read_json(&report);
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["documents"], 2);
    assert_eq!(reports[0]["total_tokens"], 7);
    assert!(!std::fs::read_to_string(&report).unwrap().contains("Jane Doe"));
}

#[tokio::test]
async fn test_mask_policy_violation_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let good = write_json(dir.path(), "good.json", &customers());
    let bad = write_json(dir.path(), "bad.json", &json!({"SCORE": 0.75}));
    let out = dir.path().join("out");

    let mut args = mask_args(vec![good, bad]);
    args.output_dir = Some(out.clone());

    let code = args.execute(&ErmaskConfig::default()).await.unwrap();
    assert_eq!(code, EXIT_POLICY_VIOLATION);
    assert!(!out.join("good.masked.json").exists());
}

#[tokio::test]
async fn test_mask_malformed_json_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    std::fs::write(&input, "{\"ENTITY_NAME\": ").unwrap();

    let mut args = mask_args(vec![input]);
    args.output = Some(dir.path().join("out.json"));

    let code = args.execute(&ErmaskConfig::default()).await.unwrap();
    assert_eq!(code, EXIT_FATAL);
}

#[tokio::test]
async fn test_mask_writes_hashed_audit_log() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "customers.json", &customers());
    let audit_path = dir.path().join("audit").join("ermask.log");

    let mut config = ErmaskConfig::default();
    config.audit.enabled = true;
    config.audit.log_path = audit_path.clone();

    let mut args = mask_args(vec![input]);
    args.output = Some(dir.path().join("out.json"));

    assert_eq!(args.execute(&config).await.unwrap(), EXIT_SUCCESS);

    let log = std::fs::read_to_string(&audit_path).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("ENTITY_NAME_1"));
    assert!(!log.contains("John Smith"));
    assert!(!log.contains("CUSTOMERS"));
}

#[tokio::test]
async fn test_unmask_rebuilds_session_from_sources() {
    let dir = TempDir::new().unwrap();
    let a = write_json(dir.path(), "customers.json", &customers());
    let b = write_json(dir.path(), "watchlist.json", &watchlist());

    let text = dir.path().join("summary.txt");
    std::fs::write(
        &text,
        "ENTITY_NAME_2 appears in DATA_SOURCE_1 (RECORD_ID_2) and DATA_SOURCE_2 (RECORD_ID_3).\n",
    )
    .unwrap();
    let output = dir.path().join("summary.unmasked.txt");

    let args = UnmaskArgs {
        sources: vec![a, b],
        shared_session: true,
        text: Some(text),
        json: false,
        output: Some(output.clone()),
    };

    assert_eq!(
        args.execute(&ErmaskConfig::default()).await.unwrap(),
        EXIT_SUCCESS
    );
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Jane Doe appears in CUSTOMERS (1002) and WATCHLIST (W-9).\n"
    );
}

#[tokio::test]
async fn test_unmask_json_rows() {
    let dir = TempDir::new().unwrap();
    let source = write_json(dir.path(), "customers.json", &customers());
    let rows = write_json(
        dir.path(),
        "rows.json",
        &json!([{"person": "ENTITY_NAME_1", "data_source": "DATA_SOURCE_1"}]),
    );
    let output = dir.path().join("rows.unmasked.json");

    let args = UnmaskArgs {
        sources: vec![source],
        shared_session: false,
        text: Some(rows),
        json: true,
        output: Some(output.clone()),
    };

    assert_eq!(
        args.execute(&ErmaskConfig::default()).await.unwrap(),
        EXIT_SUCCESS
    );
    assert_eq!(
        read_json(&output),
        json!([{"person": "John Smith", "data_source": "CUSTOMERS"}])
    );
}

#[tokio::test]
async fn test_unmask_separate_sessions_are_not_merged() {
    let dir = TempDir::new().unwrap();
    let a = write_json(dir.path(), "a.json", &json!({"EMAIL": "a@example.com"}));
    let b = write_json(dir.path(), "b.json", &json!({"EMAIL": "b@example.com"}));
    let text = dir.path().join("summary.txt");
    std::fs::write(&text, "Contact EMAIL_1.\n").unwrap();
    let output = dir.path().join("summary.unmasked.txt");

    let mut args = UnmaskArgs {
        sources: vec![a, b.clone()],
        shared_session: false,
        text: Some(text),
        json: false,
        output: Some(output.clone()),
    };
    assert_eq!(
        args.execute(&ErmaskConfig::default()).await.unwrap(),
        EXIT_CONFIG_ERROR
    );
    assert!(!output.exists());

    args.sources = vec![b];
    assert_eq!(
        args.execute(&ErmaskConfig::default()).await.unwrap(),
        EXIT_SUCCESS
    );
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Contact b@example.com.\n"
    );
}
