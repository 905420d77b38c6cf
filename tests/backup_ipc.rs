use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_recordbookd");
    let mut child = Command::new(exe)
        .env_remove("RECORDBOOKD_WORKSPACE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn recordbookd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn card_names(view: &serde_json::Value) -> Vec<String> {
    view.get("records")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| {
            r.get("displayName")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        })
        .collect()
}

#[test]
fn exported_bundle_restores_deleted_records() {
    let workspace = temp_dir("recordbook-backup-ipc");
    let out_dir = temp_dir("recordbook-backup-ipc-out");
    let bundle = out_dir.join("workspace.zip");

    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "form.updateField",
        json!({ "field": "name", "value": "Omar" }),
    );
    let saved = request_ok(&mut stdin, &mut reader, "3", "form.save", json!({}));
    let record_id = saved
        .get("recordId")
        .and_then(|v| v.as_str())
        .expect("recordId")
        .to_string();

    let export = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "backup.exportWorkspace",
        json!({ "outPath": bundle.to_string_lossy() }),
    );
    assert_eq!(
        export.get("bundleFormat").and_then(|v| v.as_str()),
        Some("recordbook-workspace-v1")
    );
    assert!(bundle.is_file());

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "browser.requestDelete",
        json!({ "recordId": record_id }),
    );
    let _ = request_ok(&mut stdin, &mut reader, "6", "browser.confirmDelete", json!({}));
    let view = request_ok(&mut stdin, &mut reader, "7", "browser.view", json!({}));
    assert!(card_names(&view).is_empty());

    let import = request_ok(
        &mut stdin,
        &mut reader,
        "8",
        "backup.importWorkspace",
        json!({ "inPath": bundle.to_string_lossy() }),
    );
    assert_eq!(
        import.get("bundleFormatDetected").and_then(|v| v.as_str()),
        Some("recordbook-workspace-v1")
    );
    let view = request_ok(&mut stdin, &mut reader, "9", "browser.view", json!({}));
    assert_eq!(card_names(&view), vec!["Omar"]);

    let health = request_ok(&mut stdin, &mut reader, "10", "health", json!({}));
    assert_eq!(health.get("recordCount").and_then(|v| v.as_u64()), Some(1));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
    let _ = std::fs::remove_dir_all(out_dir);
}

#[test]
fn export_without_workspace_is_refused() {
    let out_dir = temp_dir("recordbook-backup-ipc-none");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "backup.exportWorkspace",
        json!({ "outPath": out_dir.join("x.zip").to_string_lossy() }),
    );
    assert_eq!(
        resp.get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("no_workspace")
    );
    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(out_dir);
}
