use crate::backup;
use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{param_str, respond};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;
use tracing::{error, info};

fn backup_failed(e: anyhow::Error) -> HandlerErr {
    error!(error = ?e, "workspace backup failed");
    HandlerErr {
        code: "backup_failed",
        message: format!("{e:#}"),
        details: None,
    }
}

fn handle_export(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let out_path = PathBuf::from(param_str(req, "outPath")?);
    let Some(workspace) = state.workspace.clone() else {
        return Err(HandlerErr::no_workspace());
    };
    let summary = backup::export_workspace_bundle(&workspace, &out_path).map_err(backup_failed)?;
    info!(out = %out_path.display(), "workspace exported");
    Ok(json!({
        "outPath": out_path.to_string_lossy(),
        "bundleFormat": summary.bundle_format,
        "dbSha256": summary.db_sha256,
    }))
}

// The store is closed while the database file is swapped, then reopened.
// Browser subscriptions are dropped and come back on the next view.
fn handle_import(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let in_path = PathBuf::from(param_str(req, "inPath")?);
    let Some(workspace) = state.workspace.clone() else {
        return Err(HandlerErr::no_workspace());
    };

    state.browser.detach(&mut state.store);
    state.store.close();
    let imported = backup::import_workspace_bundle(&in_path, &workspace);
    let reopened = state.store.open(&workspace);

    if let Err(e) = reopened {
        error!(error = ?e, "workspace did not reopen after import");
        state.workspace = None;
        return Err(HandlerErr {
            code: "db_open_failed",
            message: format!("{e:?}"),
            details: None,
        });
    }
    let summary = imported.map_err(backup_failed)?;
    info!(from = %in_path.display(), "workspace imported");
    Ok(json!({ "bundleFormatDetected": summary.bundle_format_detected }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "backup.exportWorkspace" => handle_export(state, req),
        "backup.importWorkspace" => handle_import(state, req),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
