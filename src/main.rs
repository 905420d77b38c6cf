mod backup;
mod browser;
mod catalog;
mod config;
mod db;
mod form;
mod grade_sheet;
mod ipc;
mod notice;
mod record;
mod store;

use serde_json::json;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

fn main() {
    let cfg = config::Config::from_env();
    config::init_tracing(&cfg);
    info!(version = env!("CARGO_PKG_VERSION"), "recordbookd starting");

    let mut state = ipc::AppState::new();
    if let Some(path) = cfg.workspace.clone() {
        // A bad startup workspace leaves the daemon usable; the UI can pick another.
        if let Err(e) = ipc::open_workspace(&mut state, path) {
            warn!(error = ?e, "startup workspace not opened");
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                warn!(error = %e, "unparseable request line");
                let _ = writeln!(
                    stdout,
                    "{}",
                    json!({ "ok": false, "error": { "code": "bad_json", "message": e.to_string() } })
                );
                let _ = stdout.flush();
                continue;
            }
        };

        debug!(id = %req.id, method = %req.method, "request");
        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    state.close_workspace();
    info!("recordbookd stopped");
}
