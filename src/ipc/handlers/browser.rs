use crate::browser::BrowserView;
use crate::catalog;
use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{param_str, param_str_or_empty, respond};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use tracing::error;

// Subscribes on first use and applies any pushed snapshot. With no open
// workspace the browser stays in its loading state.
fn sync(state: &mut AppState) -> Result<(), HandlerErr> {
    if !state.store.is_open() {
        return Ok(());
    }
    state.browser.refresh();
    if !state.browser.is_attached() {
        if let Err(e) = state.browser.attach(&mut state.store) {
            error!(error = %e, "record browser could not subscribe");
            return Err(HandlerErr {
                code: "store_read_failed",
                message: e.to_string(),
                details: None,
            });
        }
        state.browser.refresh();
    }
    Ok(())
}

fn view_json(state: &AppState) -> serde_json::Value {
    let pending = state.browser.pending_delete();
    let view = state.browser.view();
    let empty = view.is_empty_state();
    let empty_message = empty.then_some(catalog::MSG_EMPTY);
    match view {
        BrowserView::Loading => json!({
            "loading": true,
            "loadingMessage": catalog::MSG_LOADING,
            "query": state.browser.query(),
            "pendingDelete": pending,
        }),
        BrowserView::Ready { cards, total } => json!({
            "loading": false,
            "records": cards,
            "total": total,
            "emptyState": empty,
            "emptyMessage": empty_message,
            "query": state.browser.query(),
            "pendingDelete": pending,
        }),
    }
}

fn handle_view(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    sync(state)?;
    Ok(view_json(state))
}

fn handle_search(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let query = param_str_or_empty(req, "query")?.to_string();
    state.browser.search(query);
    sync(state)?;
    Ok(view_json(state))
}

fn handle_request_delete(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let record_id = param_str(req, "recordId")?;
    state.browser.request_delete(record_id);
    Ok(json!({ "pendingDelete": state.browser.pending_delete() }))
}

fn handle_cancel_delete(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    state.browser.cancel_delete();
    Ok(json!({ "pendingDelete": state.browser.pending_delete() }))
}

fn handle_close(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let was_attached = state.browser.is_attached();
    state.browser.detach(&mut state.store);
    Ok(json!({ "detached": was_attached }))
}

fn handle_confirm_delete(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let notice = state.browser.confirm_delete(&mut state.store);
    let deleted = notice.as_ref().map(|n| !n.is_error()).unwrap_or(false);
    state.browser.refresh();
    Ok(json!({
        "deleted": deleted,
        "notice": notice,
        "pendingDelete": state.browser.pending_delete(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "browser.view" => handle_view(state),
        "browser.search" => handle_search(state, req),
        "browser.requestDelete" => handle_request_delete(state, req),
        "browser.cancelDelete" => handle_cancel_delete(state),
        "browser.confirmDelete" => handle_confirm_delete(state),
        "browser.close" => handle_close(state),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
