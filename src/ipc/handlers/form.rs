use super::sheet::sheet_json;
use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{param_str, param_str_or_empty, respond};
use crate::ipc::types::{AppState, Request};
use crate::record::PersonalField;
use serde_json::json;

fn form_json(state: &AppState) -> serde_json::Value {
    json!({
        "personalInfo": state.form.personal(),
        "sheet": sheet_json(state.form.sheet()),
    })
}

fn handle_update_field(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let key = param_str(req, "field")?;
    let Some(field) = PersonalField::from_key(key) else {
        return Err(HandlerErr::bad_params("unknown personal field")
            .with_details(json!({ "field": key })));
    };
    let value = param_str_or_empty(req, "value")?;
    state.form.update_field(field, value);
    Ok(json!({ "field": field.key(), "value": state.form.personal().get(field) }))
}

// Store failures come back as an error notice, not a protocol error.
fn handle_save(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let outcome = state.form.save(&mut state.store);
    Ok(json!({
        "saved": outcome.record_id.is_some(),
        "recordId": outcome.record_id,
        "notice": outcome.notice,
        "form": form_json(state),
    }))
}

// Navigating to the add-record view tears the record list down.
fn handle_open_new(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    state.browser.detach(&mut state.store);
    state.form.open_new();
    Ok(form_json(state))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "form.get" => Ok(form_json(state)),
        "form.updateField" => handle_update_field(state, req),
        "form.save" => handle_save(state),
        "form.openNew" => handle_open_new(state),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
