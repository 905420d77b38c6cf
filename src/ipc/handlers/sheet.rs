use crate::catalog;
use crate::grade_sheet::GradeSheet;
use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{param_str, param_str_or_empty, respond};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

pub fn sheet_json(sheet: &GradeSheet) -> serde_json::Value {
    json!({
        "columns": sheet.columns(),
        "selectedSubjects": sheet.selected_subjects(),
        "rows": sheet.rows(),
        "canRemoveColumn": sheet.columns().len() > 1,
    })
}

fn handle_add_column(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let sheet = state.form.sheet_mut();
    let column_id = sheet.add_column();
    Ok(json!({ "columnId": column_id, "sheet": sheet_json(sheet) }))
}

fn handle_remove_column(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let column_id = param_str(req, "columnId")?;
    let sheet = state.form.sheet_mut();
    let removed = sheet.remove_column(column_id);
    Ok(json!({ "removed": removed, "sheet": sheet_json(sheet) }))
}

fn handle_set_grade(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let column_id = param_str(req, "columnId")?;
    let grade = param_str(req, "grade")?;
    if !catalog::is_elementary_grade(grade) {
        return Err(HandlerErr::bad_params("unknown grade label")
            .with_details(json!({ "grade": grade, "allowed": catalog::ELEMENTARY_GRADES })));
    }
    let updated = state.form.sheet_mut().set_column_grade(column_id, grade);
    Ok(json!({ "updated": updated }))
}

fn handle_set_score(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let column_id = param_str(req, "columnId")?;
    let subject = param_str(req, "subject")?;
    let value = param_str_or_empty(req, "value")?;
    let sheet = state.form.sheet_mut();
    let updated = sheet.set_score(column_id, subject, value);
    Ok(json!({ "updated": updated, "value": sheet.score(column_id, subject) }))
}

fn handle_toggle_subject(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let subject = param_str(req, "subject")?;
    if !catalog::is_toggleable_subject(subject) {
        return Err(HandlerErr::bad_params("subject cannot be toggled")
            .with_details(json!({ "subject": subject })));
    }
    let sheet = state.form.sheet_mut();
    let selected = sheet.toggle_subject(subject);
    Ok(json!({ "selected": selected, "sheet": sheet_json(sheet) }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "sheet.get" => Ok(sheet_json(state.form.sheet())),
        "sheet.addColumn" => handle_add_column(state),
        "sheet.removeColumn" => handle_remove_column(state, req),
        "sheet.setGrade" => handle_set_grade(state, req),
        "sheet.setScore" => handle_set_score(state, req),
        "sheet.toggleSubject" => handle_toggle_subject(state, req),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
