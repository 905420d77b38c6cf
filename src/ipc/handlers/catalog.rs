use crate::catalog;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::record::PersonalField;
use serde_json::json;

fn handle_catalog_get(req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "subjects": catalog::SUBJECTS,
            "toggleableSubjects": catalog::toggleable_subjects(),
            "summaryRows": catalog::summary_rows(),
            "grades": catalog::ELEMENTARY_GRADES,
            "allGrades": catalog::ALL_GRADES,
            "personalFields": PersonalField::ALL.iter().map(|f| f.key()).collect::<Vec<_>>(),
            "messages": {
                "saveOk": catalog::MSG_SAVE_OK,
                "saveFailed": catalog::MSG_SAVE_FAILED,
                "deleteOk": catalog::MSG_DELETE_OK,
                "deleteFailed": catalog::MSG_DELETE_FAILED,
                "loading": catalog::MSG_LOADING,
                "empty": catalog::MSG_EMPTY,
            }
        }),
    )
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "catalog.get" => Some(handle_catalog_get(req)),
        _ => None,
    }
}
