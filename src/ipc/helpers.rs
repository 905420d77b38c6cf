use super::error::HandlerErr;
use super::types::Request;

pub fn param_str<'a>(req: &'a Request, key: &str) -> Result<&'a str, HandlerErr> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn param_str_or_empty<'a>(req: &'a Request, key: &str) -> Result<&'a str, HandlerErr> {
    match req.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(""),
        Some(v) => v
            .as_str()
            .ok_or_else(|| HandlerErr::bad_params(format!("{} must be a string", key))),
    }
}

pub fn respond(id: &str, result: Result<serde_json::Value, HandlerErr>) -> serde_json::Value {
    match result {
        Ok(v) => super::error::ok(id, v),
        Err(e) => e.response(id),
    }
}
