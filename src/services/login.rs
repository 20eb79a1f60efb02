use serde_json::{Deserializer, Map, Value};
use crate::errors::{ApiError, ApiResult};
use crate::models::{Role, SessionUser};

/// Reads the body of `POST /auth/login`.
///
/// The user service answers with two JSON documents written back to back,
/// `{"token": ...}` followed by the user record, rather than one object.
/// The body is read as a stream of JSON values and every top-level object
/// (and a nested `user` object, if a future backend sends one) is merged,
/// first occurrence winning. A single object carrying everything works too.
pub fn parse_login_response(body: &str, submitted_username: &str) -> ApiResult<SessionUser> {
    let mut merged = Map::new();
    let mut documents = 0;

    for value in Deserializer::from_str(body).into_iter::<Value>() {
        let object = match value? {
            Value::Object(object) => object,
            other => {
                return Err(ApiError::Malformed(format!(
                    "expected a JSON object in login response, found {}",
                    other
                )))
            }
        };
        documents += 1;
        merge_into(&mut merged, object);
    }

    if documents == 0 {
        return Err(ApiError::Malformed("empty login response".into()));
    }

    let token = merged
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Malformed("login response carried no token".into()))?
        .to_string();

    let user_id = ["id", "_id", "userID"]
        .iter()
        .find_map(|key| merged.get(*key).and_then(scalar_to_string));

    let user_name = merged
        .get("username")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| Some(submitted_username.to_string()).filter(|u| !u.is_empty()));

    let role = merged.get("role").and_then(Value::as_str).and_then(Role::parse);

    Ok(SessionUser { token, user_id, user_name, role })
}

fn merge_into(merged: &mut Map<String, Value>, object: Map<String, Value>) {
    for (key, value) in object {
        match (key.as_str(), value) {
            ("user", Value::Object(nested)) => merge_into(merged, nested),
            (_, value) => {
                merged.entry(key).or_insert(value);
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
