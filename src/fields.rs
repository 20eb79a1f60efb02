//! Declarative form fields and the validation that turns a submitted form
//! into the JSON body sent to the REST API.
//!
//! Every entity form (create and update) is described by a list of
//! [`FieldSpec`]s, so there is exactly one parsing path for all of them.
//! Nothing reaches the API unless every field validates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Integer,
    Date,
    Role,
    /// Id of another record (user, task).
    Reference,
}

impl FieldKind {
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Reference | FieldKind::Role => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Integer => "number",
            FieldKind::Date => "date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: true }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be a whole number, got {value:?}")]
    NotInteger { field: &'static str, value: String },

    #[error("{field} must be a date, got {value:?}")]
    BadDate { field: &'static str, value: String },

    #[error("{field} must be admin or regular, got {value:?}")]
    BadRole { field: &'static str, value: String },

    #[error("{0} must be an email address")]
    BadEmail(&'static str),

    #[error("passwords do not match")]
    PasswordMismatch,
}

pub fn build_payload(
    fields: &[FieldSpec],
    submitted: &HashMap<String, String>,
) -> Result<Map<String, Value>, FieldError> {
    let mut payload = Map::new();
    for field in fields {
        let raw = submitted
            .get(field.name)
            .map(|v| v.trim())
            .unwrap_or("");

        if raw.is_empty() {
            if field.required {
                return Err(FieldError::Missing(field.name));
            }
            continue;
        }

        payload.insert(field.name.to_string(), parse_value(field, raw)?);
    }
    Ok(payload)
}

/// Id of the record an update or delete targets.
pub fn required_id(submitted: &HashMap<String, String>) -> Result<String, FieldError> {
    submitted
        .get("id")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(FieldError::Missing("id"))
}

fn parse_value(field: &FieldSpec, raw: &str) -> Result<Value, FieldError> {
    match field.kind {
        FieldKind::Text | FieldKind::Password | FieldKind::Reference => {
            Ok(Value::String(raw.to_string()))
        }
        FieldKind::Email => {
            // Only a sanity check; the user service owns real validation.
            match raw.split_once('@') {
                Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                    Ok(Value::String(raw.to_string()))
                }
                _ => Err(FieldError::BadEmail(field.name)),
            }
        }
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| FieldError::NotInteger {
                field: field.name,
                value: raw.to_string(),
            }),
        FieldKind::Date => parse_date(raw)
            .map(|d| Value::String(d.to_rfc3339_opts(SecondsFormat::Secs, true)))
            .ok_or_else(|| FieldError::BadDate {
                field: field.name,
                value: raw.to_string(),
            }),
        FieldKind::Role => match raw {
            "admin" | "regular" => Ok(Value::String(raw.to_string())),
            _ => Err(FieldError::BadRole {
                field: field.name,
                value: raw.to_string(),
            }),
        },
    }
}

// Accepts <input type="date">, <input type="datetime-local"> and RFC 3339.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|d| d.and_utc());
    }
    if let Ok(local) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(local.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
