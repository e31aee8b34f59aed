//! Structural and semantic checks for user payloads.
//!
//! Validation works on the decoded JSON body and performs no I/O, so it runs
//! before any hashing or storage work.

use serde_json::{Map, Value};
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 8;

const USER_FIELDS: [&str; 3] = ["name", "password", "email"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validated body of `POST /users/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub password: String,
    pub email: String,
}

/// Validated body of `PATCH /users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub password: Option<String>,
    pub email: Option<Option<String>>,
}

pub fn validate_create_user(body: &Value) -> Result<CreateUser, ValidationError> {
    let obj = as_user_object(body)?;
    let name = required_string(obj, "name")?;
    let password = required_string(obj, "password")?;
    check_password(&password)?;
    let email = required_string(obj, "email")?;
    Ok(CreateUser {
        name,
        password,
        email,
    })
}

pub fn validate_update_user(body: &Value) -> Result<UpdateUser, ValidationError> {
    let obj = as_user_object(body)?;
    let name = match obj.get("name") {
        None => None,
        Some(v) => Some(string_value("name", v)?),
    };
    let password = match obj.get("password") {
        None => None,
        Some(v) => {
            let password = string_value("password", v)?;
            check_password(&password)?;
            Some(password)
        }
    };
    let email = match obj.get("email") {
        None => None,
        Some(Value::Null) => Some(None),
        Some(v) => Some(Some(string_value("email", v)?)),
    };
    Ok(UpdateUser {
        name,
        password,
        email,
    })
}

fn as_user_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    let obj = body
        .as_object()
        .ok_or_else(|| ValidationError::new("body", "expected a JSON object"))?;
    if let Some(unknown) = obj.keys().find(|k| !USER_FIELDS.contains(&k.as_str())) {
        return Err(ValidationError::new(unknown, "unknown field"));
    }
    Ok(obj)
}

fn required_string(obj: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    match obj.get(field) {
        None => Err(ValidationError::new(field, "field required")),
        Some(v) => string_value(field, v),
    }
}

fn string_value(field: &str, value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ValidationError::new(field, "expected a string"))
}

fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new("password", "password is too short"));
    }
    Ok(())
}
