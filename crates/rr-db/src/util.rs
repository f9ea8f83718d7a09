use chrono::{DateTime, Utc};
use rr_core::RoadRemoteError;
use rr_core::error::{RequestError, VolunteerError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("json encode failed: {message}")]
    JsonEncode { message: String },
    #[error("json decode failed: {message}")]
    JsonDecode { message: String },
    #[error("invalid enum value: {value}")]
    InvalidEnum { value: String },
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
    #[error("invalid column {column}: {message}")]
    InvalidColumn {
        column: &'static str,
        message: String,
    },
}

impl From<DbError> for RequestError {
    fn from(value: DbError) -> Self {
        RequestError::InvalidInput {
            message: value.to_string(),
        }
    }
}

impl From<DbError> for VolunteerError {
    fn from(value: DbError) -> Self {
        VolunteerError::InvalidInput {
            message: value.to_string(),
        }
    }
}

impl From<DbError> for RoadRemoteError {
    fn from(value: DbError) -> Self {
        RoadRemoteError::Internal {
            message: value.to_string(),
        }
    }
}

pub fn to_rfc3339(value: &DateTime<Utc>) -> String {
    value.to_rfc3339()
}

pub fn from_rfc3339(value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DbError::InvalidTimestamp {
            value: value.to_string(),
        })
}

pub fn encode_json<T: Serialize>(value: &T) -> Result<String, DbError> {
    serde_json::to_string(value).map_err(|err| DbError::JsonEncode {
        message: err.to_string(),
    })
}

pub fn decode_json<T: DeserializeOwned>(value: &str) -> Result<T, DbError> {
    serde_json::from_str(value).map_err(|err| DbError::JsonDecode {
        message: err.to_string(),
    })
}

/// Unit enums are stored as their serde name (`"garage"`, `"Pending"`).
pub fn encode_enum<T: Serialize>(value: &T) -> Result<String, DbError> {
    match serde_json::to_value(value).map_err(|err| DbError::JsonEncode {
        message: err.to_string(),
    })? {
        Value::String(value) => Ok(value),
        other => Err(DbError::InvalidEnum {
            value: other.to_string(),
        }),
    }
}

pub fn decode_enum<T: DeserializeOwned>(value: &str) -> Result<T, DbError> {
    serde_json::from_value(Value::String(value.to_string())).map_err(|_| DbError::InvalidEnum {
        value: value.to_string(),
    })
}

/// Primary key or UNIQUE collisions only. NOT NULL, CHECK and foreign key
/// failures share the primary code and are not conflicts.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == rusqlite::ErrorCode::ConstraintViolation
                && matches!(
                    inner.extended_code,
                    rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                )
    )
}

/// `?1, ?2, ...` starting after `offset` existing parameters.
pub fn placeholders(offset: usize, count: usize) -> String {
    (offset + 1..=offset + count)
        .map(|idx| format!("?{idx}"))
        .collect::<Vec<_>>()
        .join(", ")
}
