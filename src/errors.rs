use axum::http::StatusCode;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum StoreError {
    Read(std::io::Error),
    Write(std::io::Error),
    Malformed(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Read(err) => write!(f, "failed to read blob store: {err}"),
            StoreError::Write(err) => write!(f, "failed to write blob store: {err}"),
            StoreError::Malformed(reason) => write!(f, "stored entries are malformed: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, PartialEq, Eq)]
pub enum EntryError {
    InvalidDate(String),
}

impl Display for EntryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryError::InvalidDate(value) => {
                write!(f, "date must be formatted as YYYY-MM-DD, got '{value}'")
            }
        }
    }
}

impl std::error::Error for EntryError {}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl From<EntryError> for AppError {
    fn from(err: EntryError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
