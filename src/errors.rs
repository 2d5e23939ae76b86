use axum::http::StatusCode;
use thiserror::Error;

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
        match err {
            StoreError::NotFound(_) => Self::not_found(err.to_string()),
            StoreError::Invalid(_) => Self::bad_request(err.to_string()),
            StoreError::Io(_) | StoreError::Encode(_) => Self::internal(err),
        }
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Add/edit form rejected before anything is saved.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("course name is required")]
    MissingCourse,
    #[error("score for {0} is missing")]
    MissingScore(&'static str),
    #[error("score for {player} must be positive, got {score}")]
    NonPositiveScore { player: &'static str, score: i32 },
    #[error("{0} is listed more than once")]
    DuplicatePlayer(&'static str),
    #[error("round id is empty")]
    EmptyId,
    #[error("round id {0} is used more than once")]
    DuplicateId(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("round {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("failed to write rounds: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode rounds: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Backup file rejected; the store is left untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("backup file is not valid JSON: {0}")]
    Parse(serde_json::Error),
    #[error("backup file must contain a list of rounds")]
    NotAnArray,
    #[error("round #{index} is invalid: {reason}")]
    Schema { index: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("commentary is disabled: no API key configured")]
    Disabled,
    #[error("commentary request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("commentary API returned {0}")]
    Status(reqwest::StatusCode),
    #[error("commentary response had no text")]
    EmptyResponse,
}
