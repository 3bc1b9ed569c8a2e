use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::store::StoreError;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound,
    DuplicateEmail,
    Storage(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    msg: String,
}

impl AppError {
    // The text the client sees; internal detail stays in the Display impl.
    fn client_msg(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound => "Employee details could not found!".to_string(),
            AppError::DuplicateEmail => "Email already exist!".to_string(),
            AppError::Storage(_) | AppError::Internal(_) => "Internal Server Error!".to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation: {}", msg),
            AppError::NotFound => write!(f, "Not Found: no employee with that id"),
            AppError::DuplicateEmail => write!(f, "Conflict: email already taken"),
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse { msg: self.client_msg() };
        match self {
            AppError::Validation(_) | AppError::NotFound | AppError::DuplicateEmail => {
                HttpResponse::Forbidden().json(body)
            }
            AppError::Storage(_) | AppError::Internal(_) => {
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound,
            StoreError::DuplicateEmail => AppError::DuplicateEmail,
            StoreError::Corrupt(e) => AppError::Storage(e.to_string()),
            StoreError::Io(e) => AppError::Storage(e.to_string()),
        }
    }
}
