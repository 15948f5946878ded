use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Field name mapped to a human-readable message; empty means valid input.
pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", first_message(.0))]
    Validation(FieldErrors),
    #[error("Email is already registered.")]
    DuplicateEmail,
    /// Deliberately the same message for unknown email and wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Farmer not found.")]
    NotFound,
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field, message.into());
        ApiError::Validation(errors)
    }
}

fn first_message(errors: &FieldErrors) -> String {
    errors
        .values()
        .next()
        .cloned()
        .unwrap_or_else(|| "Invalid input.".into())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::DuplicateEmail => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &self {
            // internal detail goes to the log, not the client
            ApiError::Store(e) => {
                error!(error = %e, "store failure");
                "Internal server error.".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_displays_first_field_message() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Please enter a valid Gmail address.".into());
        errors.insert("password", "Password too weak.".into());
        let err = ApiError::Validation(errors);
        assert_eq!(err.to_string(), "Please enter a valid Gmail address.");
    }

    #[test]
    fn invalid_credentials_message_is_generic() {
        assert_eq!(ApiError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn variants_map_to_expected_status_codes() {
        let cases = [
            (ApiError::Validation(FieldErrors::new()), StatusCode::BAD_REQUEST),
            (ApiError::DuplicateEmail, StatusCode::BAD_REQUEST),
            (ApiError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (ApiError::Unauthorized("Missing Authorization header"), StatusCode::UNAUTHORIZED),
            (ApiError::NotFound, StatusCode::NOT_FOUND),
            (ApiError::Store(anyhow::anyhow!("pool closed")), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
