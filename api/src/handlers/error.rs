//! Mapping from domain errors to HTTP responses
//!
//! Every error body is a `pv_shared::ErrorResponse` carrying the stable
//! machine code from `error_code()`. Store and other internal failures are
//! reported as a generic 500 without detail.

use actix_web::{
    error::InternalError,
    http::{header, StatusCode},
    web, HttpResponse,
};
use serde_json::json;
use validator::ValidationErrors;

use pv_core::errors::{AuthError, DomainError, TokenError};
use pv_shared::{error_codes, ErrorResponse};

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Internal { .. } | DomainError::Database { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidPhoneFormat { .. }
            | AuthError::NoCodeIssued
            | AuthError::CodeExpired
            | AuthError::CodeMismatch => StatusCode::BAD_REQUEST,
            AuthError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            AuthError::TransportFailure => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::DuplicateAccount => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::AccountNotFound => StatusCode::UNAUTHORIZED,
            AuthError::AccountDisabled => StatusCode::FORBIDDEN,
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::Expired | TokenError::Malformed | TokenError::Invalid => {
                StatusCode::UNAUTHORIZED
            }
            TokenError::GenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let status = status_for(&error);

    if error.is_user_facing() {
        tracing::debug!(code = error.error_code(), error = %error, "Request rejected");
    } else {
        tracing::error!(error = %error, "Request failed with internal error");
    }

    let body = match &error {
        DomainError::Auth(AuthError::RateLimitExceeded { minutes }) => ErrorResponse::new(
            error.error_code(),
            format!("Too many code requests. Please try again in {} minutes", minutes),
        )
        .add_detail("retry_after_minutes", minutes),
        DomainError::Auth(AuthError::TransportFailure) => ErrorResponse::new(
            error.error_code(),
            "The verification code could not be delivered. Please try again",
        ),
        DomainError::Token(TokenError::GenerationFailed) => {
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
        }
        _ if error.is_user_facing() => ErrorResponse::new(error.error_code(), error.to_string()),
        _ => ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
    };

    let mut builder = HttpResponse::build(status);
    if let DomainError::Auth(AuthError::RateLimitExceeded { minutes }) = &error {
        builder.insert_header((header::RETRY_AFTER, (u64::from(*minutes) * 60).to_string()));
    }
    if status == StatusCode::UNAUTHORIZED && matches!(error, DomainError::Token(_)) {
        builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
    }
    builder.json(body)
}

/// 400 response for a request body that failed field validation
pub fn validation_error(errors: &ValidationErrors) -> HttpResponse {
    let fields: serde_json::Map<String, serde_json::Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), json!(messages))
        })
        .collect();

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("fields", fields),
    )
}

/// 401 response for a request without a usable bearer credential
pub fn missing_credential() -> HttpResponse {
    HttpResponse::Unauthorized()
        .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
        .json(ErrorResponse::new(
            error_codes::CREDENTIAL_MISSING,
            "Missing or invalid Authorization header",
        ))
}

/// JSON extractor configuration rendering body errors as `VALIDATION_ERROR`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::VALIDATION_ERROR,
                format!("Invalid request body: {}", err),
            ));
            InternalError::from_response(err, response).into()
        })
}
