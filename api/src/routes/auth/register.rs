use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{RegisterRequest, SessionResponse};
use crate::handlers::error::{handle_domain_error, validation_error};

/// Handler for POST /api/v1/auth/register
///
/// Sets a password for the phone number and issues an unverified session.
///
/// ## Errors
/// - 400 Bad Request: Invalid phone number or password length
/// - 409 Conflict: The number already has a password
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match state
        .auth_service
        .register(&request.phone, &request.password)
        .await
    {
        Ok(grant) => HttpResponse::Created().json(ApiResponse::success(SessionResponse::from(grant))),
        Err(error) => handle_domain_error(error),
    }
}
