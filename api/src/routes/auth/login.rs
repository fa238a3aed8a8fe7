use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{LoginRequest, SessionResponse};
use crate::handlers::error::{handle_domain_error, validation_error};

/// Handler for POST /api/v1/auth/login
///
/// ## Errors
/// - 401 Unauthorized: Unknown number or wrong password
/// - 403 Forbidden: Account disabled
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match state
        .auth_service
        .login(&request.phone, &request.password)
        .await
    {
        Ok(grant) => HttpResponse::Ok().json(ApiResponse::success(SessionResponse::from(grant))),
        Err(error) => handle_domain_error(error),
    }
}
