use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{ConfirmCodeRequest, SessionResponse};
use crate::handlers::error::{handle_domain_error, validation_error};

/// Handler for POST /api/v1/auth/confirm-code
///
/// Confirms the outstanding code, marks the phone verified and issues a
/// session that carries the verified claim.
///
/// # Request Body
///
/// ```json
/// { "phone": "+15551230000", "code": "482913" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `NO_CODE_ISSUED`, `CODE_EXPIRED` or `CODE_MISMATCH`
/// - 403 Forbidden: Account disabled
pub async fn confirm_code(
    state: web::Data<AppState>,
    request: web::Json<ConfirmCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match state
        .auth_service
        .confirm_code(&request.phone, &request.code)
        .await
    {
        Ok(grant) => HttpResponse::Ok().json(ApiResponse::success(SessionResponse::from(grant))),
        Err(error) => handle_domain_error(error),
    }
}
