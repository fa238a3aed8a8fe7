use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_shared::phone::mask_phone_number;
use pv_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{RequestCodeRequest, RequestCodeResponse};
use crate::handlers::error::{handle_domain_error, validation_error};

/// Handler for POST /api/v1/auth/request-code
///
/// Issues a verification code to the phone number.
///
/// # Request Body
///
/// ```json
/// { "phone": "+15551230000" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "message": "Verification code sent",
///         "expires_in": 120,
///         "expires_at": "2024-05-01T08:02:00Z",
///         "attempts_remaining": 4,
///         "code": "482913"
///     },
///     "timestamp": "2024-05-01T08:00:00Z"
/// }
/// ```
/// `code` is only present in mock mode.
///
/// ## Errors
/// - 400 Bad Request: Invalid phone number
/// - 403 Forbidden: Account disabled
/// - 429 Too Many Requests: Code request cap reached, see `Retry-After`
/// - 503 Service Unavailable: Delivery failed; the issued code stays valid
pub async fn request_code(
    state: web::Data<AppState>,
    request: web::Json<RequestCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    tracing::info!(phone = %mask_phone_number(&request.phone), "Processing code request");

    match state.auth_service.request_code(&request.phone).await {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::success(RequestCodeResponse::from(result))),
        Err(error) => handle_domain_error(error),
    }
}
