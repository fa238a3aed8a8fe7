use actix_web::HttpResponse;

use pv_shared::ApiResponse;

use crate::dto::auth::MeResponse;
use crate::middleware::session::SessionContext;

/// Handler for GET /api/v1/auth/me
///
/// Requires a bearer credential. Returns the stored account alongside the
/// verification state the credential itself claims.
pub async fn me(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(MeResponse {
        account: session.account.summary(),
        session_phone_verified: session.claims.is_phone_verified,
        session_expires_at: session.claims.expires_at(),
    }))
}
