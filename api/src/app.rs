//! Application state and factory
//!
//! This module holds the shared application state and builds the Actix-web
//! application with its middleware and routes.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use pv_core::repositories::AccountRepository;
use pv_core::services::{AuthService, MessageTransport, PasswordHasher};
use pv_shared::{error_codes, ErrorResponse};

use crate::handlers::error::json_config;
use crate::middleware::{rate_limit::IpRateLimiter, session::SessionAuth};
use crate::routes::auth::{confirm_code, login, me, register, request_code};

/// Account service over type-erased collaborators
pub type DynAuthService = AuthService<dyn AccountRepository, dyn MessageTransport, dyn PasswordHasher>;

/// Application state that holds shared services
pub struct AppState {
    pub auth_service: Arc<DynAuthService>,
}

impl AppState {
    pub fn new(auth_service: Arc<DynAuthService>) -> Self {
        Self { auth_service }
    }
}

/// Create and configure the application with all dependencies
///
/// The per-IP limiter wraps the whole auth scope; `/me` additionally sits
/// behind the session middleware.
pub fn create_app(
    app_state: web::Data<AppState>,
    rate_limiter: IpRateLimiter,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(json_config())
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .wrap(rate_limiter)
                    .route("/request-code", web::post().to(request_code::request_code))
                    .route("/confirm-code", web::post().to(confirm_code::confirm_code))
                    .route("/register", web::post().to(register::register))
                    .route("/login", web::post().to(login::login))
                    .service(
                        web::resource("/me")
                            .wrap(SessionAuth)
                            .route(web::get().to(me::me)),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "phone-verify-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
