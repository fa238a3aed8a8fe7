//! Session authentication middleware for protected endpoints.
//!
//! Extracts the bearer credential from the Authorization header, verifies it
//! and loads the account through the account service, then injects a
//! `SessionContext` into the request. When the credential is close to expiry
//! a reissued one is returned in the `X-Refreshed-Token` response header.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::{HeaderName, HeaderValue, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use pv_core::domain::{Account, SessionClaims};
use pv_shared::{error_codes, ErrorResponse};

use crate::app::AppState;
use crate::handlers::error::{handle_domain_error, missing_credential};

/// Response header carrying a reissued credential
pub const REFRESHED_TOKEN_HEADER: &str = "x-refreshed-token";

/// Authenticated session injected into requests
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Account as currently stored
    pub account: Account,
    /// Claims of the presented credential
    pub claims: SessionClaims,
}

/// Session authentication middleware factory
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                tracing::error!("Session middleware mounted without application state");
                let response = HttpResponse::InternalServerError().json(ErrorResponse::new(
                    error_codes::INTERNAL_ERROR,
                    "An internal error occurred",
                ));
                return Ok(req.into_response(response).map_into_right_body());
            };

            let Some(token) = extract_bearer_token(&req) else {
                return Ok(req.into_response(missing_credential()).map_into_right_body());
            };

            let authenticated = match state.auth_service.authenticate(&token).await {
                Ok(authenticated) => authenticated,
                Err(e) => {
                    return Ok(req.into_response(handle_domain_error(e)).map_into_right_body());
                }
            };

            let refreshed = state
                .auth_service
                .refresh_if_needed(&authenticated.claims, &authenticated.account);

            req.extensions_mut().insert(SessionContext {
                account: authenticated.account,
                claims: authenticated.claims,
            });

            let mut res = service.call(req).await?;

            if let Some(session) = refreshed {
                if let Ok(value) = HeaderValue::from_str(&session.token) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(REFRESHED_TOKEN_HEADER), value);
                }
            }

            Ok(res.map_into_left_body())
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<SessionContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
