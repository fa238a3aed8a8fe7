//! Per-IP rate limiting middleware
//!
//! Counts requests per client address in fixed windows through an injected
//! `RequestCounter`, so the same middleware runs on the in-memory counter in
//! a single process or the Redis counter across instances.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderName, HeaderValue},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    time::Duration,
};

use pv_core::services::RequestCounter;
use pv_shared::{error_codes, ErrorResponse, RateLimitConfig};

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Rate limiter middleware factory
#[derive(Clone)]
pub struct IpRateLimiter {
    counter: Arc<dyn RequestCounter>,
    limit: u64,
    window: Duration,
    enabled: bool,
}

impl IpRateLimiter {
    /// Allow `limit` requests per client per `window`
    pub fn new(counter: Arc<dyn RequestCounter>, limit: u64, window: Duration) -> Self {
        Self {
            counter,
            limit,
            window,
            enabled: true,
        }
    }

    pub fn from_config(counter: Arc<dyn RequestCounter>, config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            ..Self::new(
                counter,
                u64::from(config.per_ip_requests),
                Duration::from_secs(config.per_ip_window_seconds),
            )
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for IpRateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = IpRateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IpRateLimiterMiddleware {
            service: Rc::new(service),
            limiter: self.clone(),
        }))
    }
}

/// Rate limiter middleware service
pub struct IpRateLimiterMiddleware<S> {
    service: Rc<S>,
    limiter: IpRateLimiter,
}

impl<S, B> Service<ServiceRequest> for IpRateLimiterMiddleware<S>
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
        let limiter = self.limiter.clone();

        Box::pin(async move {
            if !limiter.enabled {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let ip = client_ip(&req);
            let key = format!("ip:{}", ip);

            let snapshot = match limiter.counter.hit(&key, limiter.window).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    // Fail open while the counter is unavailable
                    tracing::error!(error = %e, "Rate limit counter unavailable, allowing request");
                    return service.call(req).await.map(ServiceResponse::map_into_left_body);
                }
            };

            if snapshot.exceeds(limiter.limit) {
                let retry_after = snapshot.resets_in.as_secs_f64().ceil().max(1.0) as u64;
                tracing::warn!(
                    ip = %ip,
                    count = snapshot.count,
                    limit = limiter.limit,
                    event = "ip_rate_limited",
                    "Per-IP rate limit exceeded"
                );

                let response = HttpResponse::TooManyRequests()
                    .insert_header((header::RETRY_AFTER, retry_after.to_string()))
                    .insert_header((LIMIT_HEADER, limiter.limit.to_string()))
                    .insert_header((REMAINING_HEADER, "0"))
                    .json(
                        ErrorResponse::new(
                            error_codes::TOO_MANY_REQUESTS,
                            format!("Too many requests. Please try again in {} seconds", retry_after),
                        )
                        .add_detail("retry_after_seconds", retry_after),
                    );
                return Ok(req.into_response(response).map_into_right_body());
            }

            let remaining = limiter.limit.saturating_sub(snapshot.count);
            let mut res = service.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(HeaderName::from_static(LIMIT_HEADER), HeaderValue::from(limiter.limit));
            headers.insert(HeaderName::from_static(REMAINING_HEADER), HeaderValue::from(remaining));

            Ok(res.map_into_left_body())
        })
    }
}

/// Client address, honouring `Forwarded` / `X-Forwarded-For` from a proxy
fn client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use pv_core::services::InMemoryRequestCounter;

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_rt::test]
    async fn test_blocks_after_limit() {
        let limiter = IpRateLimiter::new(
            Arc::new(InMemoryRequestCounter::new()),
            2,
            Duration::from_secs(60),
        );
        let app = test::init_service(App::new().wrap(limiter).route("/", web::get().to(ok))).await;

        for expected_remaining in ["1", "0"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
            assert!(resp.status().is_success());
            assert_eq!(resp.headers().get(REMAINING_HEADER).unwrap(), expected_remaining);
        }

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().get(header::RETRY_AFTER).is_some());
    }

    #[actix_rt::test]
    async fn test_clients_are_counted_separately() {
        let limiter = IpRateLimiter::new(
            Arc::new(InMemoryRequestCounter::new()),
            1,
            Duration::from_secs(60),
        );
        let app = test::init_service(App::new().wrap(limiter).route("/", web::get().to(ok))).await;

        for ip in ["10.0.0.1", "10.0.0.2"] {
            let req = test::TestRequest::get()
                .uri("/")
                .insert_header(("X-Forwarded-For", ip))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success(), "first request from {}", ip);
        }
    }

    #[actix_rt::test]
    async fn test_disabled_limiter_passes_through() {
        let config = RateLimitConfig {
            enabled: false,
            per_ip_requests: 1,
            ..RateLimitConfig::default()
        };
        let limiter = IpRateLimiter::from_config(Arc::new(InMemoryRequestCounter::new()), &config);
        let app = test::init_service(App::new().wrap(limiter).route("/", web::get().to(ok))).await;

        for _ in 0..3 {
            let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
            assert!(resp.status().is_success());
            assert!(resp.headers().get(REMAINING_HEADER).is_none());
        }
    }
}
