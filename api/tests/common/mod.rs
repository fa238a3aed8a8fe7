//! Shared wiring for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use chrono::{TimeZone, Utc};

use pv_api::middleware::IpRateLimiter;
use pv_api::{AppState, DynAuthService};
use pv_core::repositories::{AccountRepository, InMemoryAccountRepository};
use pv_core::services::{
    AuthService, AuthServiceConfig, Clock, InMemoryRequestCounter, JwtCodec, MessageTransport,
    MockClock, PasswordHasher, RequestCounter, SessionConfig, SessionIssuer,
};
use pv_infra::{BcryptPasswordHasher, MockTransport};

pub const PHONE: &str = "+15551230000";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub limiter: IpRateLimiter,
    pub clock: Arc<MockClock>,
    pub transport: MockTransport,
    pub accounts: Arc<InMemoryAccountRepository>,
}

/// Mock-mode service over in-memory collaborators and a fixed clock
pub fn context() -> TestContext {
    context_with_ip_limit(1_000)
}

pub fn context_with_ip_limit(limit: u64) -> TestContext {
    let clock = Arc::new(MockClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
    ));
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let transport = MockTransport::new();

    let session_config = SessionConfig::default();
    let codec = JwtCodec::new("http-test-secret", &session_config.issuer, &session_config.audience);
    let sessions = SessionIssuer::new(Arc::new(codec), session_config);

    let accounts_dyn: Arc<dyn AccountRepository> = accounts.clone();
    let transport_dyn: Arc<dyn MessageTransport> = Arc::new(transport.clone());
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::new(4));
    let clock_dyn: Arc<dyn Clock> = clock.clone();

    let service: DynAuthService = AuthService::new(
        accounts_dyn,
        transport_dyn,
        hasher,
        sessions,
        clock_dyn.clone(),
        AuthServiceConfig {
            mock_mode: true,
            ..Default::default()
        },
    );

    let counter: Arc<dyn RequestCounter> = Arc::new(InMemoryRequestCounter::with_clock(clock_dyn));
    let limiter = IpRateLimiter::new(counter, limit, Duration::from_secs(60));

    TestContext {
        state: web::Data::new(AppState::new(Arc::new(service))),
        limiter,
        clock,
        transport,
        accounts,
    }
}
