use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use pv_api::middleware::IpRateLimiter;
use pv_api::{create_app, telemetry, AppState};
use pv_core::repositories::{AccountRepository, InMemoryAccountRepository};
use pv_core::services::{
    AuthService, AuthServiceConfig, Clock, InMemoryRequestCounter, JwtCodec, PasswordHasher,
    RequestCounter, SessionConfig, SessionIssuer, SweeperConfig, SystemClock, VerificationSweeper,
};
use pv_infra::database::schema::ensure_schema;
use pv_infra::{create_transport, BcryptPasswordHasher, DatabasePool, MySqlAccountRepository};
use pv_infra::{RedisClient, RedisRequestCounter};
use pv_shared::{AppConfig, CounterBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init(&config.logging);

    info!(environment = %config.environment, "Starting phone verification API");

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let accounts: Arc<dyn AccountRepository> = if config.database.is_configured() {
        let pool = DatabasePool::new(config.database.clone())
            .await
            .context("Failed to connect to MySQL")?;
        if config.database.ensure_schema {
            ensure_schema(pool.get_pool()).await?;
        }
        let stats = pool.statistics();
        info!(
            size = stats.size,
            idle = stats.idle,
            max_connections = stats.max_connections,
            "MySQL pool ready"
        );
        Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()))
    } else {
        warn!("DATABASE_URL not set, accounts are kept in memory");
        Arc::new(InMemoryAccountRepository::new())
    };

    let transport = create_transport(&config.sms).context("Failed to create SMS transport")?;
    if config.verification.mock_mode {
        warn!("Mock mode is on, issued codes are returned to callers");
    }

    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::default());

    let codec = JwtCodec::new(&config.jwt.secret, &config.jwt.issuer, &config.jwt.audience);
    let sessions = SessionIssuer::new(Arc::new(codec), SessionConfig::from(&config.jwt));

    let auth_service = Arc::new(AuthService::new(
        accounts.clone(),
        transport,
        hasher,
        sessions,
        clock.clone(),
        AuthServiceConfig::from(&config.verification),
    ));

    let counter: Arc<dyn RequestCounter> = match config.rate_limit.backend {
        CounterBackend::Redis => {
            let url = config.rate_limit.redis_url.as_deref().unwrap_or_default();
            let client = RedisClient::new(url).await.context("Failed to connect to Redis")?;
            Arc::new(RedisRequestCounter::new(client))
        }
        CounterBackend::Memory => Arc::new(InMemoryRequestCounter::with_clock(clock.clone())),
    };

    let sweeper = Arc::new(VerificationSweeper::new(
        accounts,
        clock,
        SweeperConfig {
            interval_seconds: config.verification.sweep_interval_seconds,
            enabled: true,
        },
    ));
    let _sweeper_handle = sweeper.spawn();
    spawn_counter_eviction(counter.clone(), config.rate_limit.per_ip_window_seconds);

    let state = web::Data::new(AppState::new(auth_service));
    let rate_limiter = IpRateLimiter::from_config(counter, &config.rate_limit);

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone(), rate_limiter.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Periodically drop closed windows from the request counter
fn spawn_counter_eviction(counter: Arc<dyn RequestCounter>, window_seconds: u64) {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(Duration::from_secs(window_seconds.max(1)));
        loop {
            timer.tick().await;
            match counter.evict_expired().await {
                Ok(0) => {}
                Ok(evicted) => tracing::debug!(evicted, "Evicted closed rate limit windows"),
                Err(e) => warn!(error = %e, "Failed to evict rate limit windows"),
            }
        }
    });
}
