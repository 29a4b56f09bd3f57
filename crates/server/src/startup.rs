use std::net::SocketAddr;

use axum::Router;
use common::env::ensure_env;
use configs::AppConfig;
use service::auth::AuthConfig;
use service::{Repositories, Services};
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Connect, migrate, seed and wire the services described by `cfg`.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::run_migrations(&db).await?;

    let services = Services::new(
        Repositories::seaorm(db),
        AuthConfig { jwt_secret: cfg.auth.jwt_secret.clone(), token_ttl_secs: cfg.auth.token_ttl_secs },
        cfg.booking.slot_minutes,
    );
    if cfg.booking.seed_defaults {
        services.seed_defaults().await?;
    }
    if let Some(admin) = &cfg.auth.bootstrap_admin {
        services
            .auth
            .ensure_admin(&admin.username, &admin.password, &admin.email, &admin.name)
            .await?;
    }
    Ok(ServerState { services, secure_cookies: cfg.auth.secure_cookies })
}

/// Public entry: build the app and run the HTTP server until `shutdown` resolves
pub async fn run_with_shutdown(
    cfg: AppConfig,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    ensure_env(&cfg.server.static_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    if cfg.auth.uses_dev_secret() {
        warn!("JWT_SECRET not set, using the development secret");
    }

    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, &cfg.server.static_dir);

    let addr: SocketAddr = tokio::net::lookup_host(cfg.server.bind_addr())
        .await?
        .next()
        .ok_or_else(|| StartupError::InvalidConfig(format!("cannot resolve {}", cfg.server.bind_addr())))?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}
