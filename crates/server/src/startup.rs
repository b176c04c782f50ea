use axum::Router;
use common::utils::logging::{init_logging, with_bootstrap_logging};
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::auth::service::AuthConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the services to the configured storage backend.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let auth = AuthConfig::new(cfg.auth.jwt_secret.clone(), cfg.auth.token_ttl_hours);
    match cfg.storage.backend {
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            if cfg.database.run_migrations {
                migration::Migrator::up(&db, None).await?;
                info!("migrations applied");
            }
            Ok(ServerState::with_database(db, auth))
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; data is lost on restart");
            Ok(ServerState::in_memory(auth))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(err = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    // config warnings (missing file, dev JWT secret) need a subscriber before the real one exists
    let cfg = with_bootstrap_logging(AppConfig::load_and_validate)?;
    init_logging(cfg.log.format);

    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, backend = ?cfg.storage.backend, "starting quill server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
