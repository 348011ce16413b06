use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, CatalogConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use service::catalog::{CatalogSource, CatalogStore};

use crate::errors::StartupError;
use crate::metrics;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {e}", server.host, server.port)))
}

/// Load the catalog named in the config; the service does not start without it.
pub fn open_catalog(catalog: &CatalogConfig) -> Result<Arc<CatalogStore>, StartupError> {
    let source = CatalogSource::new(&catalog.locations_path, &catalog.tag_field);
    let store = CatalogStore::open(source)?;
    metrics::set_catalog_size(store.snapshot().len());
    Ok(store)
}

/// Assemble the application router around a loaded catalog.
pub fn build_app(store: Arc<CatalogStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: load the catalog and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::check_catalog_source(&cfg.catalog.locations_path).await;
    let store = open_catalog(&cfg.catalog)?;
    let app = build_app(store);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting locations service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_bad_host() {
        let server = ServerConfig { host: "not a host".into(), ..ServerConfig::default() };
        assert!(matches!(bind_addr(&server), Err(StartupError::InvalidConfig(_))));
        let server = ServerConfig { host: "0.0.0.0".into(), port: 8088, ..ServerConfig::default() };
        assert_eq!(bind_addr(&server).unwrap().port(), 8088);
    }

    #[test]
    fn missing_catalog_aborts_startup() {
        let catalog = CatalogConfig {
            locations_path: std::env::temp_dir().join(format!("absent_{}.json", uuid::Uuid::new_v4())),
            ..CatalogConfig::default()
        };
        assert!(matches!(open_catalog(&catalog), Err(StartupError::Catalog(_))));
    }
}
