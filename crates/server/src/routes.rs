use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::catalog::CatalogStore;

use crate::metrics;

pub mod admin;
pub mod locations;

/// Shared handler state: the published catalog snapshot holder.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogStore>) -> Self { Self { catalog } }
}

pub async fn index() -> &'static str {
    "Locations Service is running"
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router: public lookups, admin reload and metrics
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler));

    let lookups = Router::new()
        .route("/locations", get(locations::by_beer))
        .route("/locations/all", get(locations::all));

    let admin_routes = Router::new()
        .route("/admin/catalog/reload", post(admin::reload_catalog));

    public
        .merge(lookups)
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{body::Body, http::Request, Router};
    use service::catalog::{CatalogSource, CatalogStore, LookupIndex};
    use tower::ServiceExt;

    use super::{build_router, AppState};

    pub fn router_for(json: serde_json::Value) -> Router {
        let catalog = serde_json::from_value(json).expect("catalog");
        let index = LookupIndex::build(catalog, "Beers").expect("index");
        let store = CatalogStore::with_index(CatalogSource::new("unused.json", "Beers"), index);
        build_router(AppState::new(store), tower_http::cors::CorsLayer::very_permissive())
    }

    pub fn router_with_store(store: Arc<CatalogStore>) -> Router {
        build_router(AppState::new(store), tower_http::cors::CorsLayer::very_permissive())
    }

    pub async fn send(app: Router, method: &str, uri: &str) -> (axum::http::StatusCode, serde_json::Value) {
        let req = Request::builder().method(method).uri(uri).body(Body::empty()).expect("request");
        let res = app.oneshot(req).await.expect("infallible");
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::test_support::{router_for, send};

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = send(router_for(json!([])), "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn metrics_are_exposed() {
        let app = router_for(json!([]));
        let req = axum::http::Request::builder().uri("/metrics").body(axum::body::Body::empty()).unwrap();
        let res = tower::ServiceExt::oneshot(app, req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
