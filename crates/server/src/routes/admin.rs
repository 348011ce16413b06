use axum::{extract::State, Json};
use service::catalog::ReloadSummary;

use crate::errors::ApiError;
use crate::metrics;
use crate::routes::AppState;

/// Rebuild the catalog from its source and publish it; the old snapshot stays on failure.
pub async fn reload_catalog(State(state): State<AppState>) -> Result<Json<ReloadSummary>, ApiError> {
    let store = state.catalog.clone();
    let result = tokio::task::spawn_blocking(move || store.reload())
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    match result {
        Ok(summary) => {
            metrics::record_reload("ok");
            metrics::set_catalog_size(summary.locations);
            Ok(Json(summary))
        }
        Err(e) => {
            metrics::record_reload("failed");
            Err(ApiError::Reload(e))
        }
    }
}
