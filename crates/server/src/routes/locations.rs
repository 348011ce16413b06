use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::errors::ApiError;
use crate::metrics;
use crate::routes::AppState;

const BEER_PARAM: &str = "beerName";

/// First value of `name`; repeats after it are ignored.
fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
}

/// Every location in catalog order.
pub async fn all(State(state): State<AppState>) -> Response {
    let snapshot = state.catalog.snapshot();
    Json(snapshot.all()).into_response()
}

/// Locations serving `beerName`, once per listing.
pub async fn by_beer(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let beer = match first_param(&params, BEER_PARAM) {
        Some(name) if !name.is_empty() => name,
        _ => {
            metrics::record_lookup("missing_key");
            return Err(ApiError::MissingParam { param: BEER_PARAM });
        }
    };

    let snapshot = state.catalog.snapshot();
    match snapshot.by_tag(beer) {
        Ok(bucket) => {
            metrics::record_lookup("hit");
            debug!(beer, matches = bucket.len(), "beer lookup");
            Ok(Json(bucket).into_response())
        }
        Err(e) => {
            metrics::record_lookup("not_found");
            Err(ApiError::lookup(e, BEER_PARAM))
        }
    }
}
