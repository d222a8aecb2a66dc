use crate::query::{Projected, list_assets, lookup_quotes};
use crate::server::error::AppError;
use crate::server::params::{MapParams, QuotesParams, simulated_outcome};
use crate::server::state::AppState;
use crate::server::status::Envelope;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::time::Instant;
use tracing::debug;

/// Fields a map item may carry on the wire. Anything else requested through
/// `aux` is dropped from the response.
const MAP_RESPONSE_FIELDS: &[&str] = &[
    "id",
    "name",
    "symbol",
    "slug",
    "is_active",
    "rank",
    "status",
    "first_historical_data",
    "last_historical_data",
    "platform",
];

fn map_response(mut items: Vec<Projected>) -> Vec<Projected> {
    for item in &mut items {
        item.retain(|key, _| MAP_RESPONSE_FIELDS.contains(&key.as_str()));
    }
    items
}

fn reject(rejection: QueryRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

pub async fn get_map(
    State(state): State<AppState>,
    params: Result<Query<MapParams>, QueryRejection>,
) -> Result<Json<Envelope<Vec<Projected>>>, AppError> {
    let started = Instant::now();
    let Query(params) = params.map_err(reject)?;
    let outcome = params.outcome;
    let filter = params.into_filter()?;
    simulated_outcome(outcome)?;

    let data = map_response(list_assets(&state.store, &filter));
    debug!(count = data.len(), sort = %filter.sort, "Served map");
    Ok(Json(Envelope::success(data, started.elapsed())))
}

pub async fn get_quotes(
    State(state): State<AppState>,
    params: Result<Query<QuotesParams>, QueryRejection>,
) -> Result<Json<Envelope<Projected>>, AppError> {
    let started = Instant::now();
    let Query(params) = params.map_err(reject)?;
    let outcome = params.outcome;
    let filter = params.into_filter()?;
    simulated_outcome(outcome)?;

    let data = lookup_quotes(&state.store, &filter)?;
    debug!(count = data.len(), "Served quotes");
    Ok(Json(Envelope::success(data, started.elapsed())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_map_response_keeps_schema_fields_in_order() {
        let Value::Object(item) = json!({
            "id": 1,
            "name": "Bitcoin",
            "symbol": "BTC",
            "slug": "bitcoin",
            "tags": [],
            "status": "active",
            "quote": {"price": 1.0},
            "platform": null,
        }) else {
            unreachable!()
        };

        let items = map_response(vec![item]);
        let keys: Vec<&str> = items[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name", "symbol", "slug", "status", "platform"]);
    }
}
