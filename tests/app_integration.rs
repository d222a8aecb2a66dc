use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use cmc_mock::cli::OutputFormat;
use cmc_mock::core::config::AppConfig;
use cmc_mock::core::filter::{ListingFilter, QuotesFilter};
use cmc_mock::server::{create_router, state::AppState};
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use tracing::info;

mod test_utils {
    use std::fs;
    use std::path::{Path, PathBuf};

    const MAP_CSV: &str = "\
id,name,symbol,slug,is_active,rank,status,platform,token_address
1,Bitcoin,BTC,bitcoin,1,1,active,,
2,Litecoin,LTC,litecoin,0,,inactive,,
825,Tether USDt,USDT,tether,1,3,active,1027,0xdac17f958d2ee523a2206206994597c13d831ec7

1027,Ethereum,ETH,ethereum,1,2,active,,
";

    const FIAT_CSV: &str = "\
id,name,symbol
2781,United States Dollar,USD
2790,Euro,EUR
";

    /// Writes reference data and a config pointing at it, returning the
    /// config path.
    pub fn write_fixture(dir: &Path) -> PathBuf {
        let map_path = dir.join("map.csv");
        let fiat_path = dir.join("fiat.csv");
        fs::write(&map_path, MAP_CSV).unwrap();
        fs::write(&fiat_path, FIAT_CSV).unwrap();

        let config = format!(
            "data:\n  map_path: \"{}\"\n  fiat_path: \"{}\"\nserver:\n  host: \"127.0.0.1\"\n  port: 0\n",
            map_path.display(),
            fiat_path.display()
        );
        let config_path = dir.join("config.yaml");
        fs::write(&config_path, config).unwrap();
        config_path
    }
}

fn fixture_router(dir: &TempDir) -> Router {
    let config_path = test_utils::write_fixture(dir.path());
    let config = AppConfig::load_from_path(&config_path).unwrap();
    let store = cmc_mock::load_store(&config).unwrap();
    create_router(AppState::new(Arc::new(store)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    info!(%uri, %status, "Received response");
    (status, body)
}

#[test_log::test(tokio::test)]
async fn test_map_lists_active_assets_by_id() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(fixture_router(&dir), "/coinmarketcap/map").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"]["error_code"], 0);
    assert_eq!(body["status"]["credit_count"], 1);
    assert!(body["status"]["error_message"].is_null());

    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 825, 1027]);
    assert_eq!(body["data"][1]["platform"]["symbol"], "ETH");
    assert!(body["data"][0].get("rank").is_none());
}

#[test_log::test(tokio::test)]
async fn test_map_sorted_by_rank_with_paging() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(
        fixture_router(&dir),
        "/coinmarketcap/map/?sort=cmc_rank&start=2&limit=2&listing_status=active,inactive",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    let symbols: Vec<&str> = data.iter().map(|e| e["symbol"].as_str().unwrap()).collect();
    assert_eq!(symbols, vec!["ETH", "USDT"]);
    assert_eq!(data[0]["rank"], 2);
}

#[test_log::test(tokio::test)]
async fn test_map_response_drops_fields_outside_the_item_schema() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(
        fixture_router(&dir),
        "/coinmarketcap/map?symbol=USDT&aux=quote,tags,status,platform",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let item = body["data"][0].as_object().unwrap();
    let keys: Vec<&str> = item.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "name", "symbol", "slug", "status", "platform"]);
}

#[test_log::test(tokio::test)]
async fn test_map_rejects_out_of_range_limit() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(fixture_router(&dir), "/coinmarketcap/map?limit=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"]["error_code"], 400);
    assert!(body.get("data").is_none());
}

#[test_log::test(tokio::test)]
async fn test_return_parameter_simulates_failures() {
    let dir = TempDir::new().unwrap();
    let app = fixture_router(&dir);

    let (status, body) = get(app.clone(), "/coinmarketcap/map?return=429").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body["status"]["error_message"],
        "It appears that you are making too many requests, please wait a bit."
    );
    assert_eq!(body["status"]["credit_count"], 0);
    assert!(body.get("data").is_none());

    let (status, body) = get(app.clone(), "/coinmarketcap/quotes?id=1&return=500").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["status"]["error_message"],
        "Looks like something went wrong on our end, please try again later."
    );

    let (status, _) = get(app, "/coinmarketcap/map?return=418").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_quotes_convert_against_fiat_and_assets() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(
        fixture_router(&dir),
        "/coinmarketcap/quotes?symbol=BTC&convert=EUR,ETH",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let entry = &body["data"]["BTC"];
    assert_eq!(entry["id"], 1);
    assert_eq!(entry["cmc_rank"], 1);
    assert!(entry["quote"]["EUR"]["price"].is_number());
    assert!(entry["quote"]["ETH"]["price"].is_number());
    assert!(entry["quote"].get("USD").is_none());
}

#[test_log::test(tokio::test)]
async fn test_quotes_invalid_reference_is_reported_or_skipped() {
    let dir = TempDir::new().unwrap();
    let app = fixture_router(&dir);

    let (status, body) = get(app.clone(), "/coinmarketcap/quotes?id=1,999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["status"]["error_message"],
        "the id with value \"999\" is not valid"
    );

    let (status, body) = get(app, "/coinmarketcap/quotes?id=1,999&skip_invalid=true").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_object().unwrap();
    assert_eq!(data.len(), 1);
    assert!(data["1"]["quote"]["USD"].is_object());
}

#[test_log::test(tokio::test)]
async fn test_quotes_ids_must_be_canonical() {
    let dir = TempDir::new().unwrap();
    let app = fixture_router(&dir);

    let (status, body) = get(app.clone(), "/coinmarketcap/quotes?id=01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["status"]["error_message"],
        "the id with value \"01\" is not valid"
    );

    let (status, body) = get(app, "/coinmarketcap/quotes?id=1&convert_id=%2B2781").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["status"]["error_message"],
        "the convert with value \"+2781\" is not valid"
    );
}

#[test_log::test(tokio::test)]
async fn test_quotes_require_an_identifier() {
    let dir = TempDir::new().unwrap();
    let (status, body) = get(fixture_router(&dir), "/coinmarketcap/quotes?convert=USD").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"]["error_code"], 400);
}

#[test_log::test(tokio::test)]
async fn test_run_command_one_shot_queries() {
    let dir = TempDir::new().unwrap();
    let config_path = test_utils::write_fixture(dir.path());
    let config_path = config_path.to_str().unwrap();

    let map = cmc_mock::AppCommand::Map {
        filter: ListingFilter::default(),
        format: OutputFormat::Json,
    };
    cmc_mock::run_command(map, Some(config_path)).await.unwrap();

    let quotes = cmc_mock::AppCommand::Quotes {
        filter: QuotesFilter {
            slug: Some(vec!["ethereum".to_string()]),
            ..QuotesFilter::default()
        },
        format: OutputFormat::Table,
    };
    cmc_mock::run_command(quotes, Some(config_path)).await.unwrap();

    let invalid = cmc_mock::AppCommand::Quotes {
        filter: QuotesFilter {
            symbol: Some(vec!["NOPE".to_string()]),
            ..QuotesFilter::default()
        },
        format: OutputFormat::Json,
    };
    let err = cmc_mock::run_command(invalid, Some(config_path))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("NOPE"));
}

#[test_log::test(tokio::test)]
async fn test_missing_reference_data_fails_the_build() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.yaml");
    fs::write(
        &config_path,
        format!("data_path: \"{}\"\n", dir.path().join("absent").display()),
    )
    .unwrap();

    let config = AppConfig::load_from_path(&config_path).unwrap();
    let err = cmc_mock::load_store(&config).unwrap_err();
    assert!(format!("{err:#}").contains("map"));
}
