//! Turns raw reference rows into catalogs

use crate::core::entity::{Asset, Currency, PlatformRef, Status};
use crate::core::metrics::MetricSource;
use crate::core::rows::Row;
use crate::store::catalog::{AssetCatalog, CurrencyCatalog};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

fn text<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).map_or("", String::as_str)
}

/// Parses an integer column. Missing, unparseable and zero values all read
/// as absent.
fn int_field(row: &Row, column: &str) -> Option<i64> {
    text(row, column)
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|value| *value != 0)
}

fn status_field(row: &Row) -> Status {
    let raw = text(row, "status");
    raw.parse().unwrap_or_else(|_| {
        debug!(status = raw, "Unknown listing status, treating as untracked");
        Status::Untracked
    })
}

pub(crate) fn build_assets(rows: &[Row], metrics: &dyn MetricSource) -> AssetCatalog {
    let mut assets: BTreeMap<i64, Asset> = BTreeMap::new();
    let mut slugs: HashMap<String, i64> = HashMap::new();
    let mut symbols: HashMap<String, i64> = HashMap::new();

    for (line, row) in rows.iter().enumerate() {
        let Some(id) = int_field(row, "id") else {
            debug!(line, "Dropping asset row without a valid id");
            continue;
        };

        let profile = metrics.asset_profile();
        let asset = Asset {
            id,
            name: text(row, "name").to_string(),
            symbol: text(row, "symbol").to_string(),
            slug: text(row, "slug").to_string(),
            is_active: int_field(row, "is_active").unwrap_or(0),
            rank: int_field(row, "rank"),
            status: status_field(row),
            first_historical_data: profile.first_historical_data,
            last_historical_data: profile.last_historical_data,
            is_fiat: 0,
            num_market_pairs: profile.num_market_pairs,
            circulating_supply: profile.circulating_supply,
            total_supply: profile.total_supply,
            max_supply: profile.max_supply,
            tags: Vec::new(),
            platform: None,
            last_updated: profile.last_updated,
        };

        slugs.insert(asset.slug.clone(), id);
        symbols.insert(asset.symbol.clone(), id);
        assets.insert(id, asset);
    }

    // Platforms may point at any row, so they resolve once every asset exists.
    for row in rows {
        let Some(id) = int_field(row, "id") else {
            continue;
        };
        let platform = int_field(row, "platform")
            .and_then(|platform_id| assets.get(&platform_id))
            .map(|host| PlatformRef::from_asset(host, text(row, "token_address")));

        if let (Some(platform), Some(asset)) = (platform, assets.get_mut(&id)) {
            asset.platform = Some(platform);
        }
    }

    debug!(count = assets.len(), "Built asset catalog");
    AssetCatalog::new(assets, slugs, symbols)
}

pub(crate) fn build_currencies(rows: &[Row]) -> CurrencyCatalog {
    let mut currencies: BTreeMap<i64, Currency> = BTreeMap::new();
    let mut symbols: HashMap<String, i64> = HashMap::new();

    for (line, row) in rows.iter().enumerate() {
        let Some(id) = int_field(row, "id") else {
            debug!(line, "Dropping currency row without a valid id");
            continue;
        };

        let currency = Currency {
            id,
            symbol: text(row, "symbol").to_string(),
            name: text(row, "name").to_string(),
        };
        symbols.insert(currency.symbol.clone(), id);
        currencies.insert(id, currency);
    }

    debug!(count = currencies.len(), "Built currency catalog");
    CurrencyCatalog::new(currencies, symbols)
}
