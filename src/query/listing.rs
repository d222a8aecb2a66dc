use crate::core::entity::Asset;
use crate::core::filter::{ListingFilter, SortKey};
use crate::core::quote::QuoteSnapshot;
use crate::query::projection::{FieldSet, Projected};
use crate::store::catalog::KeyKind;
use crate::store::{Store, View};
use serde::Serialize;
use tracing::debug;

const IDENTITY_FIELDS: &[&str] = &["id", "name", "symbol", "slug"];

/// An asset as seen by projections, with its current snapshot.
#[derive(Serialize)]
struct AssetRecord<'a> {
    #[serde(flatten)]
    asset: &'a Asset,
    quote: Option<&'a QuoteSnapshot>,
}

fn project_asset(view: &View<'_>, pos: usize, fields: &FieldSet) -> Option<Projected> {
    let asset = view.assets.get(pos)?;
    Some(fields.project(&AssetRecord {
        asset,
        quote: view.asset_quote(pos),
    }))
}

/// Lists assets per `filter`. Empty until the store is built.
pub fn list_assets(store: &Store, filter: &ListingFilter) -> Vec<Projected> {
    let Some(view) = store.view() else {
        debug!("Listing requested before market data is ready");
        return Vec::new();
    };
    let mut fields = FieldSet::new(IDENTITY_FIELDS, &filter.aux);

    // Explicit symbols bypass status, paging and sorting.
    if let Some(symbols) = &filter.symbol {
        return symbols
            .iter()
            .filter_map(|symbol| view.assets.resolve(KeyKind::Symbol, symbol))
            .filter_map(|pos| project_asset(&view, pos, &fields))
            .collect();
    }

    match filter.sort {
        SortKey::Id => page(&view, 0..view.assets.len(), filter, &fields),
        SortKey::CmcRank => {
            fields.insert("rank");
            page(&view, view.assets.ranked().iter().copied(), filter, &fields)
        }
    }
}

/// Emits up to `limit` entries whose status matches, after skipping the
/// first `start - 1` matching ones.
fn page(
    view: &View<'_>,
    order: impl Iterator<Item = usize>,
    filter: &ListingFilter,
    fields: &FieldSet,
) -> Vec<Projected> {
    let mut to_skip = filter.start.saturating_sub(1);
    let mut result = Vec::new();

    for pos in order {
        if result.len() >= filter.limit {
            break;
        }
        let Some(asset) = view.assets.get(pos) else {
            continue;
        };
        if !filter.status_set.contains(&asset.status) {
            continue;
        }
        if to_skip > 0 {
            to_skip -= 1;
            continue;
        }
        if let Some(projected) = project_asset(view, pos, fields) {
            result.push(projected);
        }
    }

    debug!(count = result.len(), sort = %filter.sort, "Listed assets");
    result
}
