use crate::core::entity::Asset;
use crate::core::error::InvalidReference;
use crate::core::filter::{ErrorPolicy, QuotesFilter};
use crate::core::quote::QuoteSnapshot;
use crate::query::projection::{FieldSet, Projected};
use crate::store::catalog::KeyKind;
use crate::store::{Store, View};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const ENTRY_FIELDS: &[&str] = &["id", "name", "symbol", "slug", "last_updated", "quote"];
const QUOTE_FIELDS: &[&str] = &[
    "price",
    "volume_24h",
    "market_cap",
    "percent_change_1h",
    "percent_change_24h",
    "percent_change_7d",
    "last_updated",
];
const DEFAULT_CONVERT: &str = "USD";

#[derive(Serialize)]
struct QuoteEntry<'a> {
    #[serde(flatten)]
    asset: &'a Asset,
    date_added: DateTime<Utc>,
    cmc_rank: Option<i64>,
    quote: Projected,
}

/// The conversion targets of a request, all looked up the same way.
/// Misses are reported under `convert` whichever parameter named them.
struct Targets<'a> {
    kind: KeyKind,
    values: Vec<&'a str>,
}

impl<'a> Targets<'a> {
    fn from_filter(filter: &'a QuotesFilter) -> Self {
        match (&filter.convert, &filter.convert_id) {
            (Some(symbols), _) => Targets {
                kind: KeyKind::Symbol,
                values: symbols.iter().map(String::as_str).collect(),
            },
            (None, Some(ids)) => Targets {
                kind: KeyKind::Id,
                values: ids.iter().map(String::as_str).collect(),
            },
            (None, None) => Targets {
                kind: KeyKind::Symbol,
                values: vec![DEFAULT_CONVERT],
            },
        }
    }
}

/// Looks up assets by id, slug and symbol and quotes each of them against
/// the conversion targets.
///
/// Entries are keyed by the literal value the caller passed, so a later
/// group overwrites an earlier one on an identical literal. Unresolved
/// identifiers or targets fail the whole lookup unless `skip_invalid` is set,
/// in which case they are left out.
pub fn lookup_quotes(
    store: &Store,
    filter: &QuotesFilter,
) -> Result<Projected, InvalidReference> {
    let mut result = Projected::new();
    let Some(view) = store.view() else {
        debug!("Quotes requested before market data is ready");
        return Ok(result);
    };

    let policy = ErrorPolicy::from_skip_invalid(filter.skip_invalid);
    let entry_fields = FieldSet::new(ENTRY_FIELDS, &filter.aux);
    let quote_fields = FieldSet::new(QUOTE_FIELDS, &filter.aux);
    let targets = Targets::from_filter(filter);

    let groups = [
        (KeyKind::Id, &filter.id),
        (KeyKind::Slug, &filter.slug),
        (KeyKind::Symbol, &filter.symbol),
    ];
    for (kind, values) in groups {
        for value in values.iter().flatten() {
            let Some(pos) = view.assets.resolve(kind, value) else {
                policy.absorb(InvalidReference::new(kind.field(), value))?;
                continue;
            };
            let (Some(asset), Some(source)) = (view.assets.get(pos), view.asset_quote(pos)) else {
                continue;
            };

            let quote = convert(&view, source, &targets, &quote_fields, policy)?;
            let entry = QuoteEntry {
                asset,
                date_added: asset.first_historical_data,
                cmc_rank: asset.rank,
                quote,
            };
            result.insert(value.clone(), Value::Object(entry_fields.project(&entry)));
        }
    }

    debug!(count = result.len(), "Looked up quotes");
    Ok(result)
}

fn convert(
    view: &View<'_>,
    source: &QuoteSnapshot,
    targets: &Targets<'_>,
    fields: &FieldSet,
    policy: ErrorPolicy,
) -> Result<Projected, InvalidReference> {
    let mut quotes = Projected::new();
    for &target in &targets.values {
        match view.target_quote(targets.kind, target) {
            Some(snapshot) => {
                let derived = QuoteSnapshot::derived(source, snapshot);
                quotes.insert(target.to_string(), Value::Object(fields.project(&derived)));
            }
            None => policy.absorb(InvalidReference::new("convert", target))?,
        }
    }
    Ok(quotes)
}
