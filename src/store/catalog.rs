//! Owning catalogs with non-owning lookup indices

use crate::core::entity::{Asset, Currency};
use std::collections::{BTreeMap, HashMap};

/// Which index a literal identifier is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Id,
    Slug,
    Symbol,
}

impl KeyKind {
    /// Request field name the key kind is read from.
    pub fn field(&self) -> &'static str {
        match self {
            KeyKind::Id => "id",
            KeyKind::Slug => "slug",
            KeyKind::Symbol => "symbol",
        }
    }
}

/// Ids are keyed by their canonical decimal text, so `01`, `+1` or ` 1`
/// do not name id 1.
fn parse_id(literal: &str) -> Option<i64> {
    literal
        .parse::<i64>()
        .ok()
        .filter(|id| id.to_string() == literal)
}

/// Assets in ascending id order. Every index maps a key to a position in
/// `entries`, so all views alias the same record.
#[derive(Debug, Default)]
pub struct AssetCatalog {
    entries: Vec<Asset>,
    by_id: HashMap<i64, usize>,
    by_slug: HashMap<String, usize>,
    by_symbol: HashMap<String, usize>,
    ranked: Vec<usize>,
}

impl AssetCatalog {
    /// Assembles the catalog. `slugs` and `symbols` map keys to asset ids;
    /// keys whose id is not in `assets` are dropped.
    pub(crate) fn new(
        assets: BTreeMap<i64, Asset>,
        slugs: HashMap<String, i64>,
        symbols: HashMap<String, i64>,
    ) -> Self {
        let entries: Vec<Asset> = assets.into_values().collect();
        let by_id: HashMap<i64, usize> = entries
            .iter()
            .enumerate()
            .map(|(pos, asset)| (asset.id, pos))
            .collect();
        let resolve = |keys: HashMap<String, i64>| -> HashMap<String, usize> {
            keys.into_iter()
                .filter_map(|(key, id)| by_id.get(&id).map(|&pos| (key, pos)))
                .collect()
        };
        let by_slug = resolve(slugs);
        let by_symbol = resolve(symbols);

        // Stable: equal ranks keep id order, null ranks trail.
        let mut ranked: Vec<usize> = (0..entries.len()).collect();
        ranked.sort_by_key(|&pos| (entries[pos].rank.is_none(), entries[pos].rank));

        Self {
            entries,
            by_id,
            by_slug,
            by_symbol,
            ranked,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&Asset> {
        self.entries.get(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.entries.iter()
    }

    /// Positions ordered by rank.
    pub fn ranked(&self) -> &[usize] {
        &self.ranked
    }

    pub fn resolve(&self, kind: KeyKind, literal: &str) -> Option<usize> {
        match kind {
            KeyKind::Id => parse_id(literal).and_then(|id| self.by_id.get(&id).copied()),
            KeyKind::Slug => self.by_slug.get(literal).copied(),
            KeyKind::Symbol => self.by_symbol.get(literal).copied(),
        }
    }
}

/// Fiat currencies in ascending id order, indexed by id and symbol.
#[derive(Debug, Default)]
pub struct CurrencyCatalog {
    entries: Vec<Currency>,
    by_id: HashMap<i64, usize>,
    by_symbol: HashMap<String, usize>,
}

impl CurrencyCatalog {
    pub(crate) fn new(currencies: BTreeMap<i64, Currency>, symbols: HashMap<String, i64>) -> Self {
        let entries: Vec<Currency> = currencies.into_values().collect();
        let by_id: HashMap<i64, usize> = entries
            .iter()
            .enumerate()
            .map(|(pos, currency)| (currency.id, pos))
            .collect();
        let by_symbol = symbols
            .into_iter()
            .filter_map(|(key, id)| by_id.get(&id).map(|&pos| (key, pos)))
            .collect();

        Self {
            entries,
            by_id,
            by_symbol,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&Currency> {
        self.entries.get(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.entries.iter()
    }

    /// Currencies have no slug index, so slug lookups never resolve.
    pub fn resolve(&self, kind: KeyKind, literal: &str) -> Option<usize> {
        match kind {
            KeyKind::Id => parse_id(literal).and_then(|id| self.by_id.get(&id).copied()),
            KeyKind::Slug => None,
            KeyKind::Symbol => self.by_symbol.get(literal).copied(),
        }
    }
}
