//! Already-validated query filters consumed by the query engine

use crate::core::entity::Status;
use crate::core::error::InvalidReference;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_LISTING_AUX: &str =
    "platform,first_historical_data,last_historical_data,is_active";
pub const DEFAULT_QUOTES_AUX: &str = "num_market_pairs,cmc_rank,date_added,tags,platform,max_supply,circulating_supply,total_supply,is_active,is_fiat";
pub const DEFAULT_LIMIT: usize = 1000;
pub const MAX_LIMIT: usize = 5000;

/// Splits a comma-separated parameter. Segments are kept verbatim, empty ones
/// included, so they simply fail to match anything.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Id,
    CmcRank,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Id => write!(f, "id"),
            SortKey::CmcRank => write!(f, "cmc_rank"),
        }
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "cmc_rank" => Ok(SortKey::CmcRank),
            _ => Err(anyhow::anyhow!("Invalid sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilter {
    pub status_set: HashSet<Status>,
    /// 1-based offset into the matching entries.
    pub start: usize,
    pub limit: usize,
    pub sort: SortKey,
    pub symbol: Option<Vec<String>>,
    pub aux: Vec<String>,
}

impl ListingFilter {
    /// Builds the status set from raw names. Unknown names can never match an
    /// entry, so they are dropped.
    pub fn statuses_from<S: AsRef<str>>(names: &[S]) -> HashSet<Status> {
        names
            .iter()
            .filter_map(|name| name.as_ref().parse().ok())
            .collect()
    }
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            status_set: HashSet::from([Status::Active]),
            start: 1,
            limit: DEFAULT_LIMIT,
            sort: SortKey::Id,
            symbol: None,
            aux: split_list(DEFAULT_LISTING_AUX),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuotesFilter {
    pub id: Option<Vec<String>>,
    pub slug: Option<Vec<String>>,
    pub symbol: Option<Vec<String>>,
    pub convert: Option<Vec<String>>,
    pub convert_id: Option<Vec<String>>,
    pub aux: Vec<String>,
    pub skip_invalid: bool,
}

impl Default for QuotesFilter {
    fn default() -> Self {
        Self {
            id: None,
            slug: None,
            symbol: None,
            convert: None,
            convert_id: None,
            aux: split_list(DEFAULT_QUOTES_AUX),
            skip_invalid: false,
        }
    }
}

/// What to do with a reference that does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    Report,
    Skip,
}

impl ErrorPolicy {
    pub fn from_skip_invalid(skip_invalid: bool) -> Self {
        if skip_invalid {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Report
        }
    }

    /// Propagates `err` under `Report`, swallows it under `Skip`.
    pub fn absorb(self, err: InvalidReference) -> Result<(), InvalidReference> {
        match self {
            ErrorPolicy::Report => Err(err),
            ErrorPolicy::Skip => {
                debug!(error = %err, "Skipping invalid reference");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_keeps_order_and_empty_segments() {
        assert_eq!(split_list("BTC,ETH"), vec!["BTC", "ETH"]);
        assert_eq!(split_list("BTC,,ETH"), vec!["BTC", "", "ETH"]);
        assert_eq!(split_list(""), vec![""]);
    }

    #[test]
    fn test_statuses_from_ignores_unknown_names() {
        let set = ListingFilter::statuses_from(&["active", "bogus", "untracked"]);
        assert_eq!(set, HashSet::from([Status::Active, Status::Untracked]));
    }

    #[test]
    fn test_error_policy() {
        let err = InvalidReference::new("id", "42");
        assert_eq!(
            ErrorPolicy::from_skip_invalid(false).absorb(err.clone()),
            Err(err.clone())
        );
        assert_eq!(ErrorPolicy::from_skip_invalid(true).absorb(err), Ok(()));
    }

    #[test]
    fn test_sort_key_wire_names() {
        let key: SortKey = serde_json::from_str("\"cmc_rank\"").unwrap();
        assert_eq!(key, SortKey::CmcRank);
        assert_eq!(SortKey::Id.to_string(), "id");
        assert_eq!("cmc_rank".parse::<SortKey>().unwrap(), SortKey::CmcRank);
        assert!("rank".parse::<SortKey>().is_err());
    }
}
