//! Catalog records: tracked assets and fiat currencies

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
    Untracked,
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Status::Active => "active",
                Status::Inactive => "inactive",
                Status::Untracked => "untracked",
            }
        )
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            "untracked" => Ok(Status::Untracked),
            _ => Err(anyhow::anyhow!("Invalid listing status: {}", s)),
        }
    }
}

/// Frozen copy of the identity of the asset whose chain hosts a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRef {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    pub token_address: String,
}

impl PlatformRef {
    pub fn from_asset(asset: &Asset, token_address: &str) -> Self {
        Self {
            id: asset.id,
            name: asset.name.clone(),
            symbol: asset.symbol.clone(),
            slug: asset.slug.clone(),
            token_address: token_address.to_string(),
        }
    }
}

/// Synthetic, build-time attributes of an asset that do not come from the
/// reference data.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetProfile {
    pub first_historical_data: DateTime<Utc>,
    pub last_historical_data: DateTime<Utc>,
    pub num_market_pairs: u32,
    pub circulating_supply: f64,
    pub total_supply: f64,
    pub max_supply: f64,
    pub last_updated: DateTime<Utc>,
}

/// One tracked cryptocurrency. Field names match the wire format, since
/// projections select fields by their serialized name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    pub is_active: i64,
    pub rank: Option<i64>,
    pub status: Status,
    pub first_historical_data: DateTime<Utc>,
    pub last_historical_data: DateTime<Utc>,
    pub is_fiat: u8,
    pub num_market_pairs: u32,
    pub circulating_supply: f64,
    pub total_supply: f64,
    pub max_supply: f64,
    pub tags: Vec<String>,
    pub platform: Option<PlatformRef>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Currency {
    pub id: i64,
    pub symbol: String,
    pub name: String,
}
