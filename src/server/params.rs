//! Query-string parameters and their validation into core filters

use crate::core::filter::{
    DEFAULT_LIMIT, DEFAULT_LISTING_AUX, DEFAULT_QUOTES_AUX, ListingFilter, MAX_LIMIT,
    QuotesFilter, SortKey, split_list,
};
use crate::server::error::AppError;
use axum::http::StatusCode;
use serde::Deserialize;

fn default_listing_status() -> String {
    "active".to_string()
}

fn default_start() -> usize {
    1
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_listing_aux() -> String {
    DEFAULT_LISTING_AUX.to_string()
}

fn default_quotes_aux() -> String {
    DEFAULT_QUOTES_AUX.to_string()
}

fn default_return() -> u16 {
    200
}

/// Treats an empty parameter like an absent one.
fn list_param(value: Option<String>) -> Option<Vec<String>> {
    value.filter(|v| !v.is_empty()).map(|v| split_list(&v))
}

/// Maps the `return` parameter to the outcome to simulate.
pub fn simulated_outcome(code: u16) -> Result<(), AppError> {
    match code {
        200 => Ok(()),
        400 | 401 | 403 | 429 => Err(AppError::Simulated(
            StatusCode::from_u16(code).map_err(|e| AppError::InternalError(e.into()))?,
        )),
        500 => Err(AppError::InternalError(anyhow::anyhow!("boom"))),
        _ => Err(AppError::BadRequest(
            "querystring.return should be equal to one of the allowed values".to_string(),
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct MapParams {
    #[serde(default = "default_listing_status")]
    pub listing_status: String,
    #[serde(default = "default_start")]
    pub start: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub sort: SortKey,
    pub symbol: Option<String>,
    #[serde(default = "default_listing_aux")]
    pub aux: String,
    #[serde(default = "default_return", rename = "return")]
    pub outcome: u16,
}

impl MapParams {
    pub fn into_filter(self) -> Result<ListingFilter, AppError> {
        if self.start < 1 {
            return Err(AppError::BadRequest(
                "querystring.start should be >= 1".to_string(),
            ));
        }
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(AppError::BadRequest(format!(
                "querystring.limit should be between 1 and {MAX_LIMIT}"
            )));
        }

        Ok(ListingFilter {
            status_set: ListingFilter::statuses_from(&split_list(&self.listing_status)),
            start: self.start,
            limit: self.limit,
            sort: self.sort,
            symbol: list_param(self.symbol),
            aux: split_list(&self.aux),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct QuotesParams {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub symbol: Option<String>,
    pub convert: Option<String>,
    pub convert_id: Option<String>,
    #[serde(default = "default_quotes_aux")]
    pub aux: String,
    #[serde(default)]
    pub skip_invalid: bool,
    #[serde(default = "default_return", rename = "return")]
    pub outcome: u16,
}

impl QuotesParams {
    pub fn into_filter(self) -> Result<QuotesFilter, AppError> {
        let filter = QuotesFilter {
            id: list_param(self.id),
            slug: list_param(self.slug),
            symbol: list_param(self.symbol),
            convert: list_param(self.convert),
            convert_id: list_param(self.convert_id),
            aux: split_list(&self.aux),
            skip_invalid: self.skip_invalid,
        };

        if filter.id.is_none() && filter.slug.is_none() && filter.symbol.is_none() {
            return Err(AppError::BadRequest(
                "querystring should have at least one of id, slug, symbol".to_string(),
            ));
        }
        Ok(filter)
    }
}
