//! Core domain types and collaborator abstractions

pub mod config;
pub mod entity;
pub mod error;
pub mod filter;
pub mod log;
pub mod metrics;
pub mod quote;
pub mod rows;

// Re-export main types for cleaner imports
pub use entity::{Asset, AssetProfile, Currency, PlatformRef, Status};
pub use error::{BuildError, InvalidReference};
pub use filter::{ErrorPolicy, ListingFilter, QuotesFilter, SortKey};
pub use metrics::MetricSource;
pub use quote::QuoteSnapshot;
pub use rows::{Row, RowSource, StaticRows};
